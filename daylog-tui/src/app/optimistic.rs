//! Two-phase local updates: show a value right away, then keep it once the
//! server accepts it or roll back to what the server last accepted.

use std::collections::HashMap;
use std::hash::Hash;

/// Handle for one commit started with `PendingChanges::begin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit<T> {
    seq: u64,
    proposed: T,
}

/// What a key shows once one of its commits has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    /// Other commits for the key are still in flight.
    Pending,
    /// The newest value went through.
    Kept(T),
    /// The newest value was rejected. Shows the last value the server
    /// accepted during this session, or the fetched data when there is none.
    RolledBack(Option<T>),
}

#[derive(Debug, Clone)]
struct Entry<T> {
    shown: T,
    latest: u64,
    in_flight: usize,
    latest_failed: bool,
    /// Newest accepted value, its commit and the reload ticket that carries it.
    accepted: Option<(T, u64, u64)>,
}

/// Local values keyed by `K`, layered over server data while their commits
/// are in flight and until a reload brings the server's copy.
#[derive(Debug, Clone)]
pub struct PendingChanges<K, T> {
    entries: HashMap<K, Entry<T>>,
    next_seq: u64,
}

impl<K, T> Default for PendingChanges<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, T: Clone> PendingChanges<K, T> {
    pub fn get(&self, key: &K) -> Option<&T> {
        self.entries.get(key).map(|entry| &entry.shown)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries.iter().map(|(key, entry)| (key, &entry.shown))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Show `proposed` for `key` until its commit finishes.
    pub fn begin(&mut self, key: K, proposed: T) -> PendingCommit<T> {
        self.next_seq += 1;
        let seq = self.next_seq;
        let entry = self.entries.entry(key).or_insert_with(|| Entry {
            shown: proposed.clone(),
            latest: seq,
            in_flight: 0,
            latest_failed: false,
            accepted: None,
        });
        entry.shown = proposed.clone();
        entry.latest = seq;
        entry.in_flight += 1;
        entry.latest_failed = false;
        PendingCommit { seq, proposed }
    }

    /// Record an accepted commit. Its value stays visible until
    /// `settle_through(reload_ticket)`.
    pub fn confirm(&mut self, key: &K, commit: PendingCommit<T>, reload_ticket: u64) -> Settled<T> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Settled::Pending;
        };
        entry.in_flight = entry.in_flight.saturating_sub(1);
        let newer = entry
            .accepted
            .as_ref()
            .map_or(true, |(_, seq, _)| commit.seq > *seq);
        if newer {
            entry.accepted = Some((commit.proposed, commit.seq, reload_ticket));
        }
        self.finish(key)
    }

    /// Record a rejected commit. A commit that was superseded by a newer
    /// one for the same key changes nothing on its own.
    pub fn fail(&mut self, key: &K, commit: PendingCommit<T>) -> Settled<T> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Settled::Pending;
        };
        entry.in_flight = entry.in_flight.saturating_sub(1);
        if commit.seq == entry.latest {
            entry.latest_failed = true;
        }
        self.finish(key)
    }

    /// Drop values with nothing in flight whose reload (or a later one)
    /// has arrived.
    pub fn settle_through(&mut self, reload_ticket: u64) {
        self.entries.retain(|_, entry| {
            entry.in_flight > 0
                || entry
                    .accepted
                    .as_ref()
                    .map_or(false, |(_, _, ticket)| *ticket > reload_ticket)
        });
    }

    fn finish(&mut self, key: &K) -> Settled<T> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Settled::Pending;
        };
        if entry.in_flight > 0 {
            return Settled::Pending;
        }
        if !entry.latest_failed {
            return Settled::Kept(entry.shown.clone());
        }
        match entry.accepted.clone() {
            Some((value, seq, _)) => {
                entry.shown = value.clone();
                entry.latest = seq;
                entry.latest_failed = false;
                Settled::RolledBack(Some(value))
            }
            None => {
                self.entries.remove(key);
                Settled::RolledBack(None)
            }
        }
    }
}
