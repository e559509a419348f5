use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;

use super::ApiError;
use crate::calendar::CalendarDate;
use crate::types::{DayPatch, DayRecord};

/// In-memory stand-in for the day-record API, with the same upsert rules.
#[derive(Debug, Clone, Default)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug, Default)]
struct DevStore {
    records: BTreeMap<CalendarDate, DayRecord>,
    next_id: i64,
    fail_writes: bool,
}

impl DevStore {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl DevBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with a few days around `today`.
    pub fn seeded(today: CalendarDate) -> Self {
        let backend = Self::new();
        for (offset, completed, content) in seed_days() {
            if let Some(date) = today.add_days(offset) {
                let mut record = DayRecord::empty(date);
                record.completed = completed;
                record.content = content.to_string();
                // The store is empty and these dates are unique.
                let _ = backend.create(&record);
            }
        }
        backend
    }

    /// Make every following write fail with a 503, to exercise revert paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<DayRecord> {
        // Newest first, like the server
        self.lock().records.values().rev().cloned().collect()
    }

    pub fn get(&self, date: CalendarDate) -> Option<DayRecord> {
        self.lock().records.get(&date).cloned()
    }

    pub fn create(&self, record: &DayRecord) -> Result<DayRecord, ApiError> {
        let mut store = self.lock();
        let call = "POST /api/days";
        if store.fail_writes {
            return Err(unavailable(call));
        }
        if store.records.contains_key(&record.date) {
            return Err(ApiError::Server {
                call: call.to_string(),
                status: StatusCode::BAD_REQUEST,
            });
        }
        let created = DayRecord {
            id: Some(store.allocate_id()),
            date: record.date,
            content: record.content.clone(),
            completed: record.completed,
            updated_at: Some(timestamp()),
        };
        store.records.insert(created.date, created.clone());
        Ok(created)
    }

    pub fn update(&self, date: CalendarDate, patch: &DayPatch) -> Result<DayRecord, ApiError> {
        let mut store = self.lock();
        if store.fail_writes {
            return Err(unavailable("PUT /api/days/{date}"));
        }
        let existing_id = store.records.get(&date).and_then(|r| r.id);
        let id = match existing_id {
            Some(id) => id,
            None => store.allocate_id(),
        };
        let record = store
            .records
            .entry(date)
            .or_insert_with(|| DayRecord::empty(date));
        record.id = Some(id);
        if let Some(content) = &patch.content {
            record.content = content.clone();
        }
        if let Some(completed) = patch.completed {
            record.completed = completed;
        }
        record.updated_at = Some(timestamp());
        Ok(record.clone())
    }
}

fn unavailable(call: &str) -> ApiError {
    ApiError::Server {
        call: call.to_string(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

fn seed_days() -> [(i64, bool, &'static str); 4] {
    [
        (
            -6,
            true,
            "# Networking basics\n\n- [x] OSI layers\n- [x] Subnetting drills\n",
        ),
        (
            -3,
            true,
            "# Containers\n\n```sh\ndocker run --rm -it alpine sh\n```\n\nImages vs containers finally clicked.\n",
        ),
        (-2, false, "# IAM\n\n- [ ] Read up on role trust policies\n"),
        (-1, true, ""),
    ]
}
