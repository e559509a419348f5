use crate::api::ApiError;
use crate::calendar::{CalendarDate, DayIndex};
use crate::types::DayRecord;
use std::sync::Arc;

mod editor;
mod navigation;
mod optimistic;
mod state;
pub use editor::{DayEditor, EditorMode};
pub use optimistic::{PendingChanges, PendingCommit, Settled};
pub use state::Focus;

pub struct App {
    pub running: bool,
    pub today: CalendarDate,
    pub selected_date: CalendarDate,
    pub current_year: i32,
    pub focus: Focus,

    // Last fetched day list, replaced wholesale by `replace_days`
    days: Arc<[DayRecord]>,
    pub editor: DayEditor,
    pub pending: PendingChanges<CalendarDate, bool>,

    // Reload bookkeeping: tickets issued and the newest one applied
    reload_ticket: u64,
    applied_ticket: u64,

    pub status_message: Option<String>,
    pub alert: Option<String>,

    // Loading indicator
    pub in_flight: usize,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    /// Shown in the header: the API base URL, or "dev" for the in-memory backend.
    pub source_label: String,
}

/// A completion toggle that has been applied locally and awaits the server.
#[derive(Debug)]
pub struct CompletionToggle {
    pub date: CalendarDate,
    pub completed: bool,
    commit: PendingCommit<bool>,
}

impl App {
    pub fn new(today: CalendarDate, source_label: impl Into<String>) -> Self {
        Self {
            running: true,
            today,
            selected_date: today,
            current_year: today.year(),
            focus: Focus::Calendar,
            days: Arc::from(Vec::new()),
            editor: DayEditor::loading(today),
            pending: PendingChanges::default(),
            reload_ticket: 0,
            applied_ticket: 0,
            status_message: None,
            alert: None,
            in_flight: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            source_label: source_label.into(),
        }
    }

    pub fn days(&self) -> &Arc<[DayRecord]> {
        &self.days
    }

    pub fn record_for(&self, date: CalendarDate) -> Option<&DayRecord> {
        self.days.iter().find(|record| record.date == date)
    }

    /// Completion lookup for rendering: fetched values with in-flight
    /// toggles layered on top.
    pub fn day_index(&self) -> DayIndex {
        DayIndex::from_records(self.days())
            .with_pending(self.pending.iter().map(|(date, completed)| (*date, *completed)))
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Issue a ticket for a new day-list reload.
    pub fn next_reload_ticket(&mut self) -> u64 {
        self.reload_ticket += 1;
        self.reload_ticket
    }

    /// Swap in a freshly fetched day list. Responses older than one already
    /// applied are dropped. Returns true when the list was taken.
    pub fn replace_days(&mut self, records: Vec<DayRecord>, ticket: u64) -> bool {
        if ticket < self.applied_ticket {
            return false;
        }
        self.applied_ticket = ticket;
        self.days = Arc::from(records);
        self.pending.settle_through(ticket);

        // A toggle still in flight owns the editor's checkbox
        let date = self.editor.date();
        if self.pending.get(&date).is_none() {
            if let Some(record) = self.record_for(date).cloned() {
                self.editor.sync_from_record(&record);
            }
        }
        true
    }

    /// Flip the completion of `date` everywhere it is shown: the grid
    /// overlay and, when it is the open day, the editor checkbox.
    pub fn begin_toggle(&mut self, date: CalendarDate) -> CompletionToggle {
        let completed = if self.editor_shows(date) {
            self.editor.toggle_completed()
        } else {
            !self.day_index().is_completed(date)
        };

        let commit = self.pending.begin(date, completed);
        CompletionToggle {
            date,
            completed,
            commit,
        }
    }

    /// Settle a toggle. On success, returns the ticket of the reload that
    /// must follow. Once no toggle for the date is in flight and the newest
    /// one failed, the grid and editor go back to the last accepted value.
    pub fn finish_toggle(
        &mut self,
        toggle: CompletionToggle,
        result: Result<&DayRecord, &ApiError>,
    ) -> Option<u64> {
        let date = toggle.date;
        let (settled, ticket) = match result {
            Ok(_) => {
                let ticket = self.next_reload_ticket();
                (self.pending.confirm(&date, toggle.commit, ticket), Some(ticket))
            }
            Err(_) => (self.pending.fail(&date, toggle.commit), None),
        };

        if self.editor_shows(date) {
            match settled {
                Settled::Pending => {}
                Settled::Kept(completed) | Settled::RolledBack(Some(completed)) => {
                    self.editor.accept_completed(completed)
                }
                Settled::RolledBack(None) => self.editor.rollback_completed(),
            }
        }
        ticket
    }

    fn editor_shows(&self, date: CalendarDate) -> bool {
        self.editor.date() == date && self.editor.mode() != EditorMode::Loading
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> App {
    let today = CalendarDate::from_ymd(2024, 3, 15).unwrap();
    App::new(today, "test")
}
