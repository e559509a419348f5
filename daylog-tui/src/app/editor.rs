use crate::api::ApiError;
use crate::calendar::CalendarDate;
use crate::types::{DayPatch, DayRecord};

use super::state::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Loading,
    Viewing,
    Editing,
    /// Waiting for the save call; falls back to `Editing` on failure.
    Saving,
}

/// Notes and completion flag of the selected day.
#[derive(Debug, Clone)]
pub struct DayEditor {
    date: CalendarDate,
    mode: EditorMode,
    pub content: TextArea,
    completed: bool,
    /// Completion as the server last reported or accepted it.
    accepted_completed: bool,
    /// Content as last loaded or saved, restored when an edit is cancelled.
    saved_content: String,
    updated_at: Option<String>,
    pub error: Option<String>,
    pub scroll: u16,
}

impl DayEditor {
    pub fn loading(date: CalendarDate) -> Self {
        Self {
            date,
            mode: EditorMode::Loading,
            content: TextArea::new(),
            completed: false,
            accepted_completed: false,
            saved_content: String::new(),
            updated_at: None,
            error: None,
            scroll: 0,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.content.value != self.saved_content
    }

    /// True while there is text the server has not stored yet: a changed
    /// draft, or one that is being saved.
    pub fn holds_draft(&self) -> bool {
        match self.mode {
            EditorMode::Saving => true,
            EditorMode::Editing => self.is_dirty(),
            EditorMode::Loading | EditorMode::Viewing => false,
        }
    }

    /// Apply the result of fetching this editor's day. Any failure leaves
    /// an empty, incomplete day. Returns false for a result that belongs to
    /// another date or arrives outside `Loading`.
    pub fn finish_load(
        &mut self,
        date: CalendarDate,
        result: Result<Option<DayRecord>, &ApiError>,
    ) -> bool {
        if date != self.date || self.mode != EditorMode::Loading {
            return false;
        }
        let record = result.ok().flatten().unwrap_or_else(|| DayRecord::empty(date));
        self.apply_record(&record);
        self.mode = EditorMode::Viewing;
        true
    }

    pub fn begin_edit(&mut self) -> bool {
        if self.mode != EditorMode::Viewing {
            return false;
        }
        self.mode = EditorMode::Editing;
        self.error = None;
        self.content.cursor = self.content.value.len();
        true
    }

    /// Drop local changes and go back to viewing.
    pub fn cancel_edit(&mut self) -> bool {
        if self.mode != EditorMode::Editing {
            return false;
        }
        self.content = TextArea::from_str(&self.saved_content);
        self.error = None;
        self.mode = EditorMode::Viewing;
        true
    }

    /// Enter `Saving` and return the update to send.
    pub fn begin_save(&mut self) -> Option<DayPatch> {
        if self.mode != EditorMode::Editing {
            return None;
        }
        self.mode = EditorMode::Saving;
        self.error = None;
        Some(DayPatch::full(self.content.value.clone(), self.completed))
    }

    /// On success the editor shows the saved content; on failure it stays
    /// editable with the user's text untouched.
    pub fn finish_save(&mut self, date: CalendarDate, result: Result<&DayRecord, &ApiError>) -> bool {
        if date != self.date || self.mode != EditorMode::Saving {
            return false;
        }
        match result {
            Ok(record) => {
                self.saved_content = self.content.value.clone();
                self.updated_at = record.updated_at.clone();
                self.accepted_completed = record.completed;
                self.mode = EditorMode::Viewing;
            }
            Err(e) => {
                self.error = Some(format!("Failed to save: {}", e));
                self.mode = EditorMode::Editing;
            }
        }
        true
    }

    /// Flip the completion flag locally ahead of the server call.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// The server took `completed` for this day.
    pub fn accept_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.accepted_completed = completed;
    }

    /// Every toggle in flight was rejected; show the last accepted value.
    pub fn rollback_completed(&mut self) {
        self.completed = self.accepted_completed;
    }

    /// Take a reloaded record when it differs from what is shown, unless the
    /// user is busy editing or saving.
    pub fn sync_from_record(&mut self, record: &DayRecord) -> bool {
        if record.date != self.date || self.mode != EditorMode::Viewing {
            return false;
        }
        if record.updated_at == self.updated_at && record.completed == self.completed {
            return false;
        }
        self.apply_record(record);
        true
    }

    fn apply_record(&mut self, record: &DayRecord) {
        self.content = TextArea::from_str(&record.content);
        self.saved_content = record.content.clone();
        self.completed = record.completed;
        self.accepted_completed = record.completed;
        self.updated_at = record.updated_at.clone();
    }
}
