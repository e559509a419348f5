use super::*;
use crate::calendar::{MAX_YEAR, MIN_YEAR};

impl App {
    /// Select `date` and start loading its editor. The displayed year
    /// follows the selection. Returns false if the date was already open, or
    /// if the open day has a draft that is unsaved or still saving.
    pub fn select_date(&mut self, date: CalendarDate) -> bool {
        self.today = CalendarDate::today();
        if date == self.selected_date && self.editor.date() == date {
            self.current_year = date.year();
            return false;
        }
        if self.editor.holds_draft() {
            let message = match self.editor.mode() {
                EditorMode::Saving => "Still saving notes, wait before changing day",
                _ => "Save or cancel your edits before changing day",
            };
            self.set_status(message);
            return false;
        }
        self.current_year = date.year();
        self.selected_date = date;
        self.editor = DayEditor::loading(date);
        self.focus = Focus::Calendar;
        true
    }

    pub fn previous_year(&mut self) {
        self.today = CalendarDate::today();
        if self.current_year > MIN_YEAR {
            self.current_year -= 1;
        }
    }

    pub fn next_year(&mut self) {
        self.today = CalendarDate::today();
        if self.current_year < MAX_YEAR {
            self.current_year += 1;
        }
    }

    pub fn jump_to_today(&mut self) -> bool {
        self.select_date(CalendarDate::today())
    }

    /// Move by whole days: ±1 for left/right, ±7 for up/down.
    pub fn move_selection(&mut self, days: i64) -> bool {
        match self.selected_date.add_days(days) {
            Some(date) => self.select_date(date),
            None => false,
        }
    }

    /// Move by calendar months, clamping the day to the target month.
    pub fn move_selection_month(&mut self, months: i32) -> bool {
        match self.selected_date.add_months(months) {
            Some(date) => self.select_date(date),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn select_date_restarts_editor_loading() {
        let mut app = test_app();
        app.editor.finish_load(app.selected_date, Ok(None));

        assert!(app.select_date(date("2024-03-20")));
        assert_eq!(app.selected_date, date("2024-03-20"));
        assert_eq!(app.editor.date(), date("2024-03-20"));
        assert_eq!(app.editor.mode(), EditorMode::Loading);
    }

    #[test]
    fn reselecting_open_date_is_noop() {
        let mut app = test_app();
        let selected = app.selected_date;
        app.editor.finish_load(selected, Ok(None));
        assert!(!app.select_date(selected));
        assert_eq!(app.editor.mode(), EditorMode::Viewing);
    }

    #[test]
    fn saving_draft_pins_the_open_day() {
        let mut app = test_app();
        let today = app.selected_date;
        app.editor.finish_load(today, Ok(None));
        app.editor.begin_edit();
        app.editor.content.insert('z');
        app.editor.begin_save();

        assert!(!app.select_date(date("2024-03-20")));
        assert_eq!(app.selected_date, today);
        assert!(app.status_message.is_some());

        let err = crate::api::ApiError::Server {
            call: "PUT /api/days/{date}".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(app.editor.finish_save(today, Err(&err)));
        assert_eq!(app.editor.mode(), EditorMode::Editing);
        assert_eq!(app.editor.content.value, "z");
    }

    #[test]
    fn dirty_edit_blocks_moves_until_cancelled() {
        let mut app = test_app();
        let today = app.selected_date;
        app.editor.finish_load(today, Ok(None));
        app.editor.begin_edit();
        app.editor.content.insert('z');

        assert!(!app.move_selection(1));
        assert_eq!(app.editor.content.value, "z");

        app.editor.cancel_edit();
        assert!(app.move_selection(1));
        assert_eq!(app.selected_date, date("2024-03-16"));
    }

    #[test]
    fn selection_across_year_moves_displayed_year() {
        let mut app = test_app();
        app.select_date(date("2024-12-31"));
        assert!(app.move_selection(1));
        assert_eq!(app.selected_date, date("2025-01-01"));
        assert_eq!(app.current_year, 2025);

        assert!(app.move_selection(-7));
        assert_eq!(app.selected_date, date("2024-12-25"));
        assert_eq!(app.current_year, 2024);
    }

    #[test]
    fn year_navigation_keeps_selection() {
        let mut app = test_app();
        let selected = app.selected_date;
        app.previous_year();
        assert_eq!(app.current_year, 2023);
        app.next_year();
        app.next_year();
        assert_eq!(app.current_year, 2025);
        assert_eq!(app.selected_date, selected);
    }

    #[test]
    fn year_navigation_is_bounded() {
        let mut app = test_app();
        app.current_year = MAX_YEAR;
        app.next_year();
        assert_eq!(app.current_year, MAX_YEAR);
        app.current_year = MIN_YEAR;
        app.previous_year();
        assert_eq!(app.current_year, MIN_YEAR);
    }

    #[test]
    fn month_moves_clamp_day() {
        let mut app = test_app();
        app.select_date(date("2024-01-31"));
        assert!(app.move_selection_month(1));
        assert_eq!(app.selected_date, date("2024-02-29"));
        assert!(app.move_selection_month(-2));
        assert_eq!(app.selected_date, date("2023-12-29"));
        assert_eq!(app.current_year, 2023);
    }

    #[test]
    fn jump_to_today_resets_year_and_selection() {
        let mut app = test_app();
        app.select_date(date("1999-06-01"));
        app.jump_to_today();
        assert_eq!(app.selected_date, app.today);
        assert_eq!(app.current_year, app.today.year());
    }
}
