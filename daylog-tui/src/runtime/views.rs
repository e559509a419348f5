use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod calendar;
mod editor;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Queue a load for the editor after the selection moved.
fn load_selected_day(app: &App, action_tx: &ActionTx) {
    enqueue_action(
        action_tx,
        Action::LoadDay {
            date: app.selected_date,
        },
    );
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Any key dismisses the alert overlay
    if app.alert.is_some() {
        app.dismiss_alert();
        return;
    }

    match app.focus {
        Focus::Calendar => calendar::handle_calendar_key(key, app, action_tx),
        Focus::Editor => editor::handle_editor_key(key, app, action_tx),
    }
}
