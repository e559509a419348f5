use crate::app::{App, EditorMode, Focus};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, load_selected_day};

pub(super) fn handle_calendar_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let moved = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(7),
        KeyCode::Char('{') => app.move_selection_month(-1),
        KeyCode::Char('}') => app.move_selection_month(1),
        KeyCode::Char('[') => {
            app.previous_year();
            false
        }
        KeyCode::Char(']') => {
            app.next_year();
            false
        }
        KeyCode::Char('t') | KeyCode::Char('T') => app.jump_to_today(),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            enqueue_action(
                action_tx,
                Action::ToggleCompletion {
                    date: app.selected_date,
                },
            );
            false
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            match app.editor.mode() {
                EditorMode::Loading => app.set_status("Day is still loading"),
                EditorMode::Saving => app.set_status("Still saving notes"),
                EditorMode::Viewing | EditorMode::Editing => {
                    app.editor.begin_edit();
                    app.focus = Focus::Editor;
                }
            }
            false
        }
        KeyCode::Tab => {
            app.focus = Focus::Editor;
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(action_tx, Action::ReloadDays);
            false
        }
        _ => false,
    };

    if moved {
        load_selected_day(app, action_tx);
    }
}
