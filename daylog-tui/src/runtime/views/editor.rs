use crate::app::{App, EditorMode, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

const SCROLL_STEP: u16 = 10;

pub(super) fn handle_editor_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.editor.mode() {
        EditorMode::Editing => handle_editing_key(key, app, action_tx),
        EditorMode::Viewing => handle_viewing_key(key, app, action_tx),
        // Wait for the request to finish; only allow leaving the panel.
        EditorMode::Loading | EditorMode::Saving => {
            if matches!(key.code, KeyCode::Tab | KeyCode::Esc) {
                app.focus = Focus::Calendar;
            }
        }
    }
}

fn toggle_open_day(app: &App, action_tx: &ActionTx) {
    enqueue_action(
        action_tx,
        Action::ToggleCompletion {
            date: app.editor.date(),
        },
    );
}

fn handle_editing_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => {
            enqueue_action(action_tx, Action::SaveDay);
        }
        KeyCode::Char('t') | KeyCode::Char('T') if ctrl => toggle_open_day(app, action_tx),
        KeyCode::Char('x') | KeyCode::Char('X') if ctrl => app.editor.content.clear(),
        KeyCode::Esc => {
            app.editor.cancel_edit();
            app.focus = Focus::Calendar;
        }
        KeyCode::Char(c) if !ctrl => app.editor.content.insert(c),
        KeyCode::Enter => app.editor.content.insert_newline(),
        KeyCode::Tab => {
            for _ in 0..4 {
                app.editor.content.insert(' ');
            }
        }
        KeyCode::Backspace => app.editor.content.backspace(),
        KeyCode::Delete => app.editor.content.delete(),
        KeyCode::Left => app.editor.content.move_left(),
        KeyCode::Right => app.editor.content.move_right(),
        KeyCode::Up => app.editor.content.move_up(),
        KeyCode::Down => app.editor.content.move_down(),
        KeyCode::Home => app.editor.content.home(),
        KeyCode::End => app.editor.content.end(),
        _ => {}
    }
}

fn handle_viewing_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let max_scroll = app.editor.content.value.lines().count() as u16;
    match key.code {
        KeyCode::Tab | KeyCode::Esc | KeyCode::Char('q') => {
            app.focus = Focus::Calendar;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.editor.begin_edit();
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_open_day(app, action_tx),
        KeyCode::PageDown => {
            app.editor.scroll = app.editor.scroll.saturating_add(SCROLL_STEP).min(max_scroll);
        }
        KeyCode::PageUp => {
            app.editor.scroll = app.editor.scroll.saturating_sub(SCROLL_STEP);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.editor.scroll = app.editor.scroll.saturating_add(1).min(max_scroll);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.editor.scroll = app.editor.scroll.saturating_sub(1);
        }
        _ => {}
    }
}
