use crate::api::ApiClient;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::{channel, outcome_channel};
use super::actions::{apply_outcome, run_action};
use super::views::handle_view_key;

/// Draw, read one key, apply finished requests, start queued ones.
/// Returns only on quit or a terminal I/O failure.
pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (outcome_tx, mut outcome_rx) = outcome_channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(outcome) = outcome_rx.try_recv() {
            apply_outcome(outcome, app, &action_tx);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client, &outcome_tx);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
