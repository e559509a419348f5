use crate::api::ApiClient;
use crate::app::App;
use crate::types::DayPatch;
use std::future::Future;
use tracing::{debug, error, info, warn};

use super::action_queue::{Action, ActionTx, Outcome, OutcomeTx};

/// Start the request behind `action`. The response comes back later as an
/// `Outcome` on `outcome_tx`; nothing here waits on the network.
pub(super) fn run_action(action: Action, app: &mut App, client: &ApiClient, outcome_tx: &OutcomeTx) {
    match action {
        Action::ReloadDays => {
            let ticket = app.next_reload_ticket();
            debug!(ticket, "reloading day list");
            let client = client.clone();
            spawn_request(app, outcome_tx, async move {
                Outcome::DaysLoaded {
                    ticket,
                    result: client.list_days().await,
                }
            });
        }
        Action::LoadDay { date } => {
            debug!(date = %date, "loading day");
            let client = client.clone();
            spawn_request(app, outcome_tx, async move {
                Outcome::DayLoaded {
                    date,
                    result: client.get_day(date).await,
                }
            });
        }
        Action::SaveDay => {
            let Some(patch) = app.editor.begin_save() else {
                return;
            };
            let date = app.editor.date();
            info!(date = %date, "saving day");
            let client = client.clone();
            spawn_request(app, outcome_tx, async move {
                Outcome::DaySaved {
                    date,
                    result: client.update_day(date, &patch).await,
                }
            });
        }
        Action::ToggleCompletion { date } => {
            let toggle = app.begin_toggle(date);
            info!(date = %date, completed = toggle.completed, "toggling completion");
            let patch = DayPatch::completion(toggle.completed);
            let client = client.clone();
            spawn_request(app, outcome_tx, async move {
                let result = client.update_day(date, &patch).await;
                Outcome::CompletionSaved { toggle, result }
            });
        }
    }
}

fn spawn_request<F>(app: &mut App, outcome_tx: &OutcomeTx, request: F)
where
    F: Future<Output = Outcome> + Send + 'static,
{
    app.in_flight += 1;
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let _ = outcome_tx.send(request.await);
    });
}

/// Fold a finished request into `App`. Successful writes queue a reload of
/// the day list.
pub(super) fn apply_outcome(outcome: Outcome, app: &mut App, action_tx: &ActionTx) {
    app.in_flight = app.in_flight.saturating_sub(1);

    match outcome {
        Outcome::DaysLoaded { ticket, result } => match result {
            Ok(records) => {
                if !app.replace_days(records, ticket) {
                    debug!(ticket, "dropping stale day list");
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to reload day list, keeping previous data");
                app.set_status("Could not refresh days, showing last loaded data");
            }
        },
        Outcome::DayLoaded { date, result } => {
            if let Err(e) = &result {
                warn!(date = %date, error = %e, "failed to load day, showing it empty");
            }
            if !app.editor.finish_load(date, result.as_ref().cloned()) {
                debug!(date = %date, "dropping stale day load");
            }
        }
        Outcome::DaySaved { date, result } => {
            app.editor.finish_save(date, result.as_ref());
            match result {
                Ok(_) => {
                    app.set_status(format!("Saved {}", date));
                    let _ = action_tx.send(Action::ReloadDays);
                }
                Err(e) => {
                    error!(date = %date, error = %e, "failed to save day");
                    app.show_alert(format!("Failed to save notes for {}.\n\n{}", date, e));
                }
            }
        }
        Outcome::CompletionSaved { toggle, result } => {
            let date = toggle.date;
            if let Err(e) = &result {
                warn!(date = %date, error = %e, "failed to toggle completion, reverting");
            }
            if app.finish_toggle(toggle, result.as_ref()).is_some() {
                let _ = action_tx.send(Action::ReloadDays);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::action_queue::{channel, outcome_channel};
    use super::*;
    use crate::api::DevBackend;
    use crate::app::{test_app, EditorMode};
    use crate::calendar::CalendarDate;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    async fn run_and_apply(action: Action, app: &mut App, client: &ApiClient) -> Vec<Action> {
        let (action_tx, mut action_rx) = channel();
        let (outcome_tx, mut outcome_rx) = outcome_channel();
        run_action(action, app, client, &outcome_tx);
        let outcome = outcome_rx.recv().await.unwrap();
        apply_outcome(outcome, app, &action_tx);

        let mut queued = Vec::new();
        while let Ok(action) = action_rx.try_recv() {
            queued.push(action);
        }
        queued
    }

    #[tokio::test]
    async fn toggle_success_queues_reload() {
        let backend = DevBackend::new();
        let client = ApiClient::dev(backend.clone()).unwrap();
        let mut app = test_app();
        let d = date("2024-03-15");

        let queued = run_and_apply(Action::ToggleCompletion { date: d }, &mut app, &client).await;
        assert_eq!(queued, vec![Action::ReloadDays]);
        assert!(backend.get(d).unwrap().completed);
        assert!(app.day_index().is_completed(d));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn toggle_failure_reverts_without_alert() {
        let backend = DevBackend::new();
        backend.set_fail_writes(true);
        let client = ApiClient::dev(backend).unwrap();
        let mut app = test_app();
        let d = date("2024-03-15");

        let queued = run_and_apply(Action::ToggleCompletion { date: d }, &mut app, &client).await;
        assert!(queued.is_empty());
        assert!(!app.day_index().is_completed(d));
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn save_failure_alerts_and_keeps_edits() {
        let backend = DevBackend::new();
        backend.set_fail_writes(true);
        let client = ApiClient::dev(backend).unwrap();
        let mut app = test_app();
        let today = app.today;
        app.editor.finish_load(today, Ok(None));
        app.editor.begin_edit();
        app.editor.content.insert('a');

        let queued = run_and_apply(Action::SaveDay, &mut app, &client).await;
        assert!(queued.is_empty());
        assert_eq!(app.editor.mode(), EditorMode::Editing);
        assert_eq!(app.editor.content.value, "a");
        assert!(app.alert.is_some());
    }

    #[tokio::test]
    async fn save_success_writes_content_and_reloads() {
        let backend = DevBackend::new();
        let client = ApiClient::dev(backend.clone()).unwrap();
        let mut app = test_app();
        let today = app.today;
        app.editor.finish_load(today, Ok(None));
        app.editor.begin_edit();
        app.editor.content.insert('a');

        let queued = run_and_apply(Action::SaveDay, &mut app, &client).await;
        assert_eq!(queued, vec![Action::ReloadDays]);
        assert_eq!(app.editor.mode(), EditorMode::Viewing);
        assert_eq!(backend.get(today).unwrap().content, "a");
    }

    #[test]
    fn save_outside_editing_does_nothing() {
        let client = ApiClient::dev(DevBackend::new()).unwrap();
        let mut app = test_app();
        let (outcome_tx, mut outcome_rx) = outcome_channel();
        run_action(Action::SaveDay, &mut app, &client, &outcome_tx);
        assert!(!app.is_loading());
        assert!(outcome_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn load_day_fills_editor() {
        let backend = DevBackend::seeded(date("2024-03-15"));
        let client = ApiClient::dev(backend).unwrap();
        let mut app = test_app();
        app.select_date(date("2024-03-09"));

        run_and_apply(Action::LoadDay { date: date("2024-03-09") }, &mut app, &client).await;
        assert_eq!(app.editor.mode(), EditorMode::Viewing);
        assert!(app.editor.completed());
        assert!(app.editor.content.value.starts_with("# Networking"));
    }

    #[tokio::test]
    async fn reload_replaces_day_list() {
        let backend = DevBackend::seeded(date("2024-03-15"));
        let client = ApiClient::dev(backend).unwrap();
        let mut app = test_app();

        run_and_apply(Action::ReloadDays, &mut app, &client).await;
        assert_eq!(app.days().len(), 4);
        assert!(app.day_index().is_completed(date("2024-03-14")));
    }

    #[tokio::test]
    async fn reload_failure_keeps_stale_list() {
        let mut app = test_app();
        let (action_tx, _action_rx) = channel();
        let (outcome_tx, mut outcome_rx) = outcome_channel();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/days"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri()).unwrap();
        run_action(Action::ReloadDays, &mut app, &client, &outcome_tx);
        let outcome = outcome_rx.recv().await.unwrap();
        apply_outcome(outcome, &mut app, &action_tx);

        assert!(app.days().is_empty());
        assert!(app.status_message.is_some());
        assert!(app.alert.is_none());
    }
}
