use crate::api::ApiClient;
use crate::app::App;
use tracing::{info, warn};

/// Fetch the day list and the selected day before the first frame. Failures
/// leave an empty calendar and an empty editor; the UI still starts.
pub async fn initialize_app_state(app: &mut App, client: &ApiClient) {
    let date = app.selected_date;
    let (days, day) = tokio::join!(client.list_days(), client.get_day(date));

    match days {
        Ok(records) => {
            info!(count = records.len(), "loaded day records");
            let ticket = app.next_reload_ticket();
            app.replace_days(records, ticket);
        }
        Err(e) => {
            warn!(error = %e, "could not load day records");
            app.set_status(format!("Could not reach {} (press r to retry)", app.source_label));
        }
    }

    if let Err(e) = &day {
        warn!(date = %date, error = %e, "could not load selected day");
    }
    app.editor.finish_load(date, day.as_ref().cloned());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::app::{test_app, EditorMode};

    #[tokio::test]
    async fn loads_days_and_open_editor() {
        let mut app = test_app();
        let client = ApiClient::dev(DevBackend::seeded(app.today)).unwrap();

        initialize_app_state(&mut app, &client).await;
        assert_eq!(app.days().len(), 4);
        assert_eq!(app.editor.mode(), EditorMode::Viewing);
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn unreachable_api_still_opens_editor() {
        let server = wiremock::MockServer::start().await;
        let mut app = test_app();
        let client = ApiClient::new(&server.uri()).unwrap();

        // No mocks mounted: every call is a 404
        initialize_app_state(&mut app, &client).await;
        assert!(app.days().is_empty());
        assert!(app.status_message.is_some());
        assert_eq!(app.editor.mode(), EditorMode::Viewing);
        assert_eq!(app.editor.content.value, "");
    }
}
