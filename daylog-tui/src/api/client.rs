use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::dev_backend::DevBackend;
use super::dto::CreateDayRequest;
use super::ApiError;
use crate::calendar::CalendarDate;
use crate::types::{DayPatch, DayRecord};

/// Client for the day-record REST API.
///
/// Cheap to clone; every background request runs on its own clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Trailing slash so endpoints join under any path prefix
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            dev_backend: None,
        })
    }

    /// Client served by an in-memory backend instead of HTTP.
    pub fn dev(backend: DevBackend) -> Result<Self, ApiError> {
        let base_url = Url::parse("http://localhost/")
            .map_err(|_| ApiError::InvalidUrl("http://localhost/".to_string()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            dev_backend: Some(backend),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Network {
            call: call_name.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let _ = response.bytes().await;
            return Err(ApiError::Server {
                call: call_name.to_string(),
                status,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode {
                call: call_name.to_string(),
                source,
            })
    }

    /// Fetch every stored day. Rows the client cannot read, such as a date
    /// that is not `YYYY-MM-DD`, are logged and skipped.
    pub async fn list_days(&self) -> Result<Vec<DayRecord>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list());
        }

        let rows: Vec<serde_json::Value> = self
            .get_json(self.client.get(self.endpoint("api/days")?), "GET /api/days")
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let date = row.get("date").cloned();
                match serde_json::from_value::<DayRecord>(row) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(date = ?date, error = %e, "skipping unreadable day record");
                        None
                    }
                }
            })
            .collect())
    }

    /// Fetch one day. A 404 means nothing was saved for that date yet.
    pub async fn get_day(&self, date: CalendarDate) -> Result<Option<DayRecord>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.get(date));
        }

        let result = self
            .get_json(
                self.client
                    .get(self.endpoint(&format!("api/days/{}", date))?),
                "GET /api/days/{date}",
            )
            .await;

        match result {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_day(&self, record: &DayRecord) -> Result<DayRecord, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create(record);
        }

        self.get_json(
            self.client
                .post(self.endpoint("api/days")?)
                .json(&CreateDayRequest {
                    date: record.date,
                    content: &record.content,
                    completed: record.completed,
                }),
            "POST /api/days",
        )
        .await
    }

    pub async fn update_day(
        &self,
        date: CalendarDate,
        patch: &DayPatch,
    ) -> Result<DayRecord, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update(date, patch);
        }

        self.get_json(
            self.client
                .put(self.endpoint(&format!("api/days/{}", date))?)
                .json(patch),
            "PUT /api/days/{date}",
        )
        .await
    }
}
