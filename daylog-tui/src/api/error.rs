use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a REST call. Every variant is handled the same way by the UI:
/// a network-or-server error, surfaced or logged depending on the call site.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL {0:?}")]
    InvalidUrl(String),
    #[error("failed to call {call}")]
    Network {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} returned {status}")]
    Server { call: String, status: StatusCode },
    #[error("failed to parse {call} response")]
    Decode {
        call: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Only used to tell "no record yet" apart on `GET /api/days/{date}`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Server {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}
