//! Cloud Clients
//!
//! Firebase Identity Toolkit and Firestore over their REST APIs.

mod auth;
mod firestore;
mod oauth;

pub use auth::{FirebaseAuth, Session};
pub use firestore::FirestoreRemote;
pub use oauth::{is_auth_popup, run_interactive_sign_in, take_redirect_result, InteractiveOutcome};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use two_tier_cache::CacheError;

pub type CloudResult<T> = Result<T, CloudError>;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Firebase API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Cloud sync is not configured")]
    NotConfigured,

    #[error("Not signed in")]
    NoSession,

    #[error("Sign-in popup was blocked")]
    PopupBlocked,

    #[error("Sign-in popup was closed")]
    PopupClosed,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Unexpected document: {0}")]
    Document(String),
}

impl From<CloudError> for CacheError {
    fn from(err: CloudError) -> Self {
        CacheError::Remote(err.to_string())
    }
}

/// Error body shared by the Google REST APIs
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Decode a successful response, or turn an error response into `CloudError::Api`
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> CloudResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> CloudError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());
    CloudError::Api { status, message }
}

/// Milliseconds since the epoch, browser clock
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_extracts_firebase_message() {
        let body = r#"{"error": {"code": 400, "message": "API_KEY_INVALID", "errors": []}}"#;
        match api_error(400, body) {
            CloudError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API_KEY_INVALID");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_unparseable() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Firebase API error 502: Bad Gateway");
    }

    #[test]
    fn test_cloud_error_maps_to_remote_cache_error() {
        let err: CacheError = CloudError::NoSession.into();
        assert_eq!(err, CacheError::Remote("Not signed in".to_string()));
    }
}
