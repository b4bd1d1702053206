use serde::{Deserialize, Serialize};
use std::fmt;

/// Error payload returned by the K2HR3 API (`{"result":false,"message":"..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiError {
    pub code: u16,
    pub result: bool,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "code={}", self.code)
        } else {
            write!(f, "code={}, message={}", self.code, self.message)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("missing key in response body: {0}")]
    MissingKey(String),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("k2hr3 api error: {0}")]
    Api(ApiError),
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn fallback_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("http status {status}"))
}

pub(crate) fn parse_error_from_body(status: u16, body: &[u8]) -> Error {
    let fallback = fallback_message(status, body);
    let mut err = serde_json::from_slice::<ApiError>(body).unwrap_or_else(|_| ApiError {
        code: status,
        result: false,
        message: fallback.clone(),
    });
    err.code = status;
    if err.message.trim().is_empty() {
        err.message = fallback;
    }
    Error::Api(err)
}
