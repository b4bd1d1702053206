use crate::error::{parse_error_from_body, Error};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Raw result of a call as reported by the transport.
///
/// Header names are stored lower-cased; use [`ResponseDescriptor::header`]
/// for case-insensitive lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseDescriptor {
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(Error::from)
    }

    /// Returns `self` for 2xx responses, otherwise the API error carried by the body.
    pub fn error_for_status(&self) -> Result<&Self, Error> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(parse_error_from_body(self.status, self.body.as_bytes()))
        }
    }
}
