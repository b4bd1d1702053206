use crate::client_defaults::DEFAULT_API_VERSION;
use std::collections::BTreeMap;

pub(crate) const AUTH_HEADER: &str = "x-auth-token";
pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";

/// Token presented in the `x-auth-token` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthToken {
    /// Scoped user token, sent as `U=<token>`.
    Scoped(String),
    /// Role token, sent as `R=<token>`.
    Role(String),
    /// No token; the header is omitted.
    None,
}

impl AuthToken {
    /// Scoped token when `token` is present and non-empty, otherwise [`AuthToken::None`].
    pub fn scoped(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => AuthToken::Scoped(t.to_string()),
            _ => AuthToken::None,
        }
    }

    /// True for a non-empty scoped user token.
    pub fn is_scoped(&self) -> bool {
        matches!(self, AuthToken::Scoped(token) if !token.is_empty())
    }

    /// Header value, or `None` for [`AuthToken::None`] and empty tokens.
    fn header_value(&self) -> Option<String> {
        match self {
            AuthToken::Scoped(token) if !token.is_empty() => Some(format!("U={token}")),
            AuthToken::Role(token) if !token.is_empty() => Some(format!("R={token}")),
            _ => None,
        }
    }
}

/// State shared by every resource request: API version, base path and headers.
///
/// Headers are computed once from the auth token and never change afterwards.
/// Custom [`Resource`](crate::Resource) implementations build one with
/// [`ApiContext::new`] and join their paths with [`ApiContext::path`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiContext {
    version: String,
    base_path: &'static str,
    headers: BTreeMap<String, String>,
}

impl ApiContext {
    pub fn new(base_path: &'static str, auth: &AuthToken) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        if let Some(value) = auth.header_value() {
            headers.insert(AUTH_HEADER.to_string(), value);
        }
        Self {
            version: DEFAULT_API_VERSION.to_string(),
            base_path,
            headers,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_path(&self) -> &'static str {
        self.base_path
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// `{version}/{base_path}[/{segment}...]`
    pub fn path(&self, segments: &[&str]) -> String {
        let mut path = format!("{}/{}", self.version, self.base_path);
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}
