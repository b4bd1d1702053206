use super::token_from_body;
use crate::api::{ApiContext, AuthToken, Completed, HttpMethod, Resource, Route};
use crate::error::{require_non_empty, Error};
use crate::models::{RoleTokenListResponse, TokenResponse};
use serde_json::{json, Value};

const ROLE_TOKEN_BASE_PATH: &str = "role/token";
const ROLE_TOKEN_LIST_BASE_PATH: &str = "role/token/list";

/// Issues a role token for `role`: `GET {version}/role/token/{role}?expire=N`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleToken {
    context: ApiContext,
    role: String,
    expire: u64,
}

impl RoleToken {
    /// `expire` is the requested lifetime in seconds.
    pub fn new(r3token: impl AsRef<str>, role: impl Into<String>, expire: u64) -> Result<Self, Error> {
        let r3token = r3token.as_ref();
        let role = role.into();
        require_non_empty("r3token", r3token)?;
        require_non_empty("role", &role)?;
        Ok(Self {
            context: ApiContext::new(ROLE_TOKEN_BASE_PATH, &AuthToken::Scoped(r3token.to_string())),
            role,
            expire,
        })
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn expire(&self) -> u64 {
        self.expire
    }
}

impl Resource for RoleToken {
    const KIND: &'static str = "role token";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        match method {
            HttpMethod::Get => Some(
                Route::new(self.context.path(&[self.role.as_str()]))
                    .with_query(json!({ "expire": self.expire })),
            ),
            _ => None,
        }
    }
}

impl Completed<RoleToken> {
    /// The issued role token.
    pub fn token(&self) -> Result<Option<String>, Error> {
        let body: TokenResponse = self.json()?;
        Ok(token_from_body(&body))
    }
}

/// Lists the role tokens of `role`: `GET {version}/role/token/list/{role}?expand=B`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleTokenList {
    context: ApiContext,
    role: String,
    expand: bool,
}

impl RoleTokenList {
    pub fn new(r3token: impl AsRef<str>, role: impl Into<String>, expand: bool) -> Result<Self, Error> {
        let r3token = r3token.as_ref();
        let role = role.into();
        require_non_empty("r3token", r3token)?;
        require_non_empty("role", &role)?;
        Ok(Self {
            context: ApiContext::new(
                ROLE_TOKEN_LIST_BASE_PATH,
                &AuthToken::Scoped(r3token.to_string()),
            ),
            role,
            expand,
        })
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn expand(&self) -> bool {
        self.expand
    }
}

impl Resource for RoleTokenList {
    const KIND: &'static str = "role token list";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        match method {
            HttpMethod::Get => Some(
                Route::new(self.context.path(&[self.role.as_str()]))
                    .with_query(json!({ "expand": self.expand })),
            ),
            _ => None,
        }
    }
}

/// Looks up `tokens.<roletoken>.registerpath` in a role token list body.
pub(crate) fn registerpath_from_body(body: &Value, roletoken: &str) -> Result<String, Error> {
    body.get("tokens")
        .and_then(|tokens| tokens.get(roletoken))
        .and_then(|entry| entry.get("registerpath"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingKey(format!("tokens.{roletoken}.registerpath")))
}

impl Completed<RoleTokenList> {
    /// Registration path of `roletoken`; a token absent from the list is
    /// reported as [`Error::MissingKey`].
    pub fn registerpath(&self, roletoken: &str) -> Result<String, Error> {
        let body: Value = self.json()?;
        registerpath_from_body(&body, roletoken)
    }

    /// All listed tokens. Only available for `expand = true` listings, where
    /// the server reports each token as an object.
    pub fn role_tokens(&self) -> Result<RoleTokenListResponse, Error> {
        self.json()
    }
}
