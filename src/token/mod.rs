mod identity;
mod role_token;

pub use identity::{exchange_openstack_token, obtain_openstack_token, SUBJECT_TOKEN_HEADER};
pub use role_token::{RoleToken, RoleTokenList};

use crate::api::{ApiContext, AuthToken, Completed, HttpMethod, Resource, Route};
use crate::error::{require_non_empty, Error};
use crate::models::TokenResponse;
use serde_json::json;

pub(crate) const TOKEN_BASE_PATH: &str = "user/tokens";

/// User name and pass phrase for a credential-based token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

/// Operations of the user token API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    /// `POST` (body) or `PUT` (query) `user/tokens`.
    Create {
        credentials: Option<PasswordCredentials>,
    },
    /// `GET user/tokens`.
    Show,
    /// `HEAD user/tokens`.
    Validate,
}

/// Entry point for the user token API of one tenant.
#[derive(Debug, Clone)]
pub struct TokenApi {
    context: ApiContext,
    tenant: String,
}

impl TokenApi {
    /// Authenticates with an IaaS (OpenStack) token, sent as `x-auth-token: U=<token>`.
    pub fn new(tenant: impl Into<String>, iaas_token: impl AsRef<str>) -> Result<Self, Error> {
        let token = iaas_token.as_ref();
        require_non_empty("iaas_token", token)?;
        Self::with_auth(tenant.into(), AuthToken::Scoped(token.to_string()))
    }

    /// Authenticates with user credentials carried in the request itself.
    pub fn with_credentials(tenant: impl Into<String>) -> Result<Self, Error> {
        Self::with_auth(tenant.into(), AuthToken::None)
    }

    fn with_auth(tenant: String, auth: AuthToken) -> Result<Self, Error> {
        require_non_empty("tenant", &tenant)?;
        Ok(Self {
            context: ApiContext::new(TOKEN_BASE_PATH, &auth),
            tenant,
        })
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Requests a scoped token. Credentials are used only when both user
    /// and password are present and non-empty.
    pub fn create(&self, user: Option<&str>, password: Option<&str>) -> Token {
        let credentials = match (user, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some(PasswordCredentials {
                username: u.to_string(),
                password: p.to_string(),
            }),
            _ => None,
        };
        self.build(TokenCall::Create { credentials })
    }

    pub fn show(&self) -> Token {
        self.build(TokenCall::Show)
    }

    pub fn validate(&self) -> Token {
        self.build(TokenCall::Validate)
    }

    fn build(&self, call: TokenCall) -> Token {
        Token {
            context: self.context.clone(),
            tenant: self.tenant.clone(),
            call,
        }
    }
}

/// A user token request.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    context: ApiContext,
    tenant: String,
    call: TokenCall,
}

impl Token {
    pub fn call(&self) -> &TokenCall {
        &self.call
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }
}

impl Resource for Token {
    const KIND: &'static str = "token";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        let path = self.context.path(&[]);
        match (&self.call, method) {
            (TokenCall::Create { credentials }, HttpMethod::Post) => {
                let body = match credentials {
                    Some(c) => json!({
                        "auth": {
                            "tenantName": self.tenant,
                            "passwordCredentials": {
                                "username": c.username,
                                "password": c.password,
                            }
                        }
                    }),
                    None => json!({ "auth": { "tenantName": self.tenant } }),
                };
                Some(Route::new(path).with_body(body))
            }
            (TokenCall::Create { credentials }, HttpMethod::Put) => {
                let query = match credentials {
                    Some(c) => json!({
                        "user": c.username,
                        "password": c.password,
                        "tenantname": self.tenant,
                    }),
                    None => json!({ "tenantname": self.tenant }),
                };
                Some(Route::new(path).with_query(query))
            }
            (TokenCall::Show, HttpMethod::Get) | (TokenCall::Validate, HttpMethod::Head) => {
                Some(Route::new(path))
            }
            _ => None,
        }
    }
}

pub(crate) fn token_from_body(body: &TokenResponse) -> Option<String> {
    body.token.clone().filter(|t| !t.is_empty())
}

impl Completed<Token> {
    /// The `token` issued by a create call, if the body carries one.
    pub fn token(&self) -> Result<Option<String>, Error> {
        let body: TokenResponse = self.json()?;
        Ok(token_from_body(&body))
    }
}

#[cfg(test)]
mod tests;
