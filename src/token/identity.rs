//! Scoped token acquisition from an OpenStack identity (Keystone v3) endpoint.
//!
//! The exchange runs two sequential POSTs against the same URL: password
//! authentication for an unscoped token, then token authentication scoped to
//! a project. Both rounds read the token from the `X-Subject-Token` header.

use crate::api::{HttpMethod, RequestDescriptor};
use crate::client_defaults::USER_AGENT;
use crate::error::Error;
use crate::transport::{HttpTransport, Transport};
use log::{debug, warn};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

const DEFAULT_USER_DOMAIN: &str = "Default";
const DEFAULT_PROJECT_DOMAIN_ID: &str = "default";

fn identity_request(body: Value) -> RequestDescriptor {
    let mut headers = BTreeMap::new();
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    RequestDescriptor {
        method: HttpMethod::Post,
        path: String::new(),
        headers,
        query: None,
        body: Some(body),
    }
}

pub(crate) fn password_auth_body(user: &str, password: &str) -> Value {
    json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": user,
                        "domain": { "name": DEFAULT_USER_DOMAIN },
                        "password": password,
                    }
                }
            }
        }
    })
}

pub(crate) fn token_auth_body(unscoped_token: &str, project: &str) -> Value {
    json!({
        "auth": {
            "identity": {
                "methods": ["token"],
                "token": { "id": unscoped_token }
            },
            "scope": {
                "project": {
                    "domain": { "id": DEFAULT_PROJECT_DOMAIN_ID },
                    "name": project,
                }
            }
        }
    })
}

fn subject_token<T: Transport + ?Sized>(
    transport: &T,
    body: Value,
    round: &str,
) -> Result<Option<String>, Error> {
    let response = transport.send(&identity_request(body))?;
    match response.header(SUBJECT_TOKEN_HEADER) {
        Some(token) if !token.is_empty() => Ok(Some(token.to_string())),
        _ => {
            warn!(
                "identity service returned no {} header for the {} round (status {})",
                SUBJECT_TOKEN_HEADER, round, response.status
            );
            Ok(None)
        }
    }
}

/// Runs the two-round identity exchange through `transport`.
///
/// `transport` must address the identity endpoint itself (for example
/// `http://keystone:5000/v3/auth/tokens`); requests are sent with an empty
/// path. Returns `Ok(None)` when either round yields no token.
pub fn exchange_openstack_token<T: Transport + ?Sized>(
    transport: &T,
    user: &str,
    password: &str,
    project: &str,
) -> Result<Option<String>, Error> {
    let Some(unscoped) = subject_token(transport, password_auth_body(user, password), "unscoped")?
    else {
        return Ok(None);
    };
    debug!("obtained unscoped identity token for {user}");
    subject_token(transport, token_auth_body(&unscoped, project), "scoped")
}

/// Runs the identity exchange against `identity_url` with a default [`HttpTransport`].
pub fn obtain_openstack_token(
    identity_url: &str,
    user: &str,
    password: &str,
    project: &str,
) -> Result<Option<String>, Error> {
    let transport = HttpTransport::builder(identity_url)?.build()?;
    exchange_openstack_token(&transport, user, password, project)
}
