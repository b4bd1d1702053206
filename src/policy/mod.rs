use crate::api::{ApiContext, AuthToken, HttpMethod, Resource, Route};
use crate::error::{require_non_empty, Error};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub(crate) const POLICY_BASE_PATH: &str = "policy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of a policy create call.
///
/// `condition` is accepted for completeness but the K2HR3 policy API does not
/// take it: POST always sends `"condition": null` and PUT omits the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDefinition {
    pub name: String,
    pub effect: Effect,
    pub action: Vec<String>,
    pub resource: Option<Vec<String>>,
    pub condition: Option<String>,
    pub alias: Option<Vec<String>>,
}

impl PolicyDefinition {
    pub fn new<I, S>(name: impl Into<String>, effect: Effect, action: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            effect,
            action: action.into_iter().map(Into::into).collect(),
            resource: None,
            condition: None,
            alias: None,
        }
    }

    pub fn resource<I, S>(mut self, resource: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource = Some(resource.into_iter().map(Into::into).collect());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn alias<I, S>(mut self, alias: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias = Some(alias.into_iter().map(Into::into).collect());
        self
    }
}

/// Operations of the policy API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyCall {
    /// `POST` (body) or `PUT` (query) `policy`.
    Create(PolicyDefinition),
    /// `GET policy/{name}?service=...`
    Get {
        name: String,
        service: Option<String>,
    },
    /// `HEAD policy/{name}?tenant=...&resource=...&action=...&service=...`
    Validate {
        name: String,
        tenant: String,
        resource: String,
        action: String,
        service: Option<String>,
    },
    /// `DELETE policy/{name}`
    Delete { name: String },
}

/// Entry point for the policy API.
#[derive(Debug, Clone)]
pub struct PolicyApi {
    context: ApiContext,
}

impl PolicyApi {
    /// Scoped user token (`U=`); `None` or an empty token sends no auth header.
    pub fn new(r3token: Option<&str>) -> Self {
        Self {
            context: ApiContext::new(POLICY_BASE_PATH, &AuthToken::scoped(r3token)),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn create(&self, definition: PolicyDefinition) -> Result<Policy, Error> {
        require_non_empty("policy_name", &definition.name)?;
        Ok(self.build(PolicyCall::Create(definition)))
    }

    pub fn get(&self, name: impl Into<String>, service: Option<&str>) -> Result<Policy, Error> {
        let name = name.into();
        require_non_empty("policy_name", &name)?;
        Ok(self.build(PolicyCall::Get {
            name,
            service: service.map(str::to_owned),
        }))
    }

    pub fn validate(
        &self,
        name: impl Into<String>,
        tenant: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
        service: Option<&str>,
    ) -> Result<Policy, Error> {
        let name = name.into();
        let tenant = tenant.into();
        require_non_empty("policy_name", &name)?;
        require_non_empty("tenant", &tenant)?;
        Ok(self.build(PolicyCall::Validate {
            name,
            tenant,
            resource: resource.into(),
            action: action.into(),
            service: service.map(str::to_owned),
        }))
    }

    pub fn delete(&self, name: impl Into<String>) -> Result<Policy, Error> {
        let name = name.into();
        require_non_empty("policy_name", &name)?;
        Ok(self.build(PolicyCall::Delete { name }))
    }

    fn build(&self, call: PolicyCall) -> Policy {
        Policy {
            context: self.context.clone(),
            call,
        }
    }
}

/// A policy API request.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    context: ApiContext,
    call: PolicyCall,
}

impl Policy {
    pub fn call(&self) -> &PolicyCall {
        &self.call
    }
}

impl Resource for Policy {
    const KIND: &'static str = "policy";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        match (&self.call, method) {
            (PolicyCall::Create(def), HttpMethod::Post) => {
                warn_dropped_condition(def);
                let body = json!({
                    "policy": {
                        "name": def.name,
                        "effect": def.effect,
                        "action": def.action,
                        "resource": def.resource,
                        "condition": null,
                        "alias": def.alias,
                    }
                });
                Some(Route::new(self.context.path(&[])).with_body(body))
            }
            (PolicyCall::Create(def), HttpMethod::Put) => {
                warn_dropped_condition(def);
                let query = json!({
                    "name": def.name,
                    "effect": def.effect,
                    "action": def.action,
                    "resource": def.resource,
                    "alias": def.alias,
                });
                Some(Route::new(self.context.path(&[])).with_query(query))
            }
            (PolicyCall::Get { name, service }, HttpMethod::Get) => Some(
                Route::new(self.context.path(&[name.as_str()])).with_query(json!({ "service": service })),
            ),
            (
                PolicyCall::Validate {
                    name,
                    tenant,
                    resource,
                    action,
                    service,
                },
                HttpMethod::Head,
            ) => Some(Route::new(self.context.path(&[name.as_str()])).with_query(json!({
                "tenant": tenant,
                "resource": resource,
                "action": action,
                "service": service,
            }))),
            (PolicyCall::Delete { name }, HttpMethod::Delete) => {
                Some(Route::new(self.context.path(&[name.as_str()])))
            }
            _ => None,
        }
    }
}

fn warn_dropped_condition(def: &PolicyDefinition) {
    if def.condition.is_some() {
        warn!(
            "policy {}: condition is not accepted by the policy API and is not sent",
            def.name
        );
    }
}
