use crate::api::{ApiContext, AuthToken, HttpMethod, Resource, Route};
use crate::error::{require_non_empty, Error};
use crate::models::RoleHost;
use serde_json::{json, Value};

pub(crate) const ROLE_BASE_PATH: &str = "role";

/// Operations of the role API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCall {
    Create {
        name: String,
        policies: Vec<String>,
        alias: Vec<String>,
    },
    AddMember {
        name: String,
        host: RoleHost,
        clear_hostname: bool,
        clear_ips: bool,
    },
    AddMembers {
        name: String,
        hosts: Vec<RoleHost>,
        clear_hostname: bool,
        clear_ips: bool,
    },
    /// Registers the calling host itself; authenticated by a role token,
    /// so the host name is taken from the connection.
    AddMemberWithRoleToken {
        name: String,
        host: RoleHost,
    },
    Get {
        name: String,
        expand: bool,
    },
    TokenList {
        name: String,
        expand: bool,
    },
    Validate {
        name: String,
    },
    Delete {
        name: String,
    },
    DeleteMember {
        name: String,
        host: String,
        port: String,
        cuk: String,
    },
    DeleteMemberWithoutRole {
        cuk: String,
    },
    DeleteRoleToken {
        name: String,
        port: String,
        cuk: String,
    },
    DeleteRoleTokenString {
        token: String,
    },
}

/// Entry point for the role API.
#[derive(Debug, Clone)]
pub struct RoleApi {
    context: ApiContext,
}

impl RoleApi {
    pub fn new(auth: AuthToken) -> Self {
        Self {
            context: ApiContext::new(ROLE_BASE_PATH, &auth),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn create<P, A, S, T>(&self, name: impl Into<String>, policies: P, alias: A) -> Result<Role, Error>
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let name = named(name)?;
        Ok(self.build(RoleCall::Create {
            name,
            policies: policies.into_iter().map(Into::into).collect(),
            alias: alias.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn add_member(
        &self,
        name: impl Into<String>,
        host: RoleHost,
        clear_hostname: bool,
        clear_ips: bool,
    ) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::AddMember {
            name,
            host,
            clear_hostname,
            clear_ips,
        }))
    }

    pub fn add_members(
        &self,
        name: impl Into<String>,
        hosts: Vec<RoleHost>,
        clear_hostname: bool,
        clear_ips: bool,
    ) -> Result<Role, Error> {
        let name = named(name)?;
        if hosts.is_empty() {
            return Err(Error::InvalidField {
                field: "hosts",
                reason: "at least one host is required".to_string(),
            });
        }
        Ok(self.build(RoleCall::AddMembers {
            name,
            hosts,
            clear_hostname,
            clear_ips,
        }))
    }

    pub fn add_member_with_roletoken(&self, name: impl Into<String>, host: RoleHost) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::AddMemberWithRoleToken { name, host }))
    }

    pub fn get(&self, name: impl Into<String>, expand: bool) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::Get { name, expand }))
    }

    pub fn token_list(&self, name: impl Into<String>, expand: bool) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::TokenList { name, expand }))
    }

    pub fn validate(&self, name: impl Into<String>) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::Validate { name }))
    }

    pub fn delete(&self, name: impl Into<String>) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::Delete { name }))
    }

    pub fn delete_member(
        &self,
        name: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
        cuk: impl Into<String>,
    ) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::DeleteMember {
            name,
            host: host.into(),
            port: port.into(),
            cuk: cuk.into(),
        }))
    }

    pub fn delete_member_without_role(&self, cuk: impl Into<String>) -> Result<Role, Error> {
        let cuk = cuk.into();
        require_non_empty("cuk", &cuk)?;
        Ok(self.build(RoleCall::DeleteMemberWithoutRole { cuk }))
    }

    pub fn delete_role_token(
        &self,
        name: impl Into<String>,
        port: impl Into<String>,
        cuk: impl Into<String>,
    ) -> Result<Role, Error> {
        let name = named(name)?;
        Ok(self.build(RoleCall::DeleteRoleToken {
            name,
            port: port.into(),
            cuk: cuk.into(),
        }))
    }

    pub fn delete_role_token_string(&self, token: impl Into<String>) -> Result<Role, Error> {
        let token = token.into();
        require_non_empty("role_token", &token)?;
        Ok(self.build(RoleCall::DeleteRoleTokenString { token }))
    }

    fn build(&self, call: RoleCall) -> Role {
        Role {
            context: self.context.clone(),
            call,
        }
    }
}

fn named(name: impl Into<String>) -> Result<String, Error> {
    let name = name.into();
    require_non_empty("role_name", &name)?;
    Ok(name)
}

fn host_object(host: &RoleHost) -> Value {
    json!({
        "host": host.host,
        "port": host.port,
        "cuk": host.cuk,
        "extra": host.extra,
        "tag": host.tag,
        "inboundip": host.inboundip,
        "outboundip": host.outboundip,
    })
}

fn self_host_object(host: &RoleHost) -> Value {
    json!({
        "port": host.port,
        "cuk": host.cuk,
        "extra": host.extra,
        "tag": host.tag,
        "inboundip": host.inboundip,
        "outboundip": host.outboundip,
    })
}

/// A role API request.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    context: ApiContext,
    call: RoleCall,
}

impl Role {
    pub fn call(&self) -> &RoleCall {
        &self.call
    }
}

impl Resource for Role {
    const KIND: &'static str = "role";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        let ctx = &self.context;
        match (&self.call, method) {
            (
                RoleCall::Create {
                    name,
                    policies,
                    alias,
                },
                HttpMethod::Post,
            ) => Some(Route::new(ctx.path(&[])).with_body(json!({
                "role": { "name": name, "policies": policies, "alias": alias }
            }))),
            (
                RoleCall::Create {
                    name,
                    policies,
                    alias,
                },
                HttpMethod::Put,
            ) => Some(Route::new(ctx.path(&[])).with_query(json!({
                "name": name,
                "policies": policies,
                "alias": alias,
            }))),
            (
                RoleCall::AddMember {
                    name,
                    host,
                    clear_hostname,
                    clear_ips,
                },
                HttpMethod::Post,
            ) => Some(Route::new(ctx.path(&[name.as_str()])).with_body(json!({
                "host": host_object(host),
                "clear_hostname": clear_hostname,
                "clear_ips": clear_ips,
            }))),
            (
                RoleCall::AddMember {
                    name,
                    host,
                    clear_hostname,
                    clear_ips,
                },
                HttpMethod::Put,
            ) => {
                let mut query = host_object(host);
                if let Value::Object(map) = &mut query {
                    map.insert("clear_hostname".to_string(), Value::Bool(*clear_hostname));
                    map.insert("clear_ips".to_string(), Value::Bool(*clear_ips));
                }
                Some(Route::new(ctx.path(&[name.as_str()])).with_query(query))
            }
            (
                RoleCall::AddMembers {
                    name,
                    hosts,
                    clear_hostname,
                    clear_ips,
                },
                HttpMethod::Post,
            ) => {
                let hosts: Vec<Value> = hosts.iter().map(host_object).collect();
                Some(Route::new(ctx.path(&[name.as_str()])).with_body(json!({
                    "host": hosts,
                    "clear_hostname": clear_hostname,
                    "clear_ips": clear_ips,
                })))
            }
            (RoleCall::AddMemberWithRoleToken { name, host }, HttpMethod::Post) => Some(
                Route::new(ctx.path(&[name.as_str()]))
                    .with_body(json!({ "host": self_host_object(host) })),
            ),
            (RoleCall::AddMemberWithRoleToken { name, host }, HttpMethod::Put) => Some(
                Route::new(ctx.path(&[name.as_str()])).with_query(self_host_object(host)),
            ),
            (RoleCall::Get { name, expand }, HttpMethod::Get) => Some(
                Route::new(ctx.path(&[name.as_str()])).with_query(json!({ "expand": expand })),
            ),
            (RoleCall::TokenList { name, expand }, HttpMethod::Get) => Some(
                Route::new(ctx.path(&["token", "list", name.as_str()]))
                    .with_query(json!({ "expand": expand })),
            ),
            (RoleCall::Validate { name }, HttpMethod::Head)
            | (RoleCall::Delete { name }, HttpMethod::Delete) => {
                Some(Route::new(ctx.path(&[name.as_str()])))
            }
            (
                RoleCall::DeleteMember {
                    name,
                    host,
                    port,
                    cuk,
                },
                HttpMethod::Delete,
            ) => Some(Route::new(ctx.path(&[name.as_str()])).with_query(json!({
                "host": host,
                "port": port,
                "cuk": cuk,
            }))),
            (RoleCall::DeleteMemberWithoutRole { cuk }, HttpMethod::Delete) => {
                Some(Route::new(ctx.path(&[])).with_query(json!({ "cuk": cuk })))
            }
            (RoleCall::DeleteRoleToken { name, port, cuk }, HttpMethod::Delete) => Some(
                Route::new(ctx.path(&[name.as_str()]))
                    .with_query(json!({ "port": port, "cuk": cuk })),
            ),
            (RoleCall::DeleteRoleTokenString { token }, HttpMethod::Delete) => {
                Some(Route::new(ctx.path(&["token", token.as_str()])))
            }
            _ => None,
        }
    }
}
