use crate::api::{ApiContext, AuthToken, HttpMethod, Resource, Route};
use crate::error::{require_non_empty, Error};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

pub(crate) const RESOURCE_BASE_PATH: &str = "resource";

/// Type of the data stored in a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Object,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of a resource create call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    pub name: String,
    pub data_type: DataType,
    pub data: Value,
    pub keys: Option<Map<String, Value>>,
    pub alias: Option<Vec<String>>,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType, data: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            data: data.into(),
            keys: None,
            alias: None,
        }
    }

    pub fn keys(mut self, keys: Map<String, Value>) -> Self {
        self.keys = Some(keys);
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

/// Identity of a container calling without a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIdentity {
    pub port: String,
    pub cuk: String,
    /// Full yrn path of the role the container belongs to.
    pub role: String,
}

impl ContainerIdentity {
    pub fn new(port: impl Into<String>, cuk: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            cuk: cuk.into(),
            role: role.into(),
        }
    }
}

/// Operations of the resource API.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceCall {
    /// `POST` (body) or `PUT` (query).
    Create(ResourceDefinition),
    /// `GET resource/{path}?expand=...&service=...`
    Get {
        expand: bool,
        service: Option<String>,
    },
    /// `GET resource/{path}?type=...&keys=...&service=...`
    GetWithRoleToken {
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<String>,
    },
    /// `HEAD resource/{path}?type=...&keys=...&service=...`
    Validate {
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<String>,
    },
    /// `HEAD resource/{path}?port=...&cuk=...&role=...&type=...&keys=...&service=...`
    ValidateWithNoToken {
        container: ContainerIdentity,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<String>,
    },
    /// `DELETE resource/{path}?type=...&keynames=...&alias=...`
    DeleteWithScopedToken {
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        alias: Option<Vec<String>>,
    },
    /// `DELETE resource/{path}?type=...&keynames=...`
    DeleteWithRoleToken {
        data_type: DataType,
        keys: Option<Map<String, Value>>,
    },
    /// `DELETE resource/{path}?port=...&cuk=...&role=...&type=...&keynames=...`
    DeleteWithNoToken {
        container: ContainerIdentity,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
    },
}

/// Entry point for the resource API.
///
/// `resource_path` is a resource name, a path below the tenant or a full
/// yrn. A create with a scoped user token goes to `resource` and may omit
/// it; every other call addresses `resource/{resource_path}`.
#[derive(Debug, Clone)]
pub struct ResourceApi {
    context: ApiContext,
    scoped: bool,
    resource_path: Option<String>,
}

impl ResourceApi {
    pub fn new(auth: AuthToken, resource_path: Option<&str>) -> Self {
        Self {
            context: ApiContext::new(RESOURCE_BASE_PATH, &auth),
            scoped: auth.is_scoped(),
            resource_path: resource_path
                .filter(|p| !p.trim().is_empty())
                .map(str::to_owned),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context = self.context.with_version(version);
        self
    }

    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }

    pub fn create(&self, definition: ResourceDefinition) -> Result<ResourceRequest, Error> {
        require_non_empty("resource_name", &definition.name)?;
        let path = if self.scoped {
            self.resource_path.clone()
        } else {
            Some(self.require_path()?)
        };
        Ok(self.build(path, ResourceCall::Create(definition)))
    }

    pub fn get(&self, expand: bool, service: Option<&str>) -> Result<ResourceRequest, Error> {
        self.addressed(ResourceCall::Get {
            expand,
            service: service.map(str::to_owned),
        })
    }

    pub fn get_with_roletoken(
        &self,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<&str>,
    ) -> Result<ResourceRequest, Error> {
        self.addressed(ResourceCall::GetWithRoleToken {
            data_type,
            keys,
            service: service.map(str::to_owned),
        })
    }

    pub fn validate(
        &self,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<&str>,
    ) -> Result<ResourceRequest, Error> {
        self.addressed(ResourceCall::Validate {
            data_type,
            keys,
            service: service.map(str::to_owned),
        })
    }

    pub fn validate_with_notoken(
        &self,
        container: ContainerIdentity,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        service: Option<&str>,
    ) -> Result<ResourceRequest, Error> {
        require_non_empty("role", &container.role)?;
        self.addressed(ResourceCall::ValidateWithNoToken {
            container,
            data_type,
            keys,
            service: service.map(str::to_owned),
        })
    }

    pub fn delete_with_scopedtoken(
        &self,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
        alias: Option<Vec<String>>,
    ) -> Result<ResourceRequest, Error> {
        self.addressed(ResourceCall::DeleteWithScopedToken {
            data_type,
            keys,
            alias,
        })
    }

    pub fn delete_with_roletoken(
        &self,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
    ) -> Result<ResourceRequest, Error> {
        self.addressed(ResourceCall::DeleteWithRoleToken { data_type, keys })
    }

    pub fn delete_with_notoken(
        &self,
        container: ContainerIdentity,
        data_type: DataType,
        keys: Option<Map<String, Value>>,
    ) -> Result<ResourceRequest, Error> {
        require_non_empty("role", &container.role)?;
        self.addressed(ResourceCall::DeleteWithNoToken {
            container,
            data_type,
            keys,
        })
    }

    fn require_path(&self) -> Result<String, Error> {
        self.resource_path.clone().ok_or_else(|| Error::InvalidField {
            field: "resource_path",
            reason: "required unless creating with a scoped token".to_string(),
        })
    }

    fn addressed(&self, call: ResourceCall) -> Result<ResourceRequest, Error> {
        let path = self.require_path()?;
        Ok(self.build(Some(path), call))
    }

    fn build(&self, resource_path: Option<String>, call: ResourceCall) -> ResourceRequest {
        ResourceRequest {
            context: self.context.clone(),
            resource_path,
            call,
        }
    }
}

/// A resource API request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    context: ApiContext,
    resource_path: Option<String>,
    call: ResourceCall,
}

impl ResourceRequest {
    pub fn call(&self) -> &ResourceCall {
        &self.call
    }

    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }

    fn path(&self) -> String {
        match &self.resource_path {
            Some(path) => self.context.path(&[path.as_str()]),
            None => self.context.path(&[]),
        }
    }
}

fn container_query(container: &ContainerIdentity, data_type: DataType) -> Map<String, Value> {
    let mut query = Map::new();
    query.insert("port".to_string(), json!(container.port));
    query.insert("cuk".to_string(), json!(container.cuk));
    query.insert("role".to_string(), json!(container.role));
    query.insert("type".to_string(), json!(data_type));
    query
}

impl Resource for ResourceRequest {
    const KIND: &'static str = "resource";

    fn context(&self) -> &ApiContext {
        &self.context
    }

    fn route(&self, method: HttpMethod) -> Option<Route> {
        let path = self.path();
        match (&self.call, method) {
            (ResourceCall::Create(def), HttpMethod::Post) => Some(Route::new(path).with_body(json!({
                "resource": {
                    "name": def.name,
                    "type": def.data_type,
                    "data": def.data,
                    "keys": def.keys,
                    "alias": def.alias,
                }
            }))),
            (ResourceCall::Create(def), HttpMethod::Put) => Some(Route::new(path).with_query(json!({
                "name": def.name,
                "type": def.data_type,
                "data": def.data,
                "keys": def.keys,
                "alias": def.alias,
            }))),
            (ResourceCall::Get { expand, service }, HttpMethod::Get) => Some(
                Route::new(path).with_query(json!({ "expand": expand, "service": service })),
            ),
            (
                ResourceCall::GetWithRoleToken {
                    data_type,
                    keys,
                    service,
                },
                HttpMethod::Get,
            )
            | (
                ResourceCall::Validate {
                    data_type,
                    keys,
                    service,
                },
                HttpMethod::Head,
            ) => Some(Route::new(path).with_query(json!({
                "type": data_type,
                "keys": keys,
                "service": service,
            }))),
            (
                ResourceCall::ValidateWithNoToken {
                    container,
                    data_type,
                    keys,
                    service,
                },
                HttpMethod::Head,
            ) => {
                let mut query = container_query(container, *data_type);
                query.insert("keys".to_string(), json!(keys));
                query.insert("service".to_string(), json!(service));
                Some(Route::new(path).with_query(Value::Object(query)))
            }
            (
                ResourceCall::DeleteWithScopedToken {
                    data_type,
                    keys,
                    alias,
                },
                HttpMethod::Delete,
            ) => Some(Route::new(path).with_query(json!({
                "type": data_type,
                "keynames": keys,
                "alias": alias,
            }))),
            (ResourceCall::DeleteWithRoleToken { data_type, keys }, HttpMethod::Delete) => Some(
                Route::new(path).with_query(json!({ "type": data_type, "keynames": keys })),
            ),
            (
                ResourceCall::DeleteWithNoToken {
                    container,
                    data_type,
                    keys,
                },
                HttpMethod::Delete,
            ) => {
                let mut query = container_query(container, *data_type);
                query.insert("keynames".to_string(), json!(keys));
                Some(Route::new(path).with_query(Value::Object(query)))
            }
            _ => None,
        }
    }
}
