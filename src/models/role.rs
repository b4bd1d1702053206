use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A host entry registered to a role.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RoleHost {
    pub host: String,
    pub port: String,
    pub cuk: String,
    pub extra: String,
    pub tag: String,
    pub inboundip: String,
    pub outboundip: String,
}

impl RoleHost {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            ..Self::default()
        }
    }

    pub fn cuk(mut self, cuk: impl Into<String>) -> Self {
        self.cuk = cuk.into();
        self
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn inboundip(mut self, ip: impl Into<String>) -> Self {
        self.inboundip = ip.into();
        self
    }

    pub fn outboundip(mut self, ip: impl Into<String>) -> Self {
        self.outboundip = ip.into();
        self
    }
}

/// One role token as reported by the role token list endpoint.
///
/// Only `registerpath` is interpreted; every other attribute the server
/// sends (user, hostname, expiry, ...) is kept verbatim in `attributes`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoleTokenInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registerpath: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoleTokenListResponse {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub tokens: BTreeMap<String, RoleTokenInfo>,
}
