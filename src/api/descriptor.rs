use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods understood by the K2HR3 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Head,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Head,
        HttpMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Head => "HEAD",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path, body and query computed for one `(variant, method)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: String,
    pub body: Option<Value>,
    pub query: Option<Value>,
}

impl Route {
    pub fn new(path: String) -> Self {
        Self {
            path,
            body: None,
            query: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }
}

/// Transport-agnostic description of an outgoing call.
///
/// `path` is relative (for example `v1/policy/test_policy`); the transport
/// is responsible for prefixing scheme, host and port.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query: Option<Value>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Serialized JSON body, if any.
    pub fn body_json(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }

    /// Serialized JSON query document, if any.
    pub fn query_json(&self) -> Option<String> {
        self.query.as_ref().map(Value::to_string)
    }

    /// Renders the query document as URL query pairs.
    ///
    /// Each top-level key becomes one pair. Strings are passed through as-is,
    /// `null` values are omitted and any other value is rendered as compact
    /// JSON (`true`, `60`, `["a","b"]`). A non-object document is sent under
    /// no key and therefore ignored.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(Value::Object(map)) = &self.query else {
            return Vec::new();
        };
        map.iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key.clone(), s.clone())),
                other => Some((key.clone(), other.to_string())),
            })
            .collect()
    }
}
