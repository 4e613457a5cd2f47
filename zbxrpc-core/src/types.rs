//! JSON-RPC 2.0 wire types used by the Zabbix API
//!
//! The Zabbix API speaks plain JSON-RPC 2.0 over HTTP POST with one extension:
//! requests carry an `auth` member holding the session token returned by
//! `user.login`.
//!
//! # Request parameters
//!
//! A request's `params` member is either a JSON object or a JSON array,
//! depending on the method: `hostgroup.create` takes an object for a single
//! group and an array for several, `hostgroup.delete` takes an array of ids.
//! [`Params`] makes that choice explicit instead of carrying an untyped value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-RPC protocol version tag
pub const JSONRPC_VERSION: &str = "2.0";

/// Shape of a parameter container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamsKind {
    /// `{"key": value, ...}`
    Keyed,
    /// `[value, ...]`
    Ordered,
}

impl ParamsKind {
    /// Lowercase name, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamsKind::Keyed => "keyed",
            ParamsKind::Ordered => "ordered",
        }
    }
}

impl fmt::Display for ParamsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parameters
///
/// `None` is left out of the serialized request entirely. The variant is
/// chosen once by the [`EnvelopeBuilder`](crate::EnvelopeBuilder) and never
/// switched afterwards.
///
/// # Examples
///
/// ```rust
/// use zbxrpc_core::Params;
/// use serde_json::json;
///
/// let mut params = Params::Keyed(Default::default());
/// if let Params::Keyed(map) = &mut params {
///     map.insert("name".into(), json!("web servers"));
/// }
/// assert_eq!(serde_json::to_value(&params).unwrap(), json!({"name": "web servers"}));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Object parameters
    Keyed(serde_json::Map<String, serde_json::Value>),
    /// Array parameters
    Ordered(Vec<serde_json::Value>),
    /// No parameters
    #[default]
    None,
}

impl Params {
    /// Empty container of the given kind
    pub fn empty(kind: ParamsKind) -> Self {
        match kind {
            ParamsKind::Keyed => Params::Keyed(serde_json::Map::new()),
            ParamsKind::Ordered => Params::Ordered(Vec::new()),
        }
    }

    /// Kind of the container, `None` when absent
    pub fn kind(&self) -> Option<ParamsKind> {
        match self {
            Params::Keyed(_) => Some(ParamsKind::Keyed),
            Params::Ordered(_) => Some(ParamsKind::Ordered),
            Params::None => None,
        }
    }

    /// Kind name for error messages ("keyed", "ordered" or "none")
    pub fn kind_name(&self) -> &'static str {
        self.kind().map(|k| k.as_str()).unwrap_or("none")
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Params::None)
    }

    /// Convert to a plain JSON value (`null` for `None`)
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Params::Keyed(map) => serde_json::Value::Object(map.clone()),
            Params::Ordered(list) => serde_json::Value::Array(list.clone()),
            Params::None => serde_json::Value::Null,
        }
    }
}

/// One JSON-RPC request unit
///
/// Built through [`EnvelopeBuilder`](crate::EnvelopeBuilder), which guarantees
/// that `method` is set and `id` is allocated.
///
/// # Wire format
///
/// ```text
/// {"jsonrpc":"2.0","method":"host.get","params":{...},"auth":"0424bd59...","id":1}
/// ```
///
/// `auth` is serialized as `null` until a token is attached; `user.login` and
/// `apiinfo.version` are sent that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Remote procedure name, e.g. "hostgroup.create"
    pub method: String,
    #[serde(default, skip_serializing_if = "Params::is_none")]
    pub params: Params,
    /// Session token
    #[serde(default)]
    pub auth: Option<String>,
    /// Correlation id
    #[serde(default)]
    pub id: Option<i64>,
}

impl Envelope {
    /// Create an envelope with the protocol tag filled in
    pub fn new(method: impl Into<String>, params: Params, id: i64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            auth: None,
            id: Some(id),
        }
    }

    /// True when no session token is attached
    pub fn is_unauthenticated(&self) -> bool {
        self.auth.is_none()
    }
}

/// JSON-RPC 2.0 response as returned by the Zabbix API
///
/// Exactly one of `result` and `error` is set on a well-formed response.
/// `result` may legitimately be any JSON value, including `null`, so a present
/// `result: null` member is kept as `Some(Value::Null)` by
/// [`codec::decode_response`](crate::codec::decode_response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<crate::JsonRpcErrorData>,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl JsonRpcResponse {
    /// Successful response
    pub fn success(result: serde_json::Value, id: i64) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            result: Some(result),
            error: None,
            id: serde_json::Value::from(id),
        }
    }

    /// Error response
    pub fn error(error: crate::JsonRpcErrorData, id: i64) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            result: None,
            error: Some(error),
            id: serde_json::Value::from(id),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
