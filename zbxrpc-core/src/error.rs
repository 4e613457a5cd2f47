//! Error types for zbxrpc
//!
//! Two kinds of failure exist in this crate and they are kept apart on purpose:
//!
//! - **Error**: conditions that abort a call before a JSON-RPC response was
//!   obtained (builder misuse, transport failures, malformed payloads).
//!   These are returned as `Err` and propagate to the caller unchanged.
//! - **JsonRpcErrorData**: the `error` object of a JSON-RPC 2.0 response.
//!   A remote error is a *successful* exchange from the transport's point of
//!   view; the dispatch path folds it into an [`ApiResult`](crate::ApiResult)
//!   instead of returning `Err`.
//!
//! # Examples
//!
//! ```rust
//! use zbxrpc_core::{Error, JsonRpcErrorData};
//!
//! let error = Error::WrongVariant { expected: "keyed", actual: "ordered" };
//! assert!(error.to_string().contains("keyed"));
//!
//! let remote = JsonRpcErrorData::new(-32602, "Invalid params.");
//! assert_eq!(remote.code, -32602);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for zbxrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for zbxrpc operations
///
/// # Error Categories
///
/// - **Builder errors**: InvalidState, WrongVariant, MissingMethod, InvalidParams
/// - **Transport errors**: Transport, Http, TransportClosed, Io, InvalidUrl
/// - **Payload errors**: Serialization, InvalidResponse
/// - **Configuration errors**: Config
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The parameter container was already initialized with another kind
    #[error("Invalid builder state: params already initialized as {current}, cannot switch to {requested}")]
    InvalidState {
        /// Kind the builder currently holds
        current: &'static str,
        /// Kind that was requested
        requested: &'static str,
    },

    /// A keyed mutation was applied to an ordered container, or vice versa
    #[error("Wrong params variant: operation requires {expected} params, builder holds {actual}")]
    WrongVariant {
        /// Kind the operation needs
        expected: &'static str,
        /// Kind the builder holds
        actual: &'static str,
    },

    /// `build()` was called without a method name
    #[error("Envelope has no method")]
    MissingMethod,

    /// Params value is neither an object, an array nor null
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Connection-level failure (refused, reset, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status whose body is not a JSON-RPC payload
    #[error("HTTP error: status={status}, body={body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body (possibly truncated)
        body: String,
    },

    /// The transport was released by `destroy()`
    #[error("Transport closed")]
    TransportClosed,

    /// Response payload is not a JSON-RPC 2.0 response object
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Input/output error while reading the response body
    #[error("IO error: {0}")]
    Io(String),

    /// API endpoint URL could not be parsed or has an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short, stable label used as a metrics attribute
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidState { .. }
            | Error::WrongVariant { .. }
            | Error::MissingMethod
            | Error::InvalidParams(_) => "builder",
            Error::Serialization(_) | Error::InvalidResponse(_) => "payload",
            Error::Transport(_)
            | Error::Http { .. }
            | Error::TransportClosed
            | Error::Io(_)
            | Error::InvalidUrl(_) => "transport",
            Error::Config(_) => "config",
        }
    }
}

/// JSON-RPC 2.0 error object as sent by the remote API
///
/// Zabbix puts a short summary into `message` ("Invalid params.") and the
/// actual reason into `data` ("No permissions to referred object or it does
/// not exist!"), so `data` is usually the more useful field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i32,

    /// Short description
    pub message: String,

    /// Optional detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create a new error object with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new error object carrying a detail value
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
