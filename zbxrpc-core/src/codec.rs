//! Codec for envelopes and responses
//!
//! Thin layer over `serde_json` that maps failures onto [`Error`] variants
//! and checks that an incoming payload is actually a JSON-RPC response
//! before it reaches the result normalizer.
//!
//! # Examples
//!
//! ```rust
//! use zbxrpc_core::{codec, EnvelopeBuilder};
//! use serde_json::json;
//!
//! let envelope = EnvelopeBuilder::new()
//!     .method("hostgroup.create")
//!     .put("name", json!("g1"))?
//!     .build()?;
//! let text = codec::encode_envelope(&envelope)?;
//! let decoded = codec::decode_envelope(&text)?;
//! assert_eq!(decoded.method, "hostgroup.create");
//!
//! let response = codec::decode_response(json!({"jsonrpc": "2.0", "result": "3.0.20", "id": 1}))?;
//! assert_eq!(response.result, Some(json!("3.0.20")));
//! # Ok::<(), zbxrpc_core::Error>(())
//! ```

use crate::error::{Error, JsonRpcErrorData, Result};
use crate::types::{Envelope, JsonRpcResponse};
use serde::Serialize;

/// Content type of every request body
pub const CONTENT_TYPE: &str = "application/json";

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode an envelope to its wire form
pub fn encode_envelope(envelope: &Envelope) -> Result<String> {
    encode(envelope)
}

/// Decode an envelope from its wire form
pub fn decode_envelope(data: &str) -> Result<Envelope> {
    serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))
}

/// Validate and decode a raw response payload
///
/// The payload must be a JSON object with a `result` member or an `error`
/// object holding an integer `code`. A present `result: null` is kept as
/// `Some(Value::Null)`. A non-string `message` is tolerated and rendered as
/// JSON text; some proxies in front of the API do that.
///
/// # Errors
///
/// `Error::InvalidResponse` when the payload is not a JSON-RPC response.
pub fn decode_response(payload: serde_json::Value) -> Result<JsonRpcResponse> {
    let mut object = match payload {
        serde_json::Value::Object(object) => object,
        other => {
            return Err(Error::InvalidResponse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    let jsonrpc = object
        .remove("jsonrpc")
        .and_then(|v| v.as_str().map(str::to_string));
    let id = object.remove("id").unwrap_or(serde_json::Value::Null);

    if let Some(error) = object.remove("error") {
        return Ok(JsonRpcResponse {
            jsonrpc,
            result: None,
            error: Some(decode_error_object(error)?),
            id,
        });
    }

    match object.remove("result") {
        Some(result) => Ok(JsonRpcResponse {
            jsonrpc,
            result: Some(result),
            error: None,
            id,
        }),
        None => Err(Error::InvalidResponse(
            "response has neither result nor error".to_string(),
        )),
    }
}

fn decode_error_object(error: serde_json::Value) -> Result<JsonRpcErrorData> {
    let mut object = match error {
        serde_json::Value::Object(object) => object,
        _ => return Err(Error::InvalidResponse("error member is not an object".to_string())),
    };

    let code = object
        .get("code")
        .and_then(serde_json::Value::as_i64)
        .and_then(|c| i32::try_from(c).ok())
        .ok_or_else(|| Error::InvalidResponse("error object has no integer code".to_string()))?;
    let message = match object.remove("message") {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let data = object.remove("data").filter(|d| !d.is_null());

    Ok(JsonRpcErrorData { code, message, data })
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
