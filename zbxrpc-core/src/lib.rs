//! Core JSON-RPC 2.0 types for the Zabbix API client
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: the request [`Envelope`] with its [`Params`] variant, and the
//!   decoded [`JsonRpcResponse`]
//! - **Builder**: [`EnvelopeBuilder`] and the process-wide id allocator
//! - **Codec**: encoding envelopes, validating response payloads
//! - **Result**: the uniform [`ApiResult`] every call is normalized into
//! - **Catalog**: result codes and the API's item/value/interface type codes
//! - **Error handling**: [`Error`] for failures that abort a call
//! - **Observability**: `tracing` subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use zbxrpc_core::{codec, ApiResult, EnvelopeBuilder};
//! use serde_json::json;
//!
//! let envelope = EnvelopeBuilder::new()
//!     .method("hostgroup.get")
//!     .put("filter", json!({"name": ["linux servers"]}))?
//!     .build()?;
//! let body = codec::encode_envelope(&envelope)?;
//! assert!(body.contains("\"method\":\"hostgroup.get\""));
//!
//! let payload = json!({"jsonrpc": "2.0", "result": [{"groupid": "2"}], "id": envelope.id});
//! let result = ApiResult::from_response(codec::decode_response(payload)?);
//! assert!(result.is_success());
//! # Ok::<(), zbxrpc_core::Error>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod observability;
pub mod result;
pub mod types;

pub use builder::{next_id, EnvelopeBuilder};
pub use catalog::{InterfaceType, ItemType, ItemValueType, ResultCode};
pub use error::{Error, JsonRpcErrorData, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use result::{ApiResult, SUCCESS_MESSAGE};
pub use types::{Envelope, JsonRpcResponse, Params, ParamsKind, JSONRPC_VERSION};
