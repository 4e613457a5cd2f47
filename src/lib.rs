//! zbxrpc - Blocking client for the Zabbix JSON-RPC 2.0 API
//!
//! This is the main convenience crate that re-exports all zbxrpc sub-crates.
//! Use this crate if you want a single dependency that provides the client,
//! its types and the observability setup.
//!
//! # Architecture
//!
//! zbxrpc is organized into modular crates:
//!
//! - **zbxrpc-core**: Envelope types, builder, codec, result normalization,
//!   error handling, observability
//! - **zbxrpc-client**: HTTP transport, session, resource helpers
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbxrpc::ZabbixClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZabbixClient::new("http://127.0.0.1:8888/zabbix/api_jsonrpc.php")?;
//!     client.login("Admin", "zabbix")?;
//!
//!     client.hostgroup_list_create(&["a", "b"])?;
//!     let groups = client.hostgroup_list_get_by_name(&["a", "b"])?;
//!     println!("Groups: {}", groups.data);
//!
//!     client.hostgroup_list_delete_by_name(&["a", "b"])?;
//!     client.destroy();
//!     Ok(())
//! }
//! ```
//!
//! # Raw Envelopes
//!
//! ```rust
//! use zbxrpc::core::{codec, EnvelopeBuilder};
//! use serde_json::json;
//!
//! let envelope = EnvelopeBuilder::new()
//!     .method("hostgroup.create")
//!     .put("name", json!("g1"))?
//!     .build()?;
//! let decoded = codec::decode_envelope(&codec::encode_envelope(&envelope)?)?;
//! assert_eq!(decoded.method, "hostgroup.create");
//! # Ok::<(), zbxrpc::core::Error>(())
//! ```

pub use zbxrpc_client as client;
pub use zbxrpc_core as core;

pub use zbxrpc_client::{ClientBuilder, ZabbixClient};
pub use zbxrpc_core::{ApiResult, Error, Result};
