//! Blocking client for the Zabbix JSON-RPC 2.0 API
//!
//! This crate sends [`zbxrpc_core`] envelopes to a Zabbix server over HTTP,
//! keeps the session token, and layers create/get/delete helpers for the
//! common configuration objects on top.
//!
//! # Core Features
//!
//! - **HTTP Transport**: blocking `ureq` agent with connection pooling
//! - **Session**: login/logout with automatic token attachment
//! - **Uniform Results**: every call yields an [`ApiResult`](zbxrpc_core::ApiResult)
//! - **Resource Helpers**: host groups, hosts, host interfaces and items
//! - **Observability**: OpenTelemetry integration for traces and metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbxrpc_client::ZabbixClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZabbixClient::new("http://127.0.0.1/zabbix/api_jsonrpc.php")?;
//!
//!     if !client.login("Admin", "zabbix")? {
//!         return Err("login rejected".into());
//!     }
//!
//!     if !client.hostgroup_exists("web servers") {
//!         let created = client.hostgroup_create("web servers")?;
//!         println!("Created: {}", created.data);
//!     }
//!
//!     let groups = client.hostgroup_get_by_host_name("Zabbix server")?;
//!     println!("Groups: {}", groups.data);
//!
//!     client.logout()?;
//!     client.destroy();
//!     Ok(())
//! }
//! ```
//!
//! # Error Model
//!
//! `Err` is reserved for calls that never obtained a JSON-RPC response:
//! builder misuse, connection failures, malformed replies, a destroyed
//! client. Errors reported by the API itself come back as `Ok` with a
//! failed `ApiResult`, and so do local parameter validation failures
//! (code 10001).

mod client;
mod client_builder;
mod metrics;
mod resources;
mod session;
mod transport;

#[cfg(test)]
mod test_support;

pub use client::ZabbixClient;
pub use client_builder::{ClientBuilder, ENV_API_URL, ENV_TIMEOUT_SECS};
pub use metrics::ClientMetrics;
pub use resources::{HostInterface, ResourceKind};
pub use session::Session;
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
