//! Client builder for configuring transport and observability
//!
//! The `ClientBuilder` provides a fluent API for configuring a client before
//! use. It allows you to:
//! - Set the HTTP timeout and user agent
//! - Inject a custom [`Transport`]
//! - Configure observability (OpenTelemetry)
//! - Read the endpoint from the environment
//!
//! # Examples
//!
//! ```rust,no_run
//! use zbxrpc_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> zbxrpc_core::Result<()> {
//! let client = ClientBuilder::new("http://127.0.0.1/zabbix/api_jsonrpc.php")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! // With observability
//! let client2 = ClientBuilder::new("http://127.0.0.1/zabbix/api_jsonrpc.php")
//!     .with_default_observability()
//!     .service_name("inventory-sync")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::ZabbixClient;
use std::sync::Arc;
use std::time::Duration;
use zbxrpc_core::{Error, Result};

/// Environment variable holding the API endpoint
pub const ENV_API_URL: &str = "ZABBIX_API_URL";

/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "ZABBIX_API_TIMEOUT_SECS";

/// Builder for configuring and creating a ZabbixClient
pub struct ClientBuilder {
    url: String,
    timeout: Duration,
    user_agent: String,
    transport: Option<Arc<dyn Transport>>,
    observability_config: Option<zbxrpc_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport: None,
            observability_config: None,
            service_name: None,
        }
    }

    /// Create a builder from `ZABBIX_API_URL` and `ZABBIX_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(ENV_API_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_API_URL)))?;

        let mut builder = Self::new(url);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Per-request timeout of the HTTP transport (default 30 s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header of the HTTP transport
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport instead of HTTP
    ///
    /// The URL, timeout and user agent are ignored.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: zbxrpc_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(zbxrpc_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// No request is sent; the first network traffic happens on the first
    /// call. Observability is initialized once per process; later builders
    /// reuse the installed subscriber and still get their own metrics.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidUrl` for a URL the HTTP transport cannot use
    /// - `Error::Config` when the observability setup itself fails
    pub fn build(self) -> Result<ZabbixClient> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            zbxrpc_core::init_observability(config.clone())
                .map_err(|e| Error::Config(format!("Failed to initialize observability: {}", e)))?;

            Some(Arc::new(crate::ClientMetrics::new(config.service_name)))
        } else {
            None
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let http = HttpTransport::with_options(&self.url, self.timeout, &self.user_agent)?;
                tracing::info!(
                    url = %http.url(),
                    timeout_secs = self.timeout.as_secs(),
                    "Client created"
                );
                Arc::new(http)
            }
        };

        Ok(ZabbixClient::from_parts(transport, metrics))
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .field("observability", &self.observability_config.is_some())
            .finish()
    }
}
