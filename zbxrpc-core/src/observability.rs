//! OpenTelemetry observability configuration and initialization
//!
//! The client logs every call through `tracing`. Nothing is printed unless the
//! application installs a subscriber; [`init_observability`] installs one that
//! writes JSON lines to stdout and, optionally, exports traces and metrics to
//! an OpenTelemetry collector.
//!
//! The library is blocking and brings no async runtime, so export goes over
//! OTLP/HTTP (protobuf) with a blocking HTTP client. Batching and periodic
//! metric collection run on the SDK's own background threads.
//!
//! # Usage Pattern
//!
//! ```rust,no_run
//! use zbxrpc_core::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new("inventory-sync")
//!     .with_endpoint("http://localhost:4318")
//!     .with_log_level("debug");
//!
//! zbxrpc_core::init_observability(config).expect("Failed to init observability");
//!
//! // ... run your application ...
//!
//! zbxrpc_core::shutdown_observability();
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector base URL
//! - `RUST_LOG`: Log level filter (e.g., "info", "zbxrpc_client=debug")

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Held for the whole of init and shutdown
static STATE: Mutex<State> = Mutex::new(State {
    installed: false,
    providers: None,
});

struct State {
    /// A global subscriber is in place, ours or the application's
    installed: bool,
    /// Providers kept alive until [`shutdown_observability`]
    providers: Option<Providers>,
}

struct Providers {
    tracer: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
    meter: Option<opentelemetry_sdk::metrics::SdkMeterProvider>,
}

impl Providers {
    fn shutdown(self) {
        if let Some(tracer) = self.tracer {
            if let Err(e) = tracer.shutdown() {
                tracing::warn!(error = %e, "Tracer provider shutdown failed");
            }
        }
        if let Some(meter) = self.meter {
            if let Err(e) = meter.shutdown() {
                tracing::warn!(error = %e, "Meter provider shutdown failed");
            }
        }
    }
}

/// Observability configuration
///
/// # Defaults
///
/// - Service name: "zbxrpc"
/// - Service version: crate version
/// - OTLP endpoint: `$OTEL_EXPORTER_OTLP_ENDPOINT` or "http://localhost:4318"
/// - Traces and metrics export disabled, JSON logs enabled
/// - Log level: `$RUST_LOG` or "info"
///
/// # Examples
///
/// ```rust
/// use zbxrpc_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::new("zabbix-provisioner")
///     .with_endpoint("http://collector:4318")
///     .with_traces(true)
///     .with_metrics(true);
/// assert_eq!(config.service_name, "zabbix-provisioner");
/// ```
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to all telemetry
    pub service_name: String,

    /// Service version attached to all telemetry
    pub service_version: String,

    /// Collector base URL; `/v1/traces` and `/v1/metrics` are appended
    pub otlp_endpoint: String,

    /// Export spans to the collector
    pub enable_traces: bool,

    /// Export metrics to the collector every 30 seconds
    pub enable_metrics: bool,

    /// Write JSON log lines to stdout
    pub enable_logs: bool,

    /// Log level filter, used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "zbxrpc".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4318".to_string()),
            enable_traces: false,
            enable_metrics: false,
            enable_logs: true,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration with a custom service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the collector base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    /// Set the log level filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Enable or disable span export
    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    /// Enable or disable metric export
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Enable or disable JSON log output
    pub fn with_logs(mut self, enable: bool) -> Self {
        self.enable_logs = enable;
        self
    }

    fn signal_endpoint(&self, signal: &str) -> String {
        format!("{}/v1/{}", self.otlp_endpoint.trim_end_matches('/'), signal)
    }

    fn resource(&self) -> opentelemetry_sdk::Resource {
        opentelemetry_sdk::Resource::builder_empty()
            .with_attributes(vec![
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                    self.service_name.clone(),
                ),
                KeyValue::new(
                    opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                    self.service_version.clone(),
                ),
            ])
            .build()
    }
}

/// Initialize logging and, if enabled, OpenTelemetry export
///
/// Observability is process-global. The first successful call installs the
/// `tracing` subscriber, registers the providers globally and returns
/// `Ok(true)`. Any later call, and a call that finds a subscriber installed by
/// the application, leaves everything as it is and returns `Ok(false)`. With
/// everything disabled this is a no-op.
///
/// # Errors
///
/// - the log filter does not parse
/// - an exporter cannot be built (invalid endpoint)
pub fn init_observability(config: ObservabilityConfig) -> Result<bool, BoxError> {
    if !config.enable_traces && !config.enable_metrics && !config.enable_logs {
        return Ok(false);
    }

    let mut state = STATE.lock().unwrap_or_else(|e| e.into_inner());
    if state.installed {
        drop(state);
        tracing::debug!(service_name = %config.service_name, "Observability already initialized");
        return Ok(false);
    }

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let tracer = if config.enable_traces {
        Some(build_tracer_provider(&config)?)
    } else {
        None
    };

    let meter = if config.enable_metrics {
        match build_meter_provider(&config) {
            Ok(meter) => Some(meter),
            Err(e) => {
                Providers { tracer, meter: None }.shutdown();
                return Err(e);
            }
        }
    } else {
        None
    };

    let providers = Providers { tracer, meter };
    state.installed = true;

    if !install_subscriber(&config, env_filter, providers.tracer.as_ref()) {
        drop(state);
        providers.shutdown();
        tracing::debug!("A global subscriber is already installed; observability left unchanged");
        return Ok(false);
    }

    if let Some(ref tracer) = providers.tracer {
        global::set_tracer_provider(tracer.clone());
    }
    if let Some(ref meter) = providers.meter {
        global::set_meter_provider(meter.clone());
    }
    state.providers = Some(providers);
    drop(state);

    tracing::info!(
        service_name = %config.service_name,
        otlp_endpoint = %config.otlp_endpoint,
        traces = config.enable_traces,
        metrics = config.enable_metrics,
        logs = config.enable_logs,
        "Observability initialized"
    );

    Ok(true)
}

fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<opentelemetry_sdk::trace::SdkTracerProvider, BoxError> {
    use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler};

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(config.signal_endpoint("traces"))
        .build()?;

    Ok(opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(config.resource())
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .build())
}

fn build_meter_provider(
    config: &ObservabilityConfig,
) -> Result<opentelemetry_sdk::metrics::SdkMeterProvider, BoxError> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_http()
        .with_endpoint(config.signal_endpoint("metrics"))
        .build()?;

    let reader = opentelemetry_sdk::metrics::PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(30))
        .build();

    Ok(opentelemetry_sdk::metrics::SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build())
}

/// Install the global `tracing` subscriber; false if one is already set
///
/// Layers: OpenTelemetry (when a tracer provider exists), `EnvFilter`, JSON
/// fmt output (when logs are enabled).
fn install_subscriber(
    config: &ObservabilityConfig,
    env_filter: EnvFilter,
    tracer_provider: Option<&opentelemetry_sdk::trace::SdkTracerProvider>,
) -> bool {
    use opentelemetry::trace::TracerProvider as _;

    let telemetry_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    let fmt_layer = config.enable_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json()
    });

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// Flush and shut down the providers registered by [`init_observability`]
///
/// Safe to call more than once and without a prior init. The subscriber
/// itself stays installed.
pub fn shutdown_observability() {
    let providers = STATE
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .providers
        .take();
    let Some(providers) = providers else {
        return;
    };

    tracing::info!("Shutting down observability");
    providers.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "zbxrpc");
        assert!(!config.enable_traces);
        assert!(!config.enable_metrics);
        assert!(config.enable_logs);
    }

    #[test]
    fn test_custom_config() {
        let config = ObservabilityConfig::new("test-service")
            .with_endpoint("http://custom:4318")
            .with_log_level("debug")
            .with_version("1.0.0")
            .with_traces(true);

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.otlp_endpoint, "http://custom:4318");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.service_version, "1.0.0");
        assert!(config.enable_traces);
    }

    #[test]
    fn test_signal_endpoint() {
        let config = ObservabilityConfig::new("s").with_endpoint("http://collector:4318/");
        assert_eq!(config.signal_endpoint("traces"), "http://collector:4318/v1/traces");
        assert_eq!(config.signal_endpoint("metrics"), "http://collector:4318/v1/metrics");
    }

    #[test]
    fn test_init_all_disabled() {
        let config = ObservabilityConfig::new("test-none")
            .with_traces(false)
            .with_metrics(false)
            .with_logs(false);

        assert!(!init_observability(config).unwrap());
    }

    #[test]
    fn test_repeated_init_is_a_no_op() {
        let logs_only = ObservabilityConfig::new("first")
            .with_log_level("warn")
            .with_traces(false)
            .with_metrics(false);
        assert!(init_observability(logs_only).is_ok());

        let with_traces = ObservabilityConfig::new("second")
            .with_endpoint("http://127.0.0.1:4318")
            .with_traces(true);
        assert!(!init_observability(with_traces).unwrap());

        let state = STATE.lock().unwrap_or_else(|e| e.into_inner());
        assert!(state.installed);
        assert!(state.providers.as_ref().map_or(true, |p| p.tracer.is_none()));
    }

    #[test]
    fn test_shutdown_idempotent() {
        shutdown_observability();
        shutdown_observability();
    }

    #[test]
    fn test_config_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error"] {
            let config = ObservabilityConfig::default().with_log_level(*level);
            assert_eq!(config.log_level, *level);
        }
    }
}
