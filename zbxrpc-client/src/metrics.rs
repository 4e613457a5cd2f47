//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`ZabbixClient`](crate::ZabbixClient)
//! when it is built with an observability config. Without a meter provider
//! installed they are no-ops.
//!
//! # Metrics Collected
//!
//! - **requests_total**: API calls by method and status (counter)
//! - **request_duration**: call latency in seconds (histogram)
//! - **errors_total**: failures by type: transport, payload, remote, validation (counter)
//! - **logins_total**: login attempts by outcome (counter)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of API calls
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of login attempts
    pub logins_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("zbxrpc.client.requests.total")
                .with_description("Total number of API calls")
                .build(),
            request_duration: meter
                .f64_histogram("zbxrpc.client.request.duration")
                .with_description("API call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("zbxrpc.client.errors.total")
                .with_description("Total number of failed API calls")
                .build(),
            logins_total: meter
                .u64_counter("zbxrpc.client.logins.total")
                .with_description("Total number of login attempts")
                .build(),
        }
    }

    /// Record a completed call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failure
    pub fn record_error(&self, error_type: &str) {
        let attributes = &[KeyValue::new("error_type", error_type.to_string())];
        self.errors_total.add(1, attributes);
    }

    /// Record a login attempt
    pub fn record_login(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.logins_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

impl std::fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMetrics").finish_non_exhaustive()
    }
}
