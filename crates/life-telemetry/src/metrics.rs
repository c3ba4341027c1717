//! Prometheus metrics for the portal access layer.
//!
//! All metrics follow the naming convention: `lc_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: policy decisions, route ACL outcomes, upstream errors
//! - **Histogram**: GraphQL round-trip latency

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // POLICY METRICS (lc-01 / lc-03)
    // =========================================================================

    /// Page policy decisions
    pub static ref ACCESS_DECISIONS: CounterVec = CounterVec::new(
        Opts::new("lc_policy_decisions_total", "Page policy decisions"),
        &["resource", "action", "decision"]  // decision: allow/deny/redirect
    ).expect("metric creation failed");

    /// Denials by reason
    pub static ref ACCESS_DENIALS: CounterVec = CounterVec::new(
        Opts::new("lc_policy_denials_total", "Page policy denials by reason"),
        &["reason"]  // reason: missing/role/state/owner/window/exists/unregistered
    ).expect("metric creation failed");

    /// Guarded page outcomes
    pub static ref GUARD_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("lc_guard_outcomes_total", "Page guard outcomes"),
        &["page", "outcome"]  // outcome: render/redirect/not_found/notice/error
    ).expect("metric creation failed");

    // =========================================================================
    // ROUTE ACL METRICS (lc-02 / lc-04)
    // =========================================================================

    /// Route ACL outcomes
    pub static ref ROUTE_ACL_DECISIONS: CounterVec = CounterVec::new(
        Opts::new("lc_route_acl_decisions_total", "Route ACL outcomes"),
        &["outcome"]  // outcome: proceed/static_redirect/login/club_redirect/forbidden
    ).expect("metric creation failed");

    // =========================================================================
    // UPSTREAM METRICS (GraphQL service)
    // =========================================================================

    /// Upstream failures by kind
    pub static ref UPSTREAM_ERRORS: CounterVec = CounterVec::new(
        Opts::new("lc_upstream_errors_total", "GraphQL service failures"),
        &["operation", "kind"]  // kind: graphql/transport/decode
    ).expect("metric creation failed");

    /// GraphQL round-trip latency
    pub static ref UPSTREAM_LATENCY: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "lc_upstream_request_duration_seconds",
            "Time spent waiting for the GraphQL service"
        ).buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"]
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// Encode the registry in Prometheus text format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        encode_registry(&self.registry)
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Policy
        Box::new(ACCESS_DECISIONS.clone()),
        Box::new(ACCESS_DENIALS.clone()),
        Box::new(GUARD_OUTCOMES.clone()),
        // Route ACL
        Box::new(ROUTE_ACL_DECISIONS.clone()),
        // Upstream
        Box::new(UPSTREAM_ERRORS.clone()),
        Box::new(UPSTREAM_LATENCY.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode_registry(&REGISTRY)
}

fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one policy decision, plus its denial reason when there is one.
pub fn record_decision(resource: &str, action: &str, decision: &str, reason: Option<&str>) {
    ACCESS_DECISIONS
        .with_label_values(&[resource, action, decision])
        .inc();
    if let Some(reason) = reason {
        ACCESS_DENIALS.with_label_values(&[reason]).inc();
    }
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: prometheus::Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for `operation`.
    pub fn upstream(operation: &str) -> Self {
        Self {
            histogram: UPSTREAM_LATENCY.with_label_values(&[operation]),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
