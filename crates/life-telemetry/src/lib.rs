//! # Life Telemetry
//!
//! Logging and metrics for the clubs portal access layer.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, JSON or
//!   human-readable output
//! - **Metrics**: Prometheus counters for policy decisions, route ACL
//!   outcomes and upstream failures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use life_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LC_SERVICE_NAME` | `life-portal` | Service name in logs |
//! | `LC_LOG_LEVEL` | `info` | Log level filter |
//! | `LC_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `LC_ENV` | `development` | Deployment environment |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, StructuredLogger};
pub use metrics::{
    encode_metrics, record_decision, register_metrics, HistogramTimer, MetricsHandle,
    ACCESS_DECISIONS, ACCESS_DENIALS, GUARD_OUTCOMES, ROUTE_ACL_DECISIONS, UPSTREAM_ERRORS,
    UPSTREAM_LATENCY,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first (synchronous, no global subscriber needed)
    let metrics = register_metrics()?;

    let logger = init_logging(&config)?;

    Ok(TelemetryGuard {
        metrics,
        _logger: logger,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    metrics: MetricsHandle,
    _logger: StructuredLogger,
}

impl TelemetryGuard {
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
