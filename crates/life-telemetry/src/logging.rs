//! Structured logging.
//!
//! One `tracing-subscriber` registry per process: an `EnvFilter` built from
//! the configured level, plus either a JSON layer (containers) or a
//! human-readable layer (development). Every access decision is logged with
//! the same field names so the lines can be queried uniformly:
//!
//! - `resource`, `action`, `decision`, `reason` for page policy decisions
//! - `path`, `outcome`, `target` for route ACL decisions

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Structured logger handle
#[derive(Debug)]
pub struct StructuredLogger {
    pub json: bool,
}

/// Build the filter from `RUST_LOG` if set, else from the configured level.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    let env_filter = build_filter(config)?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(StructuredLogger {
        json: config.json_logs,
    })
}

/// Log a page policy decision with standard fields.
#[macro_export]
macro_rules! log_decision {
    ($level:ident, $resource:expr, $action:expr, $decision:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            resource = %$resource,
            action = %$action,
            decision = %$decision,
            $($($field)*,)?
            "Access decision"
        )
    };
}

/// Log a route ACL outcome with standard fields.
#[macro_export]
macro_rules! log_route {
    ($level:ident, $path:expr, $outcome:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            path = %$path,
            outcome = %$outcome,
            $($($field)*,)?
            "Route ACL"
        )
    };
}
