//! # Relay Telemetry
//!
//! Logging and metrics for the Page-Relay runtime.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, human-readable
//!   in development and JSON in containers
//! - **Metrics**: Prometheus counters for handoff traffic
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RELAY_SERVICE_NAME` | `page-relay` | Service name in log records |
//! | `RELAY_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `RELAY_JSON_LOGS` | `false` | Emit JSON log lines |
//! | `RELAY_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BUS_READS, BUS_WRITES, HANDOFFS,
    PREFERENCE_FLUSHES, ROUTE_PARAM_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Initialize metrics first (synchronous)
    let metrics_handle = register_metrics()?;

    init_logging(config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Helper to create log entries tagged with the emitting component.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}
