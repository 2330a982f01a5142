//! Prometheus metrics for Page-Relay.
//!
//! All metrics follow the naming convention: `relay_<component>_<metric>_total`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DATA BUS
    // =========================================================================

    /// Bus writes, by whether an existing entry was replaced
    pub static ref BUS_WRITES: CounterVec = CounterVec::new(
        Opts::new("relay_bus_writes_total", "Total values written to the data bus"),
        &["outcome"]  // outcome: inserted/overwritten
    ).expect("metric creation failed");

    /// Bus reads, by outcome
    pub static ref BUS_READS: CounterVec = CounterVec::new(
        Opts::new("relay_bus_reads_total", "Total data bus reads"),
        &["outcome"]  // outcome: hit/miss
    ).expect("metric creation failed");

    // =========================================================================
    // HANDOFF CHANNELS
    // =========================================================================

    /// Values handed between pages, by channel and direction
    pub static ref HANDOFFS: CounterVec = CounterVec::new(
        Opts::new("relay_handoffs_total", "Total page handoffs"),
        &["channel", "direction"]  // channel: bus/preferences/route_params, direction: send/receive
    ).expect("metric creation failed");

    /// Preference flushes, by outcome
    pub static ref PREFERENCE_FLUSHES: CounterVec = CounterVec::new(
        Opts::new("relay_preferences_flushes_total", "Total preference store flushes"),
        &["outcome"]  // outcome: ok/error
    ).expect("metric creation failed");

    /// Route parameters that could not be encoded or read
    pub static ref ROUTE_PARAM_FAILURES: CounterVec = CounterVec::new(
        Opts::new("relay_route_param_failures_total", "Route parameter encode/decode failures"),
        &["stage"]  // stage: encode/decode
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; later calls find the metrics already present.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BUS_WRITES.clone()),
        Box::new(BUS_READS.clone()),
        Box::new(HANDOFFS.clone()),
        Box::new(PREFERENCE_FLUSHES.clone()),
        Box::new(ROUTE_PARAM_FAILURES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
