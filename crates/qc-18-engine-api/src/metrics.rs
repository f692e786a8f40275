//! # Engine API Metrics
//!
//! Prometheus metrics for payload intake and round coordination.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-engine-api = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `engine_api_payloads_received_total` - Counter of `execute_payload` calls
//! - `engine_api_replies_total` - Counter of replies (by status)
//! - `engine_api_payloads_rejected_total` - Counter of error results (by reason)
//! - `engine_api_payloads_coalesced_total` - Counter of submissions answered
//!   from the cache while a round was outstanding
//! - `engine_api_verdict_timeouts_total` - Counter of rounds that outlived the
//!   caller's verdict timeout
//! - `engine_api_round_latency_seconds` - Histogram of dispatch-to-verdict time

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref PAYLOADS_RECEIVED: IntCounter = register_int_counter!(
        "engine_api_payloads_received_total",
        "Total number of execute_payload calls"
    )
    .expect("Failed to create PAYLOADS_RECEIVED metric");

    /// Replies labeled by status
    pub static ref REPLIES: IntCounterVec = register_int_counter_vec!(
        "engine_api_replies_total",
        "Total number of replies by status",
        &["status"]
    )
    .expect("Failed to create REPLIES metric");

    /// Error results labeled by reason
    pub static ref PAYLOADS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "engine_api_payloads_rejected_total",
        "Total number of execute_payload calls that returned an error",
        &["reason"]
    )
    .expect("Failed to create PAYLOADS_REJECTED metric");

    pub static ref PAYLOADS_COALESCED: IntCounter = register_int_counter!(
        "engine_api_payloads_coalesced_total",
        "Submissions answered SYNCING while a round was outstanding"
    )
    .expect("Failed to create PAYLOADS_COALESCED metric");

    pub static ref VERDICT_TIMEOUTS: IntCounter = register_int_counter!(
        "engine_api_verdict_timeouts_total",
        "Rounds whose verdict arrived after the caller stopped waiting"
    )
    .expect("Failed to create VERDICT_TIMEOUTS metric");

    pub static ref ROUND_LATENCY: Histogram = register_histogram!(
        "engine_api_round_latency_seconds",
        "Time from dispatching a round to receiving its verdict",
        vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0]
    )
    .expect("Failed to create ROUND_LATENCY metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_payload_received() {
    PAYLOADS_RECEIVED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_reply(status: &str) {
    REPLIES.with_label_values(&[status]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    PAYLOADS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_coalesced() {
    PAYLOADS_COALESCED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_verdict_timeout() {
    VERDICT_TIMEOUTS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_round_latency(seconds: f64) {
    ROUND_LATENCY.observe(seconds);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_payload_received() {}

#[cfg(not(feature = "metrics"))]
pub fn record_reply(_status: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_coalesced() {}

#[cfg(not(feature = "metrics"))]
pub fn record_verdict_timeout() {}

#[cfg(not(feature = "metrics"))]
pub fn record_round_latency(_seconds: f64) {}
