//! Metrics collection.
//!
//! # Metrics
//! - `testctx_operations_total` (counter): operations by entry point and outcome
//! - `testctx_retries_total` (counter): retries after transient failures
//!
//! # Design Decisions
//! - Facade only; the test runner decides whether a recorder is installed

/// Record a finished operation.
pub fn record_operation(entry: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("testctx_operations_total", "entry" => entry, "outcome" => outcome)
        .increment(1);
}

/// Record one retry.
pub fn record_retry() {
    metrics::counter!("testctx_retries_total").increment(1);
}
