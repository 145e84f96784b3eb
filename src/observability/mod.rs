//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Retry policy, execution context, bootstrap produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - Structured fields (attempt, tenant, request_id), not formatted strings
//! - Every attempt carries a request ID the API can log too

pub mod logging;
pub mod metrics;
