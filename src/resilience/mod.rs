//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Operation against the API:
//!     → transport classifies its failure (classify.rs → ErrorKind)
//!     → retries.rs (retry Transient with a fixed delay, up to the cap)
//!     → last error returned to the caller
//! ```
//!
//! # Design Decisions
//! - Classification happens at the boundary, not in the retry loop
//! - Attempt count is the only cap; deadlines belong to the caller's scope

pub mod classify;
pub mod retries;

pub use classify::{classify_error, classify_message, ErrorKind, Retryable};
pub use retries::RetryPolicy;
