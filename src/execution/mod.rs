//! Operation execution subsystem.
//!
//! # Data Flow
//! ```text
//! entry point (run / run_with_tenant / run_with_scopes / run_without_tenant)
//!     → identity: default, or fresh (tenant, scopes)
//!     → token + transport: default, or freshly built (token errors returned as-is)
//!     → envelope.rs (ResultMapper over the caller's &mut T)
//!     → RetryPolicy::run(transport.run) under the caller's OperationScope
//!     → `data.result` written into the destination
//! ```
//!
//! # Design Decisions
//! - Context is immutable; custom identities never touch shared state
//! - No caching: every call is a new request to the API

pub mod context;
pub mod envelope;
pub mod types;

pub use context::ExecutionContext;
pub use envelope::ResultMapper;
pub use types::{Collaborators, ContextConfig, ExecutionError, ExecutionResult};
