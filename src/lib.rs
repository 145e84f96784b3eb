//! GraphQL identity-context test harness.
//!
//! Runs GraphQL operations against an API under test as simulated callers
//! (tenant + scopes), with per-identity bearer tokens, retry on temporary
//! connection problems, and `result`-aliased response unwrapping.
//!
//! ```text
//!   test ──▶ ExecutionContext ──▶ TokenBuilder ──▶ TransportFactory ──▶ API
//!                 │                                       ▲
//!                 └── RetryPolicy ── ResultMapper ────────┘
//! ```
//!
//! Obtain a [`Harness`] once per test binary with [`tenants::bootstrap`] and
//! pass it to the tests.

// Core subsystems
pub mod config;
pub mod execution;
pub mod identity;
pub mod tenants;
pub mod transport;

// Cross-cutting concerns
pub mod observability;
pub mod resilience;

pub use config::HarnessConfig;
pub use execution::{Collaborators, ExecutionContext, ExecutionError};
pub use identity::{Identity, TokenBuilder};
pub use tenants::{bootstrap, Harness, TenantDirectory};
pub use transport::{OperationRequest, OperationScope};
