//! Tenant directory and bootstrap.
//!
//! # Data Flow
//! ```text
//! HarnessConfig
//!     → ContextConfig (fallback tenant)
//!     → bootstrap.rs::resolve (tenants query via ExecutionContext::run)
//!     → directory.rs (name → internal ID)
//!     → ResolvedConfig (default tenant = internal ID of the test tenant)
//!     → Harness::from_resolved (final ExecutionContext)
//! ```
//!
//! # Design Decisions
//! - Two explicit phases; nothing global is reassigned
//! - The directory is written once and shared read-only

pub mod bootstrap;
pub mod directory;

pub use bootstrap::{
    bootstrap, bootstrap_http, bootstrap_or_abort, resolve, BootstrapError, Harness,
    ResolvedConfig, TENANTS_QUERY,
};
pub use directory::{Tenant, TenantDirectory};
