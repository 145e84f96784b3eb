//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (ALL_SCOPES, DIRECTOR_URL, ...)
//!     → validation.rs (semantic checks)
//!     → HarnessConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup, never reloaded
//! - All fields have defaults so a bare environment works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    EndpointConfig, HarnessConfig, IdentityConfig, ObservabilityConfig, RetryConfig, TokenConfig,
};
pub use validation::ValidationError;
