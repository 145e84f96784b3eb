//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, timeouts > 0)
//! - Check the endpoint URL parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HarnessConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::HarnessConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint.url is empty")]
    EmptyEndpoint,

    #[error("endpoint.url '{url}' is invalid: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("endpoint.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("retries.max_attempts must be greater than 0")]
    ZeroAttempts,

    #[error("identity.scopes is empty")]
    NoScopes,

    #[error("identity.test_tenant_name is empty")]
    EmptyTestTenant,
}

/// Check a loaded configuration, collecting every error found.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoint.url.trim().is_empty() {
        errors.push(ValidationError::EmptyEndpoint);
    } else if let Err(e) = Url::parse(&config.endpoint.url) {
        errors.push(ValidationError::InvalidEndpoint {
            url: config.endpoint.url.clone(),
            reason: e.to_string(),
        });
    }

    if config.endpoint.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    if config.identity.scope_list().is_empty() {
        errors.push(ValidationError::NoScopes);
    }
    if config.identity.test_tenant_name.is_empty() {
        errors.push(ValidationError::EmptyTestTenant);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
