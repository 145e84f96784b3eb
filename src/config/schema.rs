//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Scopes granted to the default identity when `ALL_SCOPES` is unset.
pub const DEFAULT_SCOPES: &str = "runtime:write application:write tenant:read label_definition:write integration_system:write application:read runtime:read label_definition:read integration_system:read health_checks:read application_template:read application_template:write eventing:manage";

/// Tenant used for the first context, before the tenant directory is known.
pub const FALLBACK_TENANT: &str = "3e64ebae-38b5-46a0-b1ed-9ccee153a0ae";

/// Display name of the tenant that becomes the default once resolved.
pub const TEST_TENANT_NAME: &str = "foo";

/// Root configuration for the test harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Remote GraphQL endpoint.
    pub endpoint: EndpointConfig,

    /// Default identity of the execution context.
    pub identity: IdentityConfig,

    /// Token signing settings.
    pub token: TokenConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote GraphQL endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// GraphQL URL of the API under test.
    pub url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000/graphql".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Default identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Space-delimited scope names.
    pub scopes: String,

    /// Tenant used until the test tenant has been resolved.
    pub fallback_tenant: String,

    /// Display name of the tenant to resolve at bootstrap.
    pub test_tenant_name: String,
}

impl IdentityConfig {
    /// Scopes as an ordered list, split on whitespace.
    pub fn scope_list(&self) -> Vec<String> {
        self.scopes.split_whitespace().map(str::to_string).collect()
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            scopes: DEFAULT_SCOPES.to_string(),
            fallback_tenant: FALLBACK_TENANT.to_string(),
            test_tenant_name: TEST_TENANT_NAME.to_string(),
        }
    }
}

/// JWT signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HMAC secret shared with the API under test.
    pub signing_secret: String,

    /// `iss` claim.
    pub issuer: String,

    /// Token lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            // Override with JWT_SIGNING_SECRET.
            signing_secret: "testctx-local-secret".to_string(),
            issuer: "gql-testctx".to_string(),
            ttl_secs: 3600,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, first one included.
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            delay_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
