//! Identity value type and token errors.

use std::collections::BTreeSet;

use thiserror::Error;

/// Tenant value meaning "no tenant".
pub const EMPTY_TENANT: &str = "";

/// Simulated caller: a tenant plus the scopes it was granted.
#[derive(Debug, Clone, Eq)]
pub struct Identity {
    pub tenant: String,
    pub scopes: Vec<String>,
}

impl Identity {
    pub fn new(tenant: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            tenant: tenant.into(),
            scopes,
        }
    }

    /// Identity that carries scopes but no tenant.
    pub fn without_tenant(scopes: Vec<String>) -> Self {
        Self::new(EMPTY_TENANT, scopes)
    }

    pub fn has_tenant(&self) -> bool {
        !self.tenant.is_empty()
    }

    fn scope_set(&self) -> BTreeSet<&str> {
        self.scopes.iter().map(String::as_str).collect()
    }
}

// Scope order does not change what a token grants.
impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.tenant == other.tenant && self.scope_set() == other.scope_set()
    }
}

/// Errors raised while turning an identity into a bearer token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Scope name the token format cannot carry.
    #[error("invalid scope {0:?}")]
    InvalidScope(String),

    /// Encoding or signing failed.
    #[error("signing failed: {0}")]
    Signing(String),
}
