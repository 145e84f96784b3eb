//! Execution context settings, collaborators and errors.

use std::sync::Arc;

use thiserror::Error;

use crate::config::HarnessConfig;
use crate::identity::{JwtTokenBuilder, TokenBuilder, TokenError};
use crate::resilience::{ErrorKind, Retryable, RetryPolicy};
use crate::transport::{HttpTransportFactory, TransportError, TransportFactory};

/// Errors returned by the execution entry points.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The token builder rejected the identity. Never retried.
    #[error("while building token: {0}")]
    TokenBuild(TokenError),

    /// The call failed; after retries, this is the last error seen.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Retryable for ExecutionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::TokenBuild(_) => ErrorKind::Permanent,
            Self::Transport(e) => e.kind(),
        }
    }
}

/// Result type for execution entry points.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Default identity and retry policy of an execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub default_tenant: String,
    pub scopes: Vec<String>,
    pub retry: RetryPolicy,
}

impl ContextConfig {
    /// Settings before bootstrap: the fallback tenant is the default.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            default_tenant: config.identity.fallback_tenant.clone(),
            scopes: config.identity.scope_list(),
            retry: RetryPolicy::from_config(&config.retries),
        }
    }

    pub fn with_default_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.default_tenant = tenant.into();
        self
    }
}

/// The token builder and transport factory an execution context uses.
#[derive(Clone)]
pub struct Collaborators {
    pub tokens: Arc<dyn TokenBuilder>,
    pub transports: Arc<dyn TransportFactory>,
}

impl Collaborators {
    pub fn new(tokens: Arc<dyn TokenBuilder>, transports: Arc<dyn TransportFactory>) -> Self {
        Self { tokens, transports }
    }

    /// JWT tokens and the HTTP transport, both from `config`.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, TransportError> {
        Ok(Self {
            tokens: Arc::new(JwtTokenBuilder::new(&config.token)),
            transports: Arc::new(HttpTransportFactory::new(&config.endpoint)?),
        })
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
