//! Startup sequence resolving the default tenant.
//!
//! # Phases
//! ```text
//! Uninitialized
//!     → Bootstrapping: context with fallback tenant, tenants query
//!     → Ready: context rebuilt for the resolved tenant
//! ```
//! Any failure is terminal; there is no degraded mode.

use std::sync::Arc;

use thiserror::Error;

use crate::config::HarnessConfig;
use crate::execution::{Collaborators, ContextConfig, ExecutionContext, ExecutionError};
use crate::tenants::directory::{Tenant, TenantDirectory};
use crate::transport::{OperationRequest, OperationScope, TransportError};

/// Lists every tenant known to the API.
pub const TENANTS_QUERY: &str = r#"query {
    result: tenants {
        id
        name
        internalID
    }
}"#;

/// Errors that abort bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("while setting up transport: {0}")]
    Transport(TransportError),

    #[error("while test context setup: {0}")]
    Setup(ExecutionError),

    #[error("while getting default tenant: {0}")]
    TenantQuery(ExecutionError),

    #[error("while test context with internal tenant setup: {0}")]
    Resolve(ExecutionError),
}

/// Outcome of the first phase: everything the final context needs.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: ContextConfig,
    pub tenants: TenantDirectory,
    /// True when the test tenant was found and is now the default.
    pub default_tenant_resolved: bool,
}

/// Phase one: query the tenants through a fallback context.
pub async fn resolve(
    settings: ContextConfig,
    test_tenant_name: &str,
    collaborators: &Collaborators,
) -> Result<ResolvedConfig, BootstrapError> {
    let fallback = ExecutionContext::new(settings.clone(), collaborators.clone())
        .map_err(BootstrapError::Setup)?;
    tracing::info!(fallback_tenant = %fallback.default_tenant(), "Resolving default tenant");

    let mut tenants: Vec<Tenant> = Vec::new();
    fallback
        .run(
            &OperationScope::background(),
            &OperationRequest::new(TENANTS_QUERY),
            &mut tenants,
        )
        .await
        .map_err(BootstrapError::TenantQuery)?;

    let directory = TenantDirectory::from_tenants(&tenants);
    let resolved = directory.get(test_tenant_name).map(str::to_string);

    let settings = match &resolved {
        Some(id) => {
            tracing::info!(
                tenant = %test_tenant_name,
                internal_id = %id,
                "Default tenant resolved"
            );
            settings.with_default_tenant(id.clone())
        }
        None => {
            tracing::warn!(
                tenant = %test_tenant_name,
                known = directory.len(),
                "Test tenant not found; keeping fallback tenant"
            );
            settings
        }
    };

    Ok(ResolvedConfig {
        settings,
        tenants: directory,
        default_tenant_resolved: resolved.is_some(),
    })
}

/// A ready harness: the final execution context plus the tenant directory.
#[derive(Debug, Clone)]
pub struct Harness {
    context: Arc<ExecutionContext>,
    tenants: Arc<TenantDirectory>,
    default_tenant_resolved: bool,
}

impl Harness {
    /// Phase two: build the final context from a resolved configuration.
    pub fn from_resolved(
        resolved: ResolvedConfig,
        collaborators: Collaborators,
    ) -> Result<Self, BootstrapError> {
        let context = ExecutionContext::new(resolved.settings, collaborators)
            .map_err(BootstrapError::Resolve)?;
        Ok(Self {
            context: Arc::new(context),
            tenants: Arc::new(resolved.tenants),
            default_tenant_resolved: resolved.default_tenant_resolved,
        })
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn shared_context(&self) -> Arc<ExecutionContext> {
        self.context.clone()
    }

    pub fn tenants(&self) -> &TenantDirectory {
        &self.tenants
    }

    pub fn default_tenant(&self) -> &str {
        self.context.default_tenant()
    }

    pub fn default_tenant_resolved(&self) -> bool {
        self.default_tenant_resolved
    }
}

/// Run both phases with the given collaborators.
pub async fn bootstrap(
    config: &HarnessConfig,
    collaborators: Collaborators,
) -> Result<Harness, BootstrapError> {
    let resolved = resolve(
        ContextConfig::from_config(config),
        &config.identity.test_tenant_name,
        &collaborators,
    )
    .await?;
    Harness::from_resolved(resolved, collaborators)
}

/// Bootstrap against the configured HTTP endpoint with JWT tokens.
pub async fn bootstrap_http(config: &HarnessConfig) -> Result<Harness, BootstrapError> {
    let collaborators = Collaborators::from_config(config).map_err(BootstrapError::Transport)?;
    bootstrap(config, collaborators).await
}

/// Like [`bootstrap`], but a failure aborts the test process.
pub async fn bootstrap_or_abort(config: &HarnessConfig, collaborators: Collaborators) -> Harness {
    match bootstrap(config, collaborators).await {
        Ok(harness) => harness,
        Err(e) => {
            tracing::error!(error = %e, "Harness bootstrap failed");
            panic!("harness bootstrap failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_aliases_result() {
        assert!(TENANTS_QUERY.contains("result: tenants"));
        assert!(TENANTS_QUERY.contains("internalID"));
    }

    #[test]
    fn test_wrapped_error_printed_once_in_chain() {
        let err = BootstrapError::TenantQuery(ExecutionError::Transport(
            TransportError::connection("connection refused"),
        ));
        assert_eq!(
            crate::resilience::classify::error_chain(&err),
            "while getting default tenant: connection refused"
        );
        assert!(std::error::Error::source(&err).is_none());
    }
}
