//! Execution context: runs GraphQL operations as a chosen identity.
//!
//! # Responsibilities
//! - Hold the default identity and its authorized transport
//! - Build a fresh token and transport for every custom identity
//! - Run each call under the retry policy and unwrap `result`

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::execution::envelope::ResultMapper;
use crate::execution::types::{Collaborators, ContextConfig, ExecutionError, ExecutionResult};
use crate::identity::{Identity, TokenBuilder};
use crate::observability::metrics;
use crate::resilience::RetryPolicy;
use crate::transport::{GraphqlTransport, OperationRequest, OperationScope, TransportFactory};

/// Immutable once built; share it behind an `Arc` between tests.
pub struct ExecutionContext {
    current_scopes: Vec<String>,
    default_tenant: String,
    retry: RetryPolicy,
    tokens: Arc<dyn TokenBuilder>,
    transports: Arc<dyn TransportFactory>,
    client: Arc<dyn GraphqlTransport>,
}

impl ExecutionContext {
    /// Build the default token and transport for `settings`.
    pub fn new(settings: ContextConfig, collaborators: Collaborators) -> ExecutionResult<Self> {
        let token = collaborators
            .tokens
            .build(&settings.default_tenant, &settings.scopes)
            .map_err(ExecutionError::TokenBuild)?;
        let client = collaborators.transports.new_client(&token);

        tracing::debug!(
            default_tenant = %settings.default_tenant,
            scopes = settings.scopes.len(),
            "Execution context created"
        );

        Ok(Self {
            current_scopes: settings.scopes,
            default_tenant: settings.default_tenant,
            retry: settings.retry,
            tokens: collaborators.tokens,
            transports: collaborators.transports,
            client,
        })
    }

    pub fn current_scopes(&self) -> &[String] {
        &self.current_scopes
    }

    pub fn default_tenant(&self) -> &str {
        &self.default_tenant
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// The identity behind [`run`](Self::run).
    pub fn default_identity(&self) -> Identity {
        Identity::new(self.default_tenant.clone(), self.current_scopes.clone())
    }

    /// Run `request` as the default identity.
    pub async fn run<T: DeserializeOwned>(
        &self,
        scope: &OperationScope,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let result = self.execute(self.client.as_ref(), scope, request, target).await;
        metrics::record_operation("run", result.is_ok());
        result
    }

    /// Run `request` as `tenant` with the default scopes.
    pub async fn run_with_tenant<T: DeserializeOwned>(
        &self,
        scope: &OperationScope,
        tenant: &str,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let identity = Identity::new(tenant, self.current_scopes.clone());
        let result = self.run_custom(identity, scope, request, target).await;
        metrics::record_operation("run_with_tenant", result.is_ok());
        result
    }

    /// Run `request` as the default tenant with `scopes`.
    pub async fn run_with_scopes<T: DeserializeOwned>(
        &self,
        scope: &OperationScope,
        scopes: Vec<String>,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let identity = Identity::new(self.default_tenant.clone(), scopes);
        let result = self.run_custom(identity, scope, request, target).await;
        metrics::record_operation("run_with_scopes", result.is_ok());
        result
    }

    /// Run `request` with the default scopes and no tenant.
    pub async fn run_without_tenant<T: DeserializeOwned>(
        &self,
        scope: &OperationScope,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let identity = Identity::without_tenant(self.current_scopes.clone());
        let result = self.run_custom(identity, scope, request, target).await;
        metrics::record_operation("run_without_tenant", result.is_ok());
        result
    }

    async fn run_custom<T: DeserializeOwned>(
        &self,
        identity: Identity,
        scope: &OperationScope,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let token = self
            .tokens
            .build(&identity.tenant, &identity.scopes)
            .map_err(ExecutionError::TokenBuild)?;
        let client = self.transports.new_client(&token);

        tracing::debug!(
            tenant = %identity.tenant,
            scopes = identity.scopes.len(),
            "Running operation as custom identity"
        );
        self.execute(client.as_ref(), scope, request, target).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        client: &dyn GraphqlTransport,
        scope: &OperationScope,
        request: &OperationRequest,
        target: &mut T,
    ) -> ExecutionResult<()> {
        let mut mapper = ResultMapper::for_target(target);

        let data = self
            .retry
            .run(|| scope.bound(client.run(scope, request)))
            .await?;
        mapper.absorb(data)?;
        Ok(())
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("default_tenant", &self.default_tenant)
            .field("current_scopes", &self.current_scopes)
            .field("retry", &self.retry)
            .finish()
    }
}
