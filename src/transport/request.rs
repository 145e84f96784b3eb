//! Operation request and execution scope.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::transport::types::TransportError;

/// A GraphQL document plus variables, passed to the API untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    query: String,
    variables: Map<String, Value>,
    headers: Vec<(String, String)>,
}

/// JSON body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    pub query: &'a str,
    pub variables: &'a Map<String, Value>,
}

impl OperationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            headers: Vec::new(),
        }
    }

    /// Set a variable.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Add a header sent with every attempt.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: &self.query,
            variables: &self.variables,
        }
    }
}

/// Caller-owned deadline for an operation, retries included.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationScope {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl OperationScope {
    /// No deadline; only the transport's own timeout applies.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            timeout: Some(timeout),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` if unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }

    /// Run `fut` under the scope's deadline.
    pub async fn bound<T, F>(&self, fut: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        match self.remaining() {
            None => fut.await,
            Some(left) if left.is_zero() => {
                Err(TransportError::Timeout(self.timeout.unwrap_or_default()))
            }
            Some(left) => tokio::time::timeout(left, fut)
                .await
                .unwrap_or(Err(TransportError::Timeout(left))),
        }
    }
}
