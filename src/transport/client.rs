//! Authorized GraphQL transport over HTTP.
//!
//! # Responsibilities
//! - Build one authorized client per bearer token
//! - POST `{query, variables}` to the fixed endpoint
//! - Map HTTP, GraphQL and decode failures to `TransportError`
//! - Tag every attempt with an `X-Request-ID`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::config::EndpointConfig;
use crate::transport::request::{OperationRequest, OperationScope};
use crate::transport::types::{TransportError, TransportResult};

/// One GraphQL call; returns the `data` object of the response.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn run(
        &self,
        scope: &OperationScope,
        request: &OperationRequest,
    ) -> TransportResult<Value>;
}

/// Produces transports bound to a fixed endpoint for a given token.
pub trait TransportFactory: Send + Sync {
    fn new_client(&self, token: &str) -> Arc<dyn GraphqlTransport>;
}

/// Factory for [`HttpGraphqlClient`]s sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransportFactory {
    http: reqwest::Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpTransportFactory {
    pub fn new(config: &EndpointConfig) -> TransportResult<Self> {
        let endpoint = Url::parse(&config.url)
            .map_err(|e| TransportError::InvalidEndpoint(format!("'{}': {}", config.url, e)))?;
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            // The API under test is reached directly, never through a proxy.
            .no_proxy()
            .build()
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl TransportFactory for HttpTransportFactory {
    fn new_client(&self, token: &str) -> Arc<dyn GraphqlTransport> {
        Arc::new(HttpGraphqlClient {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            request_timeout: self.request_timeout,
            token: token.to_string(),
        })
    }
}

/// GraphQL client carrying a bearer token.
#[derive(Clone)]
pub struct HttpGraphqlClient {
    http: reqwest::Client,
    endpoint: Url,
    request_timeout: Duration,
    token: String,
}

impl std::fmt::Debug for HttpGraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGraphqlClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[async_trait]
impl GraphqlTransport for HttpGraphqlClient {
    async fn run(
        &self,
        scope: &OperationScope,
        request: &OperationRequest,
    ) -> TransportResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            request_id = %request_id,
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header("X-Request-ID", &request_id)
            .json(&request.body());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let timeout = match scope.remaining() {
            Some(left) => {
                builder = builder.timeout(left);
                left
            }
            None => self.request_timeout,
        };
        let failed = |e: reqwest::Error| TransportError::from_reqwest(e, timeout);

        let response = builder.send().await.map_err(failed)?;
        let status = response.status();
        let text = response.text().await.map_err(failed)?;

        if !status.is_success() {
            tracing::debug!(request_id = %request_id, status = %status, "GraphQL request rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_body(&text)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlBody {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// Extract `data` from a GraphQL response body.
pub fn parse_body(text: &str) -> TransportResult<Value> {
    let body: GraphqlBody =
        serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))?;

    if !body.errors.is_empty() {
        let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
        return Err(TransportError::Graphql(messages.join("; ")));
    }

    match body.data {
        Some(Value::Null) | None => Err(TransportError::Decode("response has no data".into())),
        Some(data) => Ok(data),
    }
}
