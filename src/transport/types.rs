//! Transport error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::resilience::classify::{
    classify_error, classify_message, error_chain, ErrorKind, Retryable,
};

/// Errors that can occur during one GraphQL call.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Could not reach the API or the connection broke.
    #[error("{message}")]
    Connection { kind: ErrorKind, message: String },

    /// The operation scope's deadline passed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx HTTP response.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered with a GraphQL `errors` array.
    #[error("graphql: {0}")]
    Graphql(String),

    /// The body could not be mapped to the expected shape.
    #[error("decoding response: {0}")]
    Decode(String),

    /// The endpoint URL or HTTP client could not be set up.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    /// Connection failure classified by its text.
    pub fn connection(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Connection {
            kind: classify_message(&message),
            message,
        }
    }

    /// Map a reqwest failure; `timeout` is the limit the request ran under.
    pub fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            return Self::Timeout(timeout);
        }
        if e.is_decode() {
            return Self::Decode(error_chain(&e));
        }
        Self::Connection {
            kind: classify_error(&e),
            message: error_chain(&e),
        }
    }
}

impl Retryable for TransportError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { kind, .. } => *kind,
            Self::InvalidEndpoint(_) => ErrorKind::Misuse,
            _ => ErrorKind::Permanent,
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_classification() {
        assert!(TransportError::connection("dial tcp: connection refused").is_transient());
        assert!(TransportError::connection("read: connection reset by peer").is_transient());
        assert!(!TransportError::connection("no route to host").is_transient());
    }

    #[test]
    fn test_non_connection_errors_are_permanent() {
        let errors = [
            TransportError::Timeout(Duration::from_secs(1)),
            TransportError::Status {
                status: 502,
                body: "connection refused".into(),
            },
            TransportError::Graphql("connection refused".into()),
            TransportError::Decode("eof".into()),
        ];
        for e in errors {
            assert_eq!(e.kind(), ErrorKind::Permanent, "{}", e);
        }
        assert_eq!(TransportError::InvalidEndpoint("x".into()).kind(), ErrorKind::Misuse);
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Graphql("Cannot query field \"x\" on type \"Query\"".into());
        assert_eq!(err.to_string(), "graphql: Cannot query field \"x\" on type \"Query\"");
    }
}
