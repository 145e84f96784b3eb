//! GraphQL transport subsystem.
//!
//! # Data Flow
//! ```text
//! bearer token
//!     → TransportFactory::new_client (client.rs)
//!     → GraphqlTransport::run(scope, request)
//!         → HTTP POST, X-Request-ID, deadline from OperationScope
//!         → `data` object, or TransportError classified by ErrorKind
//! ```
//!
//! # Design Decisions
//! - Transport and factory are traits so tests can script the API
//! - Failures are classified here, where the error is created

pub mod client;
pub mod request;
pub mod types;

pub use client::{GraphqlTransport, HttpGraphqlClient, HttpTransportFactory, TransportFactory};
pub use request::{OperationRequest, OperationScope};
pub use types::{TransportError, TransportResult};
