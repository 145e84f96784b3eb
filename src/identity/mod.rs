//! Identity subsystem.
//!
//! # Data Flow
//! ```text
//! (tenant, scopes)
//!     → types.rs (Identity value)
//!     → token.rs (TokenBuilder → signed bearer token)
//!     → transport factory (authorized client)
//! ```
//!
//! # Design Decisions
//! - Token building is a trait so tests can count or reject builds
//! - Token failures are never retried; they are not network conditions

pub mod token;
pub mod types;

pub use token::{Claims, JwtTokenBuilder, TokenBuilder};
pub use types::{Identity, TokenError, EMPTY_TENANT};
