//! Bearer token construction for simulated callers.
//!
//! # Responsibilities
//! - Turn a (tenant, scopes) pair into a signed JWT
//! - Reject scope names the space-joined claim cannot carry
//!
//! # Security
//! - Tokens are test credentials signed with a shared HMAC secret
//! - The secret is never logged

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::identity::types::TokenError;

/// Builds a bearer credential for a tenant and scope list.
pub trait TokenBuilder: Send + Sync {
    fn build(&self, tenant: &str, scopes: &[String]) -> Result<String, TokenError>;
}

/// Claims understood by the API under test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub tenant: String,
    /// Space-joined scope names.
    pub scopes: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 token builder.
pub struct JwtTokenBuilder {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl JwtTokenBuilder {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.signing_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl: Duration::seconds(config.ttl_secs as i64),
        }
    }

    fn claims(&self, tenant: &str, scopes: &[String]) -> Result<Claims, TokenError> {
        if let Some(bad) = scopes
            .iter()
            .find(|s| s.is_empty() || s.chars().any(char::is_whitespace))
        {
            return Err(TokenError::InvalidScope(bad.clone()));
        }

        let now = Utc::now();
        Ok(Claims {
            tenant: tenant.to_string(),
            scopes: scopes.join(" "),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }
}

impl TokenBuilder for JwtTokenBuilder {
    fn build(&self, tenant: &str, scopes: &[String]) -> Result<String, TokenError> {
        let claims = self.claims(tenant, scopes)?;
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for JwtTokenBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenBuilder")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}
