//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HarnessConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Scope override, space-delimited.
pub const SCOPES_ENV_VAR: &str = "ALL_SCOPES";
/// GraphQL endpoint override.
pub const ENDPOINT_ENV_VAR: &str = "DIRECTOR_URL";
/// Fallback tenant override.
pub const DEFAULT_TENANT_ENV_VAR: &str = "DEFAULT_TENANT";
/// Token signing secret override.
pub const SIGNING_SECRET_ENV_VAR: &str = "JWT_SIGNING_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML file, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: HarnessConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        path = %path.display(),
        endpoint = %config.endpoint.url,
        "Configuration loaded"
    );
    Ok(config)
}

impl HarnessConfig {
    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Overlay environment-style values onto `config`. Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut HarnessConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(scopes) = get(SCOPES_ENV_VAR) {
        config.identity.scopes = scopes;
    }
    if let Some(url) = get(ENDPOINT_ENV_VAR) {
        config.endpoint.url = url;
    }
    if let Some(tenant) = get(DEFAULT_TENANT_ENV_VAR) {
        config.identity.fallback_tenant = tenant;
    }
    if let Some(secret) = get(SIGNING_SECRET_ENV_VAR) {
        config.token.signing_secret = secret;
    }
}
