//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for a test run
//! - Configure log level from the environment or the config
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Safe to call from every test; only the first call installs

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global subscriber. Returns false if one was already set.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gql_testctx={}", config.log_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
