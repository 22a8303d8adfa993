//! Logging setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::SdkConfig;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `level`
/// for this SDK and the math crate.
///
/// Calling this more than once is harmless; the first subscriber wins.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("clmm_sdk={},clmm_core={}", level, level).into());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Install logging at the configured level
pub fn init_from_config(config: &SdkConfig) {
    init_tracing(&config.log_level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("debug");
        init_tracing("info");
        init_from_config(&SdkConfig::default());
    }
}
