//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for binaries.
//!
//! Library crates only emit events; binaries call [`init_tracing`] once at
//! start-up. Events are written to standard error so that standard output
//! stays free for results.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::{LOG_ENV_VAR, LogConfig};

/// Builds the filter for `config`, preferring the `FILESTAGE_LOG` directive
/// when it is set and valid.
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(config.directive()))
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{LogConfig, init_tracing};
///
/// init_tracing(&LogConfig::from_verbose_level(1))?;
/// tracing::info!(target: "filestage::stage", "ready");
/// ```
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let with_time = config.timestamps.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.show_target)
    });
    let without_time = (!config.timestamps).then(|| {
        fmt::layer()
            .without_time()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.show_target)
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(with_time)
        .with(without_time)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn second_install_fails_instead_of_panicking() {
        let config = LogConfig {
            level: LogLevel::Error,
            ansi: false,
            timestamps: false,
            show_target: true,
        };
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
