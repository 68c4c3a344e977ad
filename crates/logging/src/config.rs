//! crates/logging/src/config.rs
//! Output configuration for the tracing subscriber.

use crate::LogLevel;

/// Environment variable that overrides [`LogConfig::level`] with a full
/// `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "FILESTAGE_LOG";

/// Controls how [`init_tracing`](crate::init_tracing) renders events.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LogConfig {
    /// Maximum level recorded.
    pub level: LogLevel,
    /// Emit ANSI colour codes.
    pub ansi: bool,
    /// Prefix events with a timestamp.
    pub timestamps: bool,
    /// Show the event target (`filestage::stage`, ...).
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            ansi: true,
            timestamps: true,
            show_target: false,
        }
    }
}

impl LogConfig {
    /// Creates a configuration for a `-v` count (see [`LogLevel::from_verbose_level`]).
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        Self {
            level: LogLevel::from_verbose_level(level),
            ..Self::default()
        }
    }

    /// Raises the level to at least `level`; never lowers it.
    #[must_use]
    pub fn at_least(mut self, level: LogLevel) -> Self {
        self.level = self.level.max(level);
        self
    }

    /// Returns the filter directive for the configured level.
    #[must_use]
    pub fn directive(&self) -> &'static str {
        self.level.as_str()
    }
}
