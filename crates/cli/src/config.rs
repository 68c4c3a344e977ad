//! crates/cli/src/config.rs
//! The TOML configuration file.
//!
//! ```toml
//! exclude = ["node_modules", "*.map"]
//!
//! [logging]
//! level = "info"
//!
//! [stage]
//! item_timeout_ms = 500
//!
//! [condition]
//! extensions = [".css", ".js"]
//! modified_after = "2024-01-01"
//! ```

use std::fs;
use std::path::Path;

use filters::{Condition, ExcludeList};
use logging::LogConfig;
use stage::StageConfig;

use crate::CliError;

/// Parsed configuration file. Every section is optional.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Tracing output.
    pub logging: LogConfig,
    /// Settings shared by the pipeline's stages.
    pub stage: StageConfig,
    /// Which items are selected. Defaults to `true`.
    pub condition: Condition,
    /// Relative-path patterns removed before selection.
    pub exclude: ExcludeList,
}

impl FileConfig {
    /// Reads and parses `path`.
    ///
    /// # Errors
    ///
    /// [`CliError::ReadConfig`] when the file cannot be read,
    /// [`CliError::ParseConfig`] when it is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed text, unknown keys, bad dates
    /// or invalid exclude globs.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
