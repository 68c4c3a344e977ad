//! crates/cli/src/error.rs
//! Front-end failures and their exit codes.

use std::io;
use std::path::PathBuf;

use filters::FilterError;
use item::LoadError;
use stage::{ConfigurationError, StageError};

/// Exit code for usage and configuration errors.
pub const EXIT_USAGE: i32 = 1;
/// Exit code for I/O errors.
pub const EXIT_IO: i32 = 2;
/// Exit code for fatal stage errors.
pub const EXIT_STAGE: i32 = 3;

/// Everything that can stop `filestage`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for this tool.
    #[error("invalid config {}: {source}", .path.display())]
    ParseConfig {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// An `--exclude` pattern did not compile.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A stage could not be built.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An operand could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),

    /// A stage failed fatally.
    #[error(transparent)]
    Stage(#[from] StageError),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ParseConfig { .. } | Self::Filter(_) | Self::Configuration(_) => EXIT_USAGE,
            Self::ReadConfig { .. } | Self::Load(_) | Self::Runtime(_) => EXIT_IO,
            Self::Stage(_) => EXIT_STAGE,
        }
    }
}
