use std::io;
use std::path::PathBuf;

/// Error returned when an item cannot be loaded from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading metadata or contents failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The path is neither a regular file nor a directory.
    #[error("'{}' is not a regular file or directory", .0.display())]
    Unsupported(PathBuf),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, LoadError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, LoadError> {
        self.map_err(|e| LoadError::io(path, e))
    }
}
