//! crates/stage/src/error.rs
//! Error types for stage construction and execution.

use std::path::PathBuf;
use std::time::Duration;

/// Error returned by a transform callback.
pub type TransformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid stage construction, detected by
/// [`StageBuilder::build`](crate::StageBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The stage name is empty.
    #[error("stage name must not be empty")]
    EmptyName,
    /// No transform was supplied.
    #[error("stage '{stage}' has no transform")]
    MissingTransform {
        /// Name of the stage.
        stage: String,
    },
}

/// Fault that stops a stage.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// An item carried unbuffered streaming content. Ends the pipeline.
    #[error("stage '{stage}': streaming content is not supported ({})", .path.display())]
    StreamingUnsupported {
        /// Name of the stage.
        stage: String,
        /// Path of the offending item.
        path: PathBuf,
    },

    /// The stage already finished or aborted.
    #[error("stage '{stage}' is closed")]
    Closed {
        /// Name of the stage.
        stage: String,
    },

    /// Cancellation was requested.
    #[error("stage '{stage}' was cancelled")]
    Cancelled {
        /// Name of the stage.
        stage: String,
    },

    /// The downstream receiver went away before the stage finished.
    #[error("stage '{stage}': downstream receiver closed")]
    DownstreamClosed {
        /// Name of the stage.
        stage: String,
    },

    /// The task driving the stage panicked or was aborted.
    #[error("stage '{stage}' task failed: {reason}")]
    TaskFailed {
        /// Name of the stage.
        stage: String,
        /// Join error text.
        reason: String,
    },
}

impl StageError {
    /// Name of the stage that raised the error.
    #[must_use]
    pub fn stage(&self) -> &str {
        match self {
            Self::StreamingUnsupported { stage, .. }
            | Self::Closed { stage }
            | Self::Cancelled { stage }
            | Self::DownstreamClosed { stage }
            | Self::TaskFailed { stage, .. } => stage,
        }
    }

    /// Returns `true` when the error only reflects a failure further down
    /// the pipeline.
    #[must_use]
    pub const fn is_downstream_closed(&self) -> bool {
        matches!(self, Self::DownstreamClosed { .. })
    }
}

/// The per-item timeout elapsed before the transform finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transform did not finish within {}ms", .after.as_millis())]
pub struct ItemTimeout {
    /// Configured limit.
    pub after: Duration,
}

/// A transform or finalize hook panicked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transform panicked: {message}")]
pub struct TransformPanic {
    /// Panic payload text, when it was a string.
    pub message: String,
}

impl TransformPanic {
    pub(crate) fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string payload".to_owned());
        Self { message }
    }
}
