//! crates/stage/src/builder.rs
//! Eager construction and validation of stages.

use std::sync::Arc;
use std::time::Duration;

use logging::{ErrorReporter, TracingReporter};
use tokio_util::sync::CancellationToken;

use crate::{ConfigurationError, ItemTransform, Stage, StageConfig};

/// Builds a [`Stage`]. Missing pieces are rejected by [`build`](Self::build)
/// rather than at the first item.
///
/// ```
/// use stage::{Outcome, StageBuilder, from_fn};
///
/// let stage = StageBuilder::new("noop")
///     .transform(from_fn(|_item, _context| Ok(Outcome::Keep)))
///     .build()
///     .unwrap();
/// assert_eq!(stage.name(), "noop");
///
/// assert!(StageBuilder::new("empty").build().is_err());
/// ```
pub struct StageBuilder {
    name: String,
    supports_directories: bool,
    supports_any_type: bool,
    transform: Option<Box<dyn ItemTransform>>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    item_timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl StageBuilder {
    /// Starts a builder for a stage called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_directories: false,
            supports_any_type: false,
            transform: None,
            reporter: None,
            item_timeout: None,
            cancel: None,
        }
    }

    /// Applies the flags and timeout from `config`.
    #[must_use]
    pub fn config(mut self, config: &StageConfig) -> Self {
        self.supports_directories = config.supports_directories;
        self.supports_any_type = config.supports_any_type;
        self.item_timeout = config.item_timeout();
        self
    }

    /// Lets the transform see directory markers.
    #[must_use]
    pub const fn supports_directories(mut self, enabled: bool) -> Self {
        self.supports_directories = enabled;
        self
    }

    /// Lets the transform see every kind of item.
    #[must_use]
    pub const fn supports_any_type(mut self, enabled: bool) -> Self {
        self.supports_any_type = enabled;
        self
    }

    /// Sets the per-item transform and finalize hook.
    #[must_use]
    pub fn transform<T: ItemTransform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Sets the reporter. Defaults to [`TracingReporter`].
    #[must_use]
    pub fn reporter<R: ErrorReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Some(Arc::new(reporter));
        self
    }

    /// Bounds each `on_item` call. An elapsed timeout is a per-item failure.
    #[must_use]
    pub const fn item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = Some(timeout);
        self
    }

    /// Aborts the stage between items once `token` is cancelled.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validates the inputs and creates the stage.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::EmptyName`] for a blank name,
    /// [`ConfigurationError::MissingTransform`] when no transform was set.
    pub fn build(self) -> Result<Stage, ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        let Some(transform) = self.transform else {
            return Err(ConfigurationError::MissingTransform { stage: self.name });
        };
        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(TracingReporter) as Arc<dyn ErrorReporter>);

        Ok(Stage::new(
            self.name,
            self.supports_directories || self.supports_any_type,
            transform,
            reporter,
            self.item_timeout,
            self.cancel,
        ))
    }
}
