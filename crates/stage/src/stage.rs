//! crates/stage/src/stage.rs
//! The per-item algorithm and finalize for a single stage.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use item::Item;
use logging::{ErrorReporter, Report, trace_stage, trace_summary};
use tokio_util::sync::CancellationToken;

use crate::{
    Counters, ItemTimeout, ItemTransform, Outcome, StageContext, StageError, TransformError,
    TransformPanic,
};

/// Lifecycle position of a [`Stage`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageState {
    /// Waiting for the next item.
    Idle,
    /// A transform call is in flight.
    Processing,
    /// The finalize hook is running.
    Finalizing,
    /// Finalize completed.
    Done,
    /// A fatal fault or cancellation stopped the stage.
    Aborted,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        })
    }
}

/// How the finalize step ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FinalizeStatus {
    /// The hook ran and succeeded (or there was none).
    Completed,
    /// The hook ran and failed; the error was reported.
    Failed(String),
    /// The stage aborted, so the hook did not run.
    Skipped,
}

/// Summary of one stage after finalize.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StageReport {
    /// Stage name.
    pub stage: String,
    /// Built-in counters.
    pub counters: Counters,
    /// Counters kept by the transform.
    pub named: BTreeMap<String, u64>,
    /// Outcome of the finalize step.
    pub finalize: FinalizeStatus,
}

impl StageReport {
    /// Value of a named counter; unknown names read as zero.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.named.get(name).copied().unwrap_or(0)
    }
}

/// A transform wrapped with one-in/one-out semantics.
///
/// Items are handled strictly one at a time. Per-item failures are reported
/// and the original item is forwarded; streaming content aborts the stage.
/// Create stages with [`StageBuilder`](crate::StageBuilder).
pub struct Stage {
    accepts_directories: bool,
    transform: Box<dyn ItemTransform>,
    reporter: Arc<dyn ErrorReporter>,
    item_timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
    context: StageContext,
    state: StageState,
}

impl Stage {
    pub(crate) fn new(
        name: String,
        accepts_directories: bool,
        transform: Box<dyn ItemTransform>,
        reporter: Arc<dyn ErrorReporter>,
        item_timeout: Option<Duration>,
        cancel: Option<CancellationToken>,
    ) -> Self {
        Self {
            accepts_directories,
            transform,
            reporter,
            item_timeout,
            cancel,
            context: StageContext::new(name),
            state: StageState::Idle,
        }
    }

    /// Stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.context.stage_name()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StageState {
        self.state
    }

    /// The stage context, including counters.
    #[must_use]
    pub const fn context(&self) -> &StageContext {
        &self.context
    }

    /// Whether directory markers reach the transform.
    #[must_use]
    pub const fn accepts_directories(&self) -> bool {
        self.accepts_directories
    }

    /// Configured per-item timeout.
    #[must_use]
    pub const fn item_timeout(&self) -> Option<Duration> {
        self.item_timeout
    }

    /// Cancellation token, if one was configured.
    #[must_use]
    pub const fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Processes one item.
    ///
    /// Returns the item to forward, or `None` when the transform dropped it.
    /// A transform that errors, panics or times out forwards the original.
    ///
    /// # Errors
    ///
    /// - [`StageError::StreamingUnsupported`] for streaming content; the
    ///   stage aborts.
    /// - [`StageError::Cancelled`] when the cancellation token fired; the
    ///   stage aborts.
    /// - [`StageError::Closed`] when the stage already aborted.
    pub async fn process(&mut self, item: Item) -> Result<Option<Item>, StageError> {
        if self.state != StageState::Idle {
            return Err(StageError::Closed {
                stage: self.name().to_owned(),
            });
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(self.abort_cancelled());
        }
        if item.content().is_stream() {
            return Err(self.abort_streaming(&item));
        }

        self.context.counters_mut().received += 1;

        if item.is_directory() && !self.accepts_directories {
            self.context.counters_mut().passed_through += 1;
            return Ok(Some(item));
        }

        self.state = StageState::Processing;
        let result = self.invoke(&item).await;
        self.state = StageState::Idle;

        let counters = self.context.counters_mut();
        match result {
            Ok(Outcome::Keep) => {
                counters.kept += 1;
                Ok(Some(item))
            }
            Ok(Outcome::Replace(replacement)) => {
                counters.replaced += 1;
                Ok(Some(replacement))
            }
            Ok(Outcome::Drop) => {
                counters.dropped += 1;
                Ok(None)
            }
            Err(error) => {
                counters.failed += 1;
                if error.is::<ItemTimeout>() {
                    counters.timed_out += 1;
                }
                let message = format!("{}: {error}", item.relative_path().display());
                self.reporter
                    .report(&Report::error(self.context.stage_name(), &*error).with_message(&message));
                Ok(Some(item))
            }
        }
    }

    async fn invoke(&mut self, item: &Item) -> Result<Outcome, TransformError> {
        let future = guarded(|| self.transform.on_item(item, &mut self.context));
        match self.item_timeout {
            Some(limit) => match tokio::time::timeout(limit, future).await {
                Ok(result) => result,
                Err(_) => Err(ItemTimeout { after: limit }.into()),
            },
            None => future.await,
        }
    }

    pub(crate) fn abort_cancelled(&mut self) -> StageError {
        self.state = StageState::Aborted;
        trace_stage!(stage = %self.name(), "cancelled");
        StageError::Cancelled {
            stage: self.name().to_owned(),
        }
    }

    fn abort_streaming(&mut self, item: &Item) -> StageError {
        self.state = StageState::Aborted;
        let error = StageError::StreamingUnsupported {
            stage: self.name().to_owned(),
            path: item.path().to_path_buf(),
        };
        self.reporter.report(&Report::error(self.name(), &error));
        error
    }

    /// Runs the finalize hook once and returns the stage summary.
    ///
    /// Finalize failures are reported and recorded in the summary; they do
    /// not fail the stage. An aborted stage skips the hook.
    pub async fn finalize(mut self) -> StageReport {
        let status = if self.state == StageState::Aborted {
            trace_stage!(stage = %self.name(), "aborted, finalize skipped");
            FinalizeStatus::Skipped
        } else {
            self.state = StageState::Finalizing;
            let status = match guarded(|| self.transform.on_finalize(&mut self.context)).await {
                Ok(()) => FinalizeStatus::Completed,
                Err(error) => {
                    let message = format!("finalize failed: {error}");
                    self.reporter.report(
                        &Report::error(self.context.stage_name(), &*error).with_message(&message),
                    );
                    FinalizeStatus::Failed(error.to_string())
                }
            };
            self.state = StageState::Done;
            status
        };

        let (stage, counters, named) = self.context.into_parts();
        trace_summary!(
            stage = %stage,
            received = counters.received,
            emitted = counters.emitted(),
            failed = counters.failed,
            "stage finished"
        );
        StageReport {
            stage,
            counters,
            named,
            finalize: status,
        }
    }
}

/// Runs a transform callback, turning a panic in the call or its future
/// into a [`TransformPanic`].
async fn guarded<C, F, T>(call: C) -> Result<T, TransformError>
where
    C: FnOnce() -> F,
    F: Future<Output = Result<T, TransformError>>,
{
    match AssertUnwindSafe(async move { call().await }).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(TransformPanic::from_payload(&*payload).into()),
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name())
            .field("state", &self.state)
            .field("accepts_directories", &self.accepts_directories)
            .field("item_timeout", &self.item_timeout)
            .field("counters", self.context.counters())
            .finish_non_exhaustive()
    }
}
