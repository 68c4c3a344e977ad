//! crates/stage/src/pipeline.rs
//! Chains stages into a pipeline of spawned tasks.
//!
//! Each stage runs in its own tokio task. Consecutive stages are connected
//! by bounded `tokio::sync::mpsc` channels, so items move through the chain
//! in input order while later stages work on earlier items.

use item::Item;
use logging::trace_stage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::clamp_capacity;
use crate::{DEFAULT_CHANNEL_CAPACITY, Stage, StageError, StageReport, run_stage};

/// Items emitted by the last stage, plus one report per stage.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Emitted items in order.
    pub items: Vec<Item>,
    /// Stage reports in pipeline order.
    pub reports: Vec<StageReport>,
}

/// An ordered chain of stages.
///
/// ```
/// use item::Item;
/// use stage::{Outcome, Pipeline, StageBuilder, from_fn};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let drop_empty = StageBuilder::new("drop-empty")
///     .transform(from_fn(|item, _context| {
///         Ok(if item.content_len() == 0 { Outcome::Drop } else { Outcome::Keep })
///     }))
///     .build()
///     .unwrap();
///
/// let items = vec![
///     Item::new("/src/a.txt", "a.txt").with_contents("a"),
///     Item::new("/src/b.txt", "b.txt"),
/// ];
/// let output = Pipeline::new().stage(drop_empty).run(items).await.unwrap();
/// assert_eq!(output.items.len(), 1);
/// assert_eq!(output.reports[0].counters.dropped, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
    capacity: usize,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates an empty pipeline with the default channel capacity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stages: Vec::new(),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Sets the capacity of every inter-stage channel, clamped to `1..=1024`.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = clamp_capacity(capacity);
        self
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` when the pipeline has no stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Feeds `items` through every stage and collects the result.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`StageError`] in pipeline order. Errors that
    /// only report a closed downstream channel are returned when no stage
    /// raised anything else.
    pub async fn run<I>(self, items: I) -> Result<PipelineOutput, StageError>
    where
        I: IntoIterator<Item = Item>,
    {
        let (source_tx, mut rx) = mpsc::channel::<Item>(self.capacity);
        let mut tasks: Vec<(String, JoinHandle<Result<StageReport, StageError>>)> =
            Vec::with_capacity(self.stages.len());

        for stage in self.stages {
            let (tx, next_rx) = mpsc::channel(self.capacity);
            let name = stage.name().to_owned();
            trace_stage!(stage = %name, "spawning");
            tasks.push((name, tokio::spawn(run_stage(stage, rx, tx))));
            rx = next_rx;
        }

        let produce = async move {
            for item in items {
                if source_tx.send(item).await.is_err() {
                    break;
                }
            }
        };
        let collect = async move {
            let mut collected = Vec::new();
            while let Some(item) = rx.recv().await {
                collected.push(item);
            }
            collected
        };
        let ((), collected) = tokio::join!(produce, collect);

        let mut reports = Vec::with_capacity(tasks.len());
        let mut fatal: Option<StageError> = None;
        for (stage, task) in tasks {
            let result = task.await.unwrap_or_else(|join_error| {
                Err(StageError::TaskFailed {
                    stage,
                    reason: join_error.to_string(),
                })
            });
            match result {
                Ok(report) => reports.push(report),
                Err(error) => {
                    let replace = match &fatal {
                        None => true,
                        Some(current) => current.is_downstream_closed() && !error.is_downstream_closed(),
                    };
                    if replace {
                        fatal = Some(error);
                    }
                }
            }
        }

        match fatal {
            Some(error) => Err(error),
            None => Ok(PipelineOutput {
                items: collected,
                reports,
            }),
        }
    }
}
