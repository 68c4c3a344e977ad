//! crates/cli/src/gate.rs
//! The exclude and select stages run by the front end.

use filters::{Condition, ExcludeList};
use logging::trace_summary;
use stage::{
    Conditional, ConfigurationError, MET_COUNTER, NOT_MET_COUNTER, Outcome, Pipeline, Stage,
    StageBuilder, StageConfig, StageReport, from_fn,
};

/// Name of the stage that applies the exclude list.
pub const EXCLUDE_STAGE: &str = "exclude";
/// Name of the stage that applies the condition.
pub const SELECT_STAGE: &str = "select";
/// Named counter for items removed by the exclude list.
pub const EXCLUDED_COUNTER: &str = "excluded";

/// Builds the two-stage pipeline for `condition` and `excludes`.
///
/// Both stages see every item, directory markers included, so a printed
/// path always passed the exclude list and the condition.
///
/// # Errors
///
/// Propagates [`ConfigurationError`] from stage construction.
pub fn build_pipeline(
    config: &StageConfig,
    condition: Condition,
    excludes: ExcludeList,
) -> Result<Pipeline, ConfigurationError> {
    Ok(Pipeline::new()
        .with_capacity(config.effective_capacity())
        .stage(exclude_stage(config, excludes)?)
        .stage(select_stage(config, condition)?))
}

fn exclude_stage(config: &StageConfig, excludes: ExcludeList) -> Result<Stage, ConfigurationError> {
    StageBuilder::new(EXCLUDE_STAGE)
        .config(config)
        .supports_any_type(true)
        .transform(from_fn(move |item, context| {
            if excludes.excludes(item.relative_path()) {
                context.increment(EXCLUDED_COUNTER);
                Ok(Outcome::Drop)
            } else {
                Ok(Outcome::Keep)
            }
        }))
        .build()
}

fn select_stage(config: &StageConfig, condition: Condition) -> Result<Stage, ConfigurationError> {
    let keep = from_fn(|_item, _context| Ok(Outcome::Keep)).with_finalize(|context| {
        trace_summary!(
            stage = %context.stage_name(),
            matched = context.counter(MET_COUNTER),
            skipped = context.counter(NOT_MET_COUNTER),
            "selection finished"
        );
        Ok(())
    });
    let skip = from_fn(|_item, _context| Ok(Outcome::Drop));

    StageBuilder::new(SELECT_STAGE)
        .config(config)
        .supports_any_type(true)
        .transform(Conditional::new(condition, keep).otherwise(skip))
        .build()
}

/// Totals shown on the summary line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Items that satisfied the condition.
    pub matched: u64,
    /// Items that failed the condition.
    pub skipped: u64,
    /// Items removed by the exclude list.
    pub excluded: u64,
    /// Items whose transform failed in any stage.
    pub failed: u64,
}

impl Summary {
    /// Folds the stage reports into totals.
    #[must_use]
    pub fn from_reports(reports: &[StageReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.matched += report.counter(MET_COUNTER);
            summary.skipped += report.counter(NOT_MET_COUNTER);
            summary.excluded += report.counter(EXCLUDED_COUNTER);
            summary.failed += report.counters.failed;
        }
        summary
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matched, {} skipped, {} excluded, {} failed",
            self.matched, self.skipped, self.excluded, self.failed
        )
    }
}
