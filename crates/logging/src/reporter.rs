//! crates/logging/src/reporter.rs
//! Reporter implementations that receive stage diagnostics.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{Report, Severity};

/// Sink for structured stage diagnostics.
///
/// Reporting is fire-and-forget: implementations must not fail or block for
/// long, and never propagate errors back into the stage.
pub trait ErrorReporter: Send + Sync {
    /// Records a single report.
    fn report(&self, report: &Report<'_>);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for Arc<R> {
    fn report(&self, report: &Report<'_>) {
        (**self).report(report);
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn report(&self, report: &Report<'_>) {
        (**self).report(report);
    }
}

/// Default reporter: emits each report as a `tracing` event under the
/// `filestage::report` target.
///
/// The event carries the stage name and the rendered message. When an error
/// is attached, `error` holds its display text and `caused_by` the source
/// chain joined with `": "`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: &Report<'_>) {
        let stage = report.stage();
        let message = report.rendered_message();
        let error = report.error_ref().map(ToString::to_string).unwrap_or_default();
        let causes = report.causes().join(": ");

        match report.severity() {
            Severity::Error => {
                tracing::error!(
                    target: "filestage::report",
                    stage,
                    error = %error,
                    caused_by = %causes,
                    "{message}"
                );
            }
            Severity::Warn => {
                tracing::warn!(
                    target: "filestage::report",
                    stage,
                    error = %error,
                    caused_by = %causes,
                    "{message}"
                );
            }
            Severity::Info => {
                tracing::info!(target: "filestage::report", stage, "{message}");
            }
        }
    }
}

/// Reporter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&self, _report: &Report<'_>) {}
}

/// Owned copy of a [`Report`] kept by [`MemoryReporter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedReport {
    /// Stage the report was attributed to.
    pub stage: String,
    /// Rendered message.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Whether an error value was attached.
    pub had_error: bool,
    /// Display text of the attached error's sources, outermost first.
    pub causes: Vec<String>,
}

impl From<&Report<'_>> for RecordedReport {
    fn from(report: &Report<'_>) -> Self {
        Self {
            stage: report.stage().to_owned(),
            message: report.rendered_message().into_owned(),
            severity: report.severity(),
            had_error: report.error_ref().is_some(),
            causes: report.causes(),
        }
    }
}

/// Reporter that keeps every report in memory.
///
/// Useful when embedding pipelines that surface diagnostics themselves, and
/// in tests.
///
/// # Examples
///
/// ```
/// use logging::{ErrorReporter, MemoryReporter, Report, Severity};
///
/// let reporter = MemoryReporter::new();
/// reporter.report(&Report::message("clone", Severity::Warn, "target exists"));
///
/// let reports = reporter.reports();
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].stage, "clone");
/// assert_eq!(reporter.count(Severity::Warn), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<RecordedReport>>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded reports in arrival order.
    #[must_use]
    pub fn reports(&self) -> Vec<RecordedReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of reports with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|report| report.severity == severity)
            .count()
    }

    /// Returns `true` when nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Removes and returns every recorded report.
    pub fn drain(&self) -> Vec<RecordedReport> {
        std::mem::take(&mut *self.reports.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, report: &Report<'_>) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedReport::from(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_keeps_order_and_drains() {
        let reporter = MemoryReporter::new();
        reporter.report(&Report::message("a", Severity::Info, "first"));
        reporter.report(&Report::message("b", Severity::Error, "second"));

        let drained = reporter.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].stage, "b");
        assert!(reporter.is_empty());
    }

    #[test]
    fn memory_reporter_records_error_presence() {
        let reporter = MemoryReporter::new();
        let error = std::io::Error::other("boom");
        reporter.report(&Report::error("stage", &error));

        let reports = reporter.reports();
        assert!(reports[0].had_error);
        assert_eq!(reports[0].message, "boom");
        assert_eq!(reports[0].severity, Severity::Error);
    }

    #[test]
    fn shared_reporter_forwards_through_arc() {
        let reporter = Arc::new(MemoryReporter::new());
        let shared: Arc<dyn ErrorReporter> = reporter.clone();
        shared.report(&Report::new("stage"));
        assert_eq!(reporter.count(Severity::Error), 1);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_reporter_records_error_field() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let error = std::io::Error::other("decoder exploded");
        tracing::subscriber::with_default(subscriber, || {
            TracingReporter.report(&Report::error("images", &error).with_message("a.png: failed"));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("a.png: failed"), "{output}");
        assert!(output.contains("stage=\"images\""), "{output}");
        assert!(output.contains("error=decoder exploded"), "{output}");
    }

    #[test]
    fn tracing_and_null_reporters_accept_reports() {
        let error = std::io::Error::other("boom");
        TracingReporter.report(&Report::error("stage", &error));
        NullReporter.report(&Report::error("stage", &error));
    }
}
