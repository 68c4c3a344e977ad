//! Integration tests for stage diagnostics reporting.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use logging::{
    ErrorReporter, LogConfig, LogLevel, MemoryReporter, Report, Severity, UNKNOWN_ERROR_MESSAGE,
};

#[derive(Debug)]
struct CodecError {
    source: std::io::Error,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("could not encode image")
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

// ============================================================================
// Attribution
// ============================================================================

/// Verifies reports from several stages keep their stage names.
#[test]
fn reports_keep_stage_attribution() {
    let reporter = Arc::new(MemoryReporter::new());
    let sink: Arc<dyn ErrorReporter> = reporter.clone();

    sink.report(&Report::message("archive", Severity::Warn, "empty archive"));
    sink.report(&Report::message("images", Severity::Error, "bad header"));

    let stages: Vec<_> = reporter.reports().into_iter().map(|r| r.stage).collect();
    assert_eq!(stages, ["archive", "images"]);
}

/// Verifies the full cause chain is captured.
#[test]
fn nested_errors_are_flattened_into_causes() {
    let reporter = MemoryReporter::new();
    let error = CodecError {
        source: std::io::Error::other("unexpected end of file"),
    };

    reporter.report(&Report::error("images", &error));

    let report = &reporter.reports()[0];
    assert_eq!(report.message, "could not encode image");
    assert_eq!(report.causes, ["unexpected end of file"]);
}

/// Verifies the fallback message for bare reports.
#[test]
fn bare_report_uses_unknown_error_message() {
    let reporter = MemoryReporter::new();
    reporter.report(&Report::new("clone"));
    assert_eq!(reporter.reports()[0].message, UNKNOWN_ERROR_MESSAGE);
}

// ============================================================================
// Configuration
// ============================================================================

/// Verifies verbosity counts translate into filter directives.
#[test]
fn verbose_counts_select_directives() {
    let cases = [(0, "warn"), (1, "info"), (2, "debug"), (3, "trace")];
    for (count, directive) in cases {
        assert_eq!(LogConfig::from_verbose_level(count).directive(), directive);
    }
}

/// Verifies level ordering used by `at_least`.
#[test]
fn levels_are_ordered_by_verbosity() {
    assert!(LogLevel::Error < LogLevel::Warn);
    assert!(LogLevel::Debug < LogLevel::Trace);
}
