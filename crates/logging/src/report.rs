//! crates/logging/src/report.rs
//! The structured diagnostic handed to an [`ErrorReporter`](crate::ErrorReporter).

use std::borrow::Cow;
use std::error::Error;

use crate::Severity;

/// Message used when a report carries neither a message nor an error.
pub const UNKNOWN_ERROR_MESSAGE: &str = "an unknown error occurred";

/// A single diagnostic attributed to a pipeline stage.
///
/// Reports borrow their inputs; reporters that need to keep them convert to
/// owned data (see [`RecordedReport`](crate::RecordedReport)).
///
/// # Examples
///
/// ```
/// use logging::{Report, Severity};
///
/// let error = std::io::Error::other("disk full");
/// let report = Report::error("archive", &error);
/// assert_eq!(report.severity(), Severity::Error);
/// assert_eq!(report.rendered_message(), "disk full");
///
/// let note = Report::new("clone").with_message("copied 3 files").with_severity(Severity::Info);
/// assert_eq!(note.rendered_message(), "copied 3 files");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    stage: &'a str,
    message: Option<&'a str>,
    error: Option<&'a (dyn Error + 'static)>,
    severity: Severity,
}

impl<'a> Report<'a> {
    /// Creates an empty error-severity report for `stage`.
    #[must_use]
    pub const fn new(stage: &'a str) -> Self {
        Self {
            stage,
            message: None,
            error: None,
            severity: Severity::Error,
        }
    }

    /// Creates an error-severity report carrying `error`.
    #[must_use]
    pub fn error(stage: &'a str, error: &'a (dyn Error + 'static)) -> Self {
        Self::new(stage).with_error(error)
    }

    /// Creates a report with an explicit severity and message.
    #[must_use]
    pub fn message(stage: &'a str, severity: Severity, message: &'a str) -> Self {
        Self::new(stage).with_severity(severity).with_message(message)
    }

    /// Sets the message.
    #[must_use]
    pub const fn with_message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    /// Attaches the error and its source chain.
    #[must_use]
    pub fn with_error(mut self, error: &'a (dyn Error + 'static)) -> Self {
        self.error = Some(error);
        self
    }

    /// Sets the severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the stage the report is attributed to.
    #[must_use]
    pub const fn stage(&self) -> &'a str {
        self.stage
    }

    /// Returns the explicit message, if any.
    #[must_use]
    pub const fn message_text(&self) -> Option<&'a str> {
        self.message
    }

    /// Returns the attached error, if any.
    #[must_use]
    pub fn error_ref(&self) -> Option<&'a (dyn Error + 'static)> {
        self.error
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message to display: the explicit message, else the error's
    /// display text, else [`UNKNOWN_ERROR_MESSAGE`].
    #[must_use]
    pub fn rendered_message(&self) -> Cow<'a, str> {
        match (self.message, self.error) {
            (Some(message), _) if !message.is_empty() => Cow::Borrowed(message),
            (_, Some(error)) => Cow::Owned(error.to_string()),
            _ => Cow::Borrowed(UNKNOWN_ERROR_MESSAGE),
        }
    }

    /// Returns the display text of every error below the attached one.
    #[must_use]
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = self.error.and_then(|error| error.source());
        while let Some(cause) = current {
            causes.push(cause.to_string());
            current = cause.source();
        }
        causes
    }
}
