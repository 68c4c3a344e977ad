#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the diagnostic layer of the filestage workspace. Pipeline
//! stages hand every failure, warning and summary to an [`ErrorReporter`]
//! together with the name of the stage that produced it; binaries decide
//! where those reports end up.
//!
//! # Design
//!
//! - [`Report`] is a borrowed, copyable value: stage name, optional message,
//!   optional error (including its `source()` chain) and a [`Severity`].
//! - [`ErrorReporter`] is the fire-and-forget sink. [`TracingReporter`] turns
//!   reports into `tracing` events, [`MemoryReporter`] records them, and
//!   [`NullReporter`] drops them.
//! - [`LogConfig`] and [`init_tracing`] install a `tracing-subscriber`
//!   formatter on standard error. The `FILESTAGE_LOG` environment variable
//!   overrides the configured level with a full filter directive.
//! - The `trace_*` macros fix the `filestage::*` targets used across the
//!   workspace.
//!
//! # Invariants
//!
//! - Reporters never fail and never panic on well-formed reports.
//! - A report without message or error renders as
//!   [`UNKNOWN_ERROR_MESSAGE`].
//!
//! # Examples
//!
//! ```
//! use logging::{ErrorReporter, MemoryReporter, Report, Severity};
//!
//! let reporter = MemoryReporter::new();
//! let error = std::io::Error::other("codec rejected input");
//! reporter.report(&Report::error("images", &error));
//! reporter.report(&Report::message("images", Severity::Info, "2 images written"));
//!
//! let reports = reporter.reports();
//! assert_eq!(reports[0].message, "codec rejected input");
//! assert_eq!(reports[1].severity, Severity::Info);
//! ```

mod config;
mod report;
mod reporter;
mod severity;
mod tracing_bridge;
mod tracing_macros;

pub use config::{LOG_ENV_VAR, LogConfig};
pub use report::{Report, UNKNOWN_ERROR_MESSAGE};
pub use reporter::{ErrorReporter, MemoryReporter, NullReporter, RecordedReport, TracingReporter};
pub use severity::{LogLevel, Severity};
pub use tracing_bridge::{env_filter, init_tracing};

#[doc(hidden)]
pub use tracing;
