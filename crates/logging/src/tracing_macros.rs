//! crates/logging/src/tracing_macros.rs
//! Convenience macros for filestage tracing targets.
//!
//! The macros forward to `tracing` through the re-export in this crate, so
//! callers only need a dependency on `logging`.

/// Emit a stage lifecycle trace (`filestage::stage`, debug level).
///
/// # Example
/// ```ignore
/// trace_stage!(stage = %name, "finalizing after {} items", count);
/// ```
#[macro_export]
macro_rules! trace_stage {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "filestage::stage", $($arg)*);
    };
}

/// Emit a stage summary (`filestage::stage`, info level).
///
/// # Example
/// ```ignore
/// trace_summary!(stage = %name, "processed {} items", count);
/// ```
#[macro_export]
macro_rules! trace_summary {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "filestage::stage", $($arg)*);
    };
}

/// Emit a predicate evaluation trace (`filestage::filter`, trace level).
///
/// # Example
/// ```ignore
/// trace_filter!(dimension = %dim, "rejected {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "filestage::filter", $($arg)*);
    };
}
