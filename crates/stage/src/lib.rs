#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stage` turns a per-item transform and an optional finalize hook into a
//! pipeline stage. A stage receives [`Item`](item::Item)s one at a time,
//! hands each to its [`ItemTransform`], forwards the result, and runs the
//! finalize hook exactly once after the last item. Failures of a single item
//! are reported and contained; the original item continues downstream.
//!
//! # Design
//!
//! - [`StageBuilder`] validates the stage eagerly and produces a [`Stage`].
//! - [`Stage::process`] implements the per-item algorithm and
//!   [`Stage::finalize`] consumes the stage, so finalize cannot run twice.
//! - [`ItemTransform`] is the seam for user code. [`from_fn`] and
//!   [`from_async_fn`] adapt closures; [`Conditional`] routes items through
//!   a [`filters::Condition`].
//! - [`Outcome`] makes the transform's intent explicit: keep the original,
//!   replace it, or drop it.
//! - [`run_stage`] drives a stage between bounded `tokio::sync::mpsc`
//!   channels; [`Pipeline`] spawns one task per stage and chains them.
//! - Diagnostics go to a [`logging::ErrorReporter`], attributed to the stage
//!   name. The default reporter emits `tracing` events.
//!
//! # Invariants
//!
//! - Items are processed strictly sequentially within a stage, in arrival
//!   order.
//! - Unless a transform returns [`Outcome::Drop`], every input yields
//!   exactly one output, in input order.
//! - A failing, panicking or timed-out transform forwards the unmodified
//!   original.
//! - Streaming content aborts the stage with
//!   [`StageError::StreamingUnsupported`]; nothing further is emitted and
//!   finalize is skipped.
//! - Directory markers bypass the transform unless the stage supports
//!   directories or any item type.
//! - A finalize error is reported and recorded in the [`StageReport`]; it
//!   does not fail the stage.
//!
//! # Examples
//!
//! ```
//! use item::Item;
//! use logging::MemoryReporter;
//! use stage::{Outcome, StageBuilder, from_fn};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let reporter = Arc::new(MemoryReporter::new());
//! let mut stage = StageBuilder::new("shout")
//!     .reporter(Arc::clone(&reporter))
//!     .transform(from_fn(|item, _context| match item.contents() {
//!         Some(bytes) if bytes.is_ascii() => {
//!             Ok(Outcome::Replace(item.clone().with_contents(bytes.to_ascii_uppercase())))
//!         }
//!         _ => Err("not ascii".into()),
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let loud = stage.process(Item::new("/a/x.txt", "x.txt").with_contents("hi")).await.unwrap();
//! assert_eq!(loud.unwrap().contents(), Some(&b"HI"[..]));
//!
//! let raw = Item::new("/a/y.bin", "y.bin").with_contents(vec![0xff]);
//! let kept = stage.process(raw).await.unwrap();
//! assert_eq!(kept.unwrap().contents(), Some(&[0xff][..]));
//!
//! let report = stage.finalize().await;
//! assert_eq!(report.counters.failed, 1);
//! assert_eq!(reporter.reports()[0].stage, "shout");
//! # });
//! ```

mod builder;
mod conditional;
mod config;
mod context;
mod driver;
mod error;
mod outcome;
mod pipeline;
#[allow(clippy::module_inception)]
mod stage;
mod transform;

pub use builder::StageBuilder;
pub use conditional::{Conditional, MET_COUNTER, NOT_MET_COUNTER};
pub use config::{DEFAULT_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY, StageConfig};
pub use context::{Counters, StageContext};
pub use driver::run_stage;
pub use error::{ConfigurationError, ItemTimeout, StageError, TransformError, TransformPanic};
pub use outcome::Outcome;
pub use pipeline::{Pipeline, PipelineOutput};
pub use stage::{FinalizeStatus, Stage, StageReport, StageState};
pub use transform::{AsyncFnTransform, BoxFuture, FnTransform, ItemTransform, from_async_fn, from_fn};
