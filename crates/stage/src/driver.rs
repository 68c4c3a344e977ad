//! crates/stage/src/driver.rs
//! Drives a single stage between bounded channels.
//!
//! The stage reads from an upstream `tokio::sync::mpsc` receiver and writes
//! to a downstream sender. The bounded channels provide backpressure: the
//! stage only accepts item N+1 after item N has been handed downstream.
//!
//! # Cancellation
//!
//! When the stage carries a `CancellationToken`, the receive loop selects on
//! it with priority, so a cancelled stage stops before taking another item.

use item::Item;
use logging::trace_stage;
use tokio::sync::mpsc;

use crate::{Stage, StageError, StageReport};

/// Runs `stage` until `rx` closes, then finalizes it.
///
/// # Errors
///
/// Returns the fatal [`StageError`] that stopped the stage, or
/// [`StageError::DownstreamClosed`] when `tx` has no receiver left. In both
/// cases the finalize hook does not run.
///
/// ```
/// use item::Item;
/// use stage::{Outcome, StageBuilder, from_fn, run_stage};
/// use tokio::sync::mpsc;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let stage = StageBuilder::new("count")
///     .transform(from_fn(|_item, _context| Ok(Outcome::Keep)))
///     .build()
///     .unwrap();
/// let (in_tx, in_rx) = mpsc::channel(4);
/// let (out_tx, mut out_rx) = mpsc::channel(4);
///
/// in_tx.send(Item::new("/src/a.txt", "a.txt")).await.unwrap();
/// drop(in_tx);
///
/// let report = run_stage(stage, in_rx, out_tx).await.unwrap();
/// assert_eq!(report.counters.kept, 1);
/// assert!(out_rx.recv().await.is_some());
/// # });
/// ```
pub async fn run_stage(
    mut stage: Stage,
    mut rx: mpsc::Receiver<Item>,
    tx: mpsc::Sender<Item>,
) -> Result<StageReport, StageError> {
    // A token that is never cancelled keeps the select uniform.
    let cancel = stage.cancellation().cloned().unwrap_or_default();

    loop {
        let item = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(stage.abort_cancelled());
            }
            maybe_item = rx.recv() => {
                match maybe_item {
                    Some(item) => item,
                    None => break,
                }
            }
        };

        if let Some(output) = stage.process(item).await? {
            if tx.send(output).await.is_err() {
                trace_stage!(stage = %stage.name(), "downstream closed");
                return Err(StageError::DownstreamClosed {
                    stage: stage.name().to_owned(),
                });
            }
        }
    }

    drop(tx);
    Ok(stage.finalize().await)
}
