//! crates/stage/src/context.rs
//! Per-stage state handed to every transform callback.

use std::collections::BTreeMap;

/// Built-in counters maintained by the stage itself.
///
/// Every item accepted by [`Stage::process`](crate::Stage::process) lands in
/// exactly one of `passed_through`, `kept`, `replaced`, `dropped` or `failed`,
/// so their sum equals `received`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counters {
    /// Items accepted for processing.
    pub received: u64,
    /// Directory markers forwarded without calling the transform.
    pub passed_through: u64,
    /// Items forwarded unchanged after [`Outcome::Keep`](crate::Outcome::Keep).
    pub kept: u64,
    /// Items forwarded as a replacement.
    pub replaced: u64,
    /// Items removed by [`Outcome::Drop`](crate::Outcome::Drop).
    pub dropped: u64,
    /// Items whose transform failed or timed out; the original was forwarded.
    pub failed: u64,
    /// Subset of `failed` caused by the item timeout.
    pub timed_out: u64,
}

impl Counters {
    /// Number of items the stage emitted downstream.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.received - self.dropped
    }
}

/// State owned by one stage: its name and its counters.
///
/// Transforms receive `&mut StageContext` and may keep their own tallies
/// through the named counters.
#[derive(Debug)]
pub struct StageContext {
    stage: String,
    counters: Counters,
    named: BTreeMap<String, u64>,
}

impl StageContext {
    pub(crate) fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            counters: Counters::default(),
            named: BTreeMap::new(),
        }
    }

    /// Name of the owning stage.
    #[must_use]
    pub fn stage_name(&self) -> &str {
        &self.stage
    }

    /// Built-in counters.
    #[must_use]
    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    pub(crate) const fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    /// Adds one to the named counter.
    pub fn increment(&mut self, name: &str) {
        self.add(name, 1);
    }

    /// Adds `amount` to the named counter, creating it at zero.
    pub fn add(&mut self, name: &str, amount: u64) {
        match self.named.get_mut(name) {
            Some(value) => *value = value.saturating_add(amount),
            None => {
                self.named.insert(name.to_owned(), amount);
            }
        }
    }

    /// Current value of the named counter; unknown names read as zero.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.named.get(name).copied().unwrap_or(0)
    }

    /// All named counters in name order.
    #[must_use]
    pub const fn named_counters(&self) -> &BTreeMap<String, u64> {
        &self.named
    }

    pub(crate) fn into_parts(self) -> (String, Counters, BTreeMap<String, u64>) {
        (self.stage, self.counters, self.named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_counters_start_at_zero() {
        let mut context = StageContext::new("images");
        assert_eq!(context.counter("skipped"), 0);
        context.increment("skipped");
        context.add("skipped", 2);
        context.add("bytes", 10);
        assert_eq!(context.counter("skipped"), 3);
        assert_eq!(
            context.named_counters().keys().collect::<Vec<_>>(),
            ["bytes", "skipped"]
        );
    }

    #[test]
    fn emitted_excludes_dropped() {
        let counters = Counters {
            received: 5,
            dropped: 2,
            ..Counters::default()
        };
        assert_eq!(counters.emitted(), 3);
    }

    #[test]
    fn stage_name_is_kept() {
        assert_eq!(StageContext::new("zip").stage_name(), "zip");
    }
}
