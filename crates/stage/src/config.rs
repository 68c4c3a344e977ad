//! crates/stage/src/config.rs
//! File-backed stage settings.

use std::time::Duration;

/// Default capacity of the bounded channel in front of each stage.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Largest accepted channel capacity.
pub const MAX_CHANNEL_CAPACITY: usize = 1024;

/// Stage settings read from configuration files.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StageConfig {
    /// Items buffered between stages. Clamped to `1..=1024`.
    pub channel_capacity: usize,
    /// Per-item transform timeout in milliseconds.
    pub item_timeout_ms: Option<u64>,
    /// Let the transform see directory markers.
    pub supports_directories: bool,
    /// Let the transform see every kind of item.
    pub supports_any_type: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            item_timeout_ms: None,
            supports_directories: false,
            supports_any_type: false,
        }
    }
}

impl StageConfig {
    /// Channel capacity after clamping.
    #[must_use]
    pub fn effective_capacity(&self) -> usize {
        clamp_capacity(self.channel_capacity)
    }

    /// Per-item timeout, if configured.
    #[must_use]
    pub fn item_timeout(&self) -> Option<Duration> {
        self.item_timeout_ms.map(Duration::from_millis)
    }

    /// Sets the channel capacity.
    #[must_use]
    pub const fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Sets the per-item timeout.
    #[must_use]
    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(1, MAX_CHANNEL_CAPACITY)
}
