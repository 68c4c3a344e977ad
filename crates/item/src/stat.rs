use std::fs;
use std::time::SystemTime;

/// Size and timestamps captured for an item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ItemStat {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Creation time. Platforms without birth times report the modification time.
    pub created: SystemTime,
}

impl ItemStat {
    /// Creates a stat record with both timestamps set to `time`.
    #[must_use]
    pub const fn at(size: u64, time: SystemTime) -> Self {
        Self {
            size,
            modified: time,
            created: time,
        }
    }

    pub(crate) fn from_metadata(metadata: &fs::Metadata) -> Self {
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);
        Self {
            size: metadata.len(),
            modified,
            created,
        }
    }
}

impl Default for ItemStat {
    fn default() -> Self {
        Self::at(0, SystemTime::UNIX_EPOCH)
    }
}
