//! crates/filters/src/dimension.rs
//! The closed set of metadata dimensions and their checks.

use std::fmt;
use std::time::SystemTime;

use item::Item;

use crate::{ConditionOptions, Timestamp};

/// One constraint a [`ConditionOptions`] may carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Dimension {
    /// [`ConditionOptions::extensions`]
    Extensions,
    /// [`ConditionOptions::names_contains`]
    NamesContains,
    /// [`ConditionOptions::names_equals`]
    NamesEquals,
    /// [`ConditionOptions::min_size`]
    MinSize,
    /// [`ConditionOptions::max_size`]
    MaxSize,
    /// [`ConditionOptions::modified_after`]
    ModifiedAfter,
    /// [`ConditionOptions::modified_before`]
    ModifiedBefore,
    /// [`ConditionOptions::created_after`]
    CreatedAfter,
    /// [`ConditionOptions::created_before`]
    CreatedBefore,
    /// [`ConditionOptions::contains_content`]
    ContainsContent,
    /// [`ConditionOptions::path_contains`]
    PathContains,
    /// [`ConditionOptions::line_count`]
    LineCount,
    /// [`ConditionOptions::size_in_kb`]
    SizeInKb,
    /// [`ConditionOptions::custom`]
    Custom,
}

impl Dimension {
    /// Every dimension in evaluation order. `Custom` is always last.
    pub const ALL: [Self; 14] = [
        Self::Extensions,
        Self::NamesContains,
        Self::NamesEquals,
        Self::MinSize,
        Self::MaxSize,
        Self::ModifiedAfter,
        Self::ModifiedBefore,
        Self::CreatedAfter,
        Self::CreatedBefore,
        Self::ContainsContent,
        Self::PathContains,
        Self::LineCount,
        Self::SizeInKb,
        Self::Custom,
    ];

    /// Returns the configuration key for this dimension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extensions => "extensions",
            Self::NamesContains => "names_contains",
            Self::NamesEquals => "names_equals",
            Self::MinSize => "min_size",
            Self::MaxSize => "max_size",
            Self::ModifiedAfter => "modified_after",
            Self::ModifiedBefore => "modified_before",
            Self::CreatedAfter => "created_after",
            Self::CreatedBefore => "created_before",
            Self::ContainsContent => "contains_content",
            Self::PathContains => "path_contains",
            Self::LineCount => "line_count",
            Self::SizeInKb => "size_in_kb",
            Self::Custom => "custom",
        }
    }

    /// Returns `true` when `options` constrains this dimension.
    #[must_use]
    pub const fn is_set(self, options: &ConditionOptions) -> bool {
        match self {
            Self::Extensions => options.extensions.is_some(),
            Self::NamesContains => options.names_contains.is_some(),
            Self::NamesEquals => options.names_equals.is_some(),
            Self::MinSize => options.min_size.is_some(),
            Self::MaxSize => options.max_size.is_some(),
            Self::ModifiedAfter => options.modified_after.is_some(),
            Self::ModifiedBefore => options.modified_before.is_some(),
            Self::CreatedAfter => options.created_after.is_some(),
            Self::CreatedBefore => options.created_before.is_some(),
            Self::ContainsContent => options.contains_content.is_some(),
            Self::PathContains => options.path_contains.is_some(),
            Self::LineCount => options.line_count.is_some(),
            Self::SizeInKb => options.size_in_kb.is_some(),
            Self::Custom => options.custom.is_some(),
        }
    }

    /// Checks `item` against this dimension.
    ///
    /// Returns `None` when `options` does not constrain the dimension.
    #[must_use]
    pub fn check(self, item: &Item, options: &ConditionOptions) -> Option<bool> {
        let passed = match self {
            Self::Extensions => {
                let extension = item.extension().unwrap_or("");
                options
                    .extensions
                    .as_ref()?
                    .iter()
                    .any(|wanted| strip_dot(wanted) == extension)
            }
            Self::NamesContains => {
                let name = item.file_name();
                let parts = options.names_contains.as_ref()?;
                name.is_some_and(|name| parts.iter().any(|part| name.contains(part.as_str())))
            }
            Self::NamesEquals => {
                let name = item.file_name();
                let names = options.names_equals.as_ref()?;
                name.is_some_and(|name| names.iter().any(|wanted| wanted == name))
            }
            Self::MinSize => item.content_len() >= options.min_size?,
            Self::MaxSize => item.content_len() <= options.max_size?,
            Self::ModifiedAfter => not_before(item.stat().modified, options.modified_after?),
            Self::ModifiedBefore => not_after(item.stat().modified, options.modified_before?),
            Self::CreatedAfter => not_before(item.stat().created, options.created_after?),
            Self::CreatedBefore => not_after(item.stat().created, options.created_before?),
            Self::ContainsContent => {
                let needle = options.contains_content.as_ref()?;
                item.contents()
                    .is_some_and(|bytes| String::from_utf8_lossy(bytes).contains(needle.as_str()))
            }
            Self::PathContains => {
                let needle = options.path_contains.as_ref()?;
                item.relative_path()
                    .to_string_lossy()
                    .contains(needle.as_str())
            }
            Self::LineCount => {
                let target = options.line_count?;
                item.contents().is_some_and(|bytes| {
                    String::from_utf8_lossy(bytes).split('\n').count() == target
                })
            }
            Self::SizeInKb => {
                let target = options.size_in_kb?;
                #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
                let equal = item.content_len() as f64 / 1024.0 == target;
                equal
            }
            Self::Custom => options.custom.as_ref()?.call(item),
        };
        Some(passed)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_dot(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

fn not_before(time: SystemTime, bound: Timestamp) -> bool {
    time >= bound.as_system_time()
}

fn not_after(time: SystemTime, bound: Timestamp) -> bool {
    time <= bound.as_system_time()
}
