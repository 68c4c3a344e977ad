//! crates/filters/src/condition.rs
//! Condition shapes accepted by [`evaluate`](crate::evaluate).

use std::fmt;
use std::sync::Arc;

use item::Item;

use crate::Timestamp;

/// A condition is either a literal verdict or a set of dimension constraints.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Condition {
    /// Matches every item (`true`) or none (`false`).
    Literal(bool),
    /// Matches items satisfying every present dimension.
    Options(Box<ConditionOptions>),
}

impl Default for Condition {
    fn default() -> Self {
        Self::Literal(true)
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Self {
        Self::Literal(value)
    }
}

impl From<ConditionOptions> for Condition {
    fn from(options: ConditionOptions) -> Self {
        Self::Options(Box::new(options))
    }
}

impl Condition {
    /// Returns `true` when `item` satisfies the condition.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        crate::evaluate(item, self)
    }
}

/// Predicate supplied by code rather than configuration.
#[derive(Clone)]
pub struct CustomFilter(Arc<dyn Fn(&Item) -> bool + Send + Sync>);

impl CustomFilter {
    /// Wraps a closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Applies the predicate.
    #[must_use]
    pub fn call(&self, item: &Item) -> bool {
        (self.0)(item)
    }
}

impl fmt::Debug for CustomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomFilter(..)")
    }
}

/// Dimension constraints. Absent fields impose nothing.
///
/// List-valued fields match when any entry matches. In configuration files
/// they accept either a single string or an array.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ConditionOptions {
    /// Accepted extensions, with or without the leading `.`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "one_or_many::deserialize"))]
    pub extensions: Option<Vec<String>>,
    /// Substrings, one of which the base name must contain.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "one_or_many::deserialize"))]
    pub names_contains: Option<Vec<String>>,
    /// Base names, one of which must match exactly.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "one_or_many::deserialize"))]
    pub names_equals: Option<Vec<String>>,
    /// Minimum content length in bytes (inclusive).
    pub min_size: Option<u64>,
    /// Maximum content length in bytes (inclusive).
    pub max_size: Option<u64>,
    /// Earliest accepted modification time (inclusive).
    pub modified_after: Option<Timestamp>,
    /// Latest accepted modification time (inclusive).
    pub modified_before: Option<Timestamp>,
    /// Earliest accepted creation time (inclusive).
    pub created_after: Option<Timestamp>,
    /// Latest accepted creation time (inclusive).
    pub created_before: Option<Timestamp>,
    /// Substring the decoded content must contain.
    pub contains_content: Option<String>,
    /// Substring the relative path must contain.
    pub path_contains: Option<String>,
    /// Exact number of `\n`-separated segments.
    pub line_count: Option<usize>,
    /// Exact content length in KiB.
    pub size_in_kb: Option<f64>,
    /// Predicate applied after every other dimension.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub custom: Option<CustomFilter>,
}

impl ConditionOptions {
    /// Creates options with no dimension set; these match every item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted extensions.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the base-name substrings.
    #[must_use]
    pub fn with_names_contains<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names_contains = Some(parts.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the accepted base names.
    #[must_use]
    pub fn with_names_equals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names_equals = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the minimum size in bytes.
    #[must_use]
    pub const fn with_min_size(mut self, bytes: u64) -> Self {
        self.min_size = Some(bytes);
        self
    }

    /// Sets the maximum size in bytes.
    #[must_use]
    pub const fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Sets the earliest modification time.
    #[must_use]
    pub fn with_modified_after(mut self, time: impl Into<Timestamp>) -> Self {
        self.modified_after = Some(time.into());
        self
    }

    /// Sets the latest modification time.
    #[must_use]
    pub fn with_modified_before(mut self, time: impl Into<Timestamp>) -> Self {
        self.modified_before = Some(time.into());
        self
    }

    /// Sets the earliest creation time.
    #[must_use]
    pub fn with_created_after(mut self, time: impl Into<Timestamp>) -> Self {
        self.created_after = Some(time.into());
        self
    }

    /// Sets the latest creation time.
    #[must_use]
    pub fn with_created_before(mut self, time: impl Into<Timestamp>) -> Self {
        self.created_before = Some(time.into());
        self
    }

    /// Sets the required content substring.
    #[must_use]
    pub fn with_contains_content(mut self, needle: impl Into<String>) -> Self {
        self.contains_content = Some(needle.into());
        self
    }

    /// Sets the required relative-path substring.
    #[must_use]
    pub fn with_path_contains(mut self, needle: impl Into<String>) -> Self {
        self.path_contains = Some(needle.into());
        self
    }

    /// Sets the exact line count.
    #[must_use]
    pub const fn with_line_count(mut self, lines: usize) -> Self {
        self.line_count = Some(lines);
        self
    }

    /// Sets the exact size in KiB.
    #[must_use]
    pub const fn with_size_in_kb(mut self, kib: f64) -> Self {
        self.size_in_kb = Some(kib);
        self
    }

    /// Sets the custom predicate.
    #[must_use]
    pub fn with_custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(CustomFilter::new(predicate));
        self
    }

    /// Returns `true` when no dimension is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        crate::Dimension::ALL.iter().all(|dimension| !dimension.is_set(self))
    }
}

#[cfg(feature = "serde")]
mod one_or_many {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(list) => list,
        }))
    }
}
