#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides whether an [`Item`](item::Item) matches a declarative
//! [`Condition`]. A condition is either a literal `true`/`false` or a set of
//! optional constraints over the item's name, size, timestamps, content and
//! relative path, plus an optional code-supplied predicate. The crate also
//! provides [`ExcludeList`], a compiled set of substring and glob patterns
//! used to drop paths before they reach a pipeline.
//!
//! # Design
//!
//! - [`ConditionOptions`] holds one optional field per [`Dimension`]. Absent
//!   fields impose nothing; present fields are ANDed.
//! - [`Dimension::ALL`] fixes the evaluation order. [`evaluate`] walks it and
//!   stops at the first failing dimension, so later checks (content decoding,
//!   the custom predicate) only run when cheaper ones pass.
//! - Date bounds are [`Timestamp`] values, parsed from `YYYY-MM-DD` or
//!   RFC 3339 text with the `time` crate.
//! - With the `serde` feature, [`Condition`] and [`ExcludeList`] deserialize
//!   from configuration files. The custom predicate cannot be configured.
//!
//! # Invariants
//!
//! - Evaluation is pure apart from `filestage::filter` trace events.
//! - A literal condition never inspects the item.
//! - Every bound is inclusive: an item modified exactly at `modified_after`
//!   passes.
//! - Items without buffered content fail `contains_content` and
//!   `line_count`.
//! - `size_in_kb` compares `len / 1024` with exact floating-point equality.
//!
//! # Errors
//!
//! [`FilterError`] reports exclude globs that fail to compile and date bounds
//! that cannot be parsed. Evaluation itself never fails.
//!
//! # Examples
//!
//! ```
//! use filters::{Condition, ConditionOptions, ExcludeList, evaluate};
//! use item::Item;
//! use std::path::Path;
//!
//! let condition = Condition::from(
//!     ConditionOptions::new()
//!         .with_extensions(["md", ".txt"])
//!         .with_max_size(1024)
//!         .with_path_contains("docs/"),
//! );
//!
//! let guide = Item::new("/repo/docs/guide.md", "docs/guide.md").with_contents("# Guide\n");
//! let notes = Item::new("/repo/notes.txt", "notes.txt").with_contents("todo\n");
//! assert!(evaluate(&guide, &condition));
//! assert!(!evaluate(&notes, &condition));
//!
//! let excludes = ExcludeList::new(["drafts", "*.bak"]).unwrap();
//! assert!(excludes.excludes(Path::new("docs/drafts/x.md")));
//! ```

mod condition;
mod dimension;
mod error;
mod evaluate;
mod exclude;
mod timestamp;

pub use condition::{Condition, ConditionOptions, CustomFilter};
pub use dimension::Dimension;
pub use error::FilterError;
pub use evaluate::{evaluate, first_failure};
pub use exclude::{ExcludeList, ExcludePattern};
pub use timestamp::Timestamp;

#[cfg(test)]
mod tests;
