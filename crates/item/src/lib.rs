#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `item` defines the unit of work that flows through a filestage pipeline.
//! An [`Item`] is usually a file: it carries the absolute path, the path
//! relative to the pipeline base, a [`Content`] payload, a directory marker
//! and the [`ItemStat`] timestamps captured when the item was produced.
//!
//! # Design
//!
//! - [`Content`] is a closed enum with three mutually exclusive states:
//!   [`Content::Null`], [`Content::Buffer`] and [`Content::Stream`]. Only the
//!   buffered state exposes bytes; the stream state is a marker that stages
//!   reject.
//! - Items are plain values. Transforms receive a shared reference and build
//!   a replacement when they want to change something, so the original is
//!   always available for pass-through.
//! - [`Item::load`] turns one named path into an item. It never descends into
//!   directories; traversal belongs to the producer feeding the pipeline.
//!
//! # Invariants
//!
//! - `relative_path` never starts with a root component.
//! - `stat.size` mirrors the buffered length for items built with
//!   [`Item::with_contents`]; loaded items report the on-disk size.
//!
//! # Examples
//!
//! ```
//! use item::{Content, Item};
//!
//! let item = Item::new("/src/assets/logo.svg", "assets/logo.svg")
//!     .with_contents(b"<svg/>".to_vec());
//!
//! assert_eq!(item.file_name(), Some("logo.svg"));
//! assert_eq!(item.extension(), Some("svg"));
//! assert!(matches!(item.content(), Content::Buffer(_)));
//! assert_eq!(item.stat().size, 6);
//! ```

mod content;
mod error;
mod item;
mod load;
mod stat;

pub use content::Content;
pub use error::LoadError;
pub use item::Item;
pub use stat::ItemStat;
