//! crates/filters/src/evaluate.rs
//! Condition evaluation.

use item::Item;
use logging::trace_filter;

use crate::{Condition, ConditionOptions, Dimension};

/// Returns `true` when `item` satisfies `condition`.
///
/// Literal conditions are returned without looking at the item. Option sets
/// walk [`Dimension::ALL`] in order and stop at the first failing dimension;
/// an option set with no dimension present matches everything.
///
/// ```
/// use filters::{Condition, ConditionOptions, evaluate};
/// use item::Item;
///
/// let item = Item::new("/src/a.txt", "a.txt").with_contents("hello");
/// let condition = Condition::from(ConditionOptions::new().with_extensions([".txt"]).with_min_size(5));
///
/// assert!(evaluate(&item, &condition));
/// assert!(!evaluate(&item, &Condition::from(false)));
/// ```
#[must_use]
pub fn evaluate(item: &Item, condition: &Condition) -> bool {
    match condition {
        Condition::Literal(verdict) => *verdict,
        Condition::Options(options) => first_failure(item, options).is_none(),
    }
}

/// Returns the first dimension `item` fails, or `None` when it passes them all.
#[must_use]
pub fn first_failure(item: &Item, options: &ConditionOptions) -> Option<Dimension> {
    let failed = Dimension::ALL
        .into_iter()
        .find(|dimension| dimension.check(item, options) == Some(false))?;
    trace_filter!(
        dimension = %failed,
        "{} rejected",
        item.relative_path().display()
    );
    Some(failed)
}
