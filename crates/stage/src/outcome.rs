//! crates/stage/src/outcome.rs
//! What a transform asks the stage to emit.

use item::Item;

/// Result of a successful `on_item` call.
#[derive(Debug)]
pub enum Outcome {
    /// Forward the original item unchanged.
    Keep,
    /// Forward this item in place of the original.
    Replace(Item),
    /// Forward nothing for this input.
    Drop,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Drop`].
    #[must_use]
    pub const fn is_drop(&self) -> bool {
        matches!(self, Self::Drop)
    }
}

impl From<Item> for Outcome {
    fn from(item: Item) -> Self {
        Self::Replace(item)
    }
}

impl From<Option<Item>> for Outcome {
    /// `Some` replaces the item; `None` keeps the original.
    fn from(item: Option<Item>) -> Self {
        item.map_or(Self::Keep, Self::Replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_keeps_original() {
        assert!(matches!(Outcome::from(None), Outcome::Keep));
        assert!(!Outcome::Keep.is_drop());
        assert!(Outcome::Drop.is_drop());
    }

    #[test]
    fn some_replaces() {
        let item = Item::new("/a/b", "b");
        assert!(matches!(Outcome::from(Some(item)), Outcome::Replace(_)));
    }
}
