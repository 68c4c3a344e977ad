//! crates/stage/src/conditional.rs
//! Routes items to one of two transforms depending on a [`Condition`].

use std::fmt;

use filters::{Condition, evaluate};
use item::Item;

use crate::{BoxFuture, ItemTransform, Outcome, StageContext, TransformError};

/// Named counter incremented for every item that satisfies the condition.
pub const MET_COUNTER: &str = "condition_met";

/// Named counter incremented for every item that fails the condition.
pub const NOT_MET_COUNTER: &str = "condition_not_met";

/// Applies `met` to matching items and `not_met` (or nothing) to the rest.
///
/// Items that fail the condition and have no `not_met` transform are kept
/// unchanged. Finalize runs both transforms' hooks in order and returns the
/// first failure.
///
/// ```
/// use filters::ConditionOptions;
/// use stage::{Conditional, Outcome, StageBuilder, from_fn};
///
/// let minify = from_fn(|item, _context| {
///     let trimmed: Vec<u8> = item.contents().unwrap_or_default().trim_ascii().to_vec();
///     Ok(Outcome::Replace(item.clone().with_contents(trimmed)))
/// });
/// let gate = Conditional::new(ConditionOptions::new().with_extensions(["css"]), minify);
/// let stage = StageBuilder::new("minify-css").transform(gate).build().unwrap();
/// # let _ = stage;
/// ```
pub struct Conditional {
    condition: Condition,
    met: Box<dyn ItemTransform>,
    not_met: Option<Box<dyn ItemTransform>>,
}

impl Conditional {
    /// Creates a gate that applies `met` to items matching `condition`.
    pub fn new<C, T>(condition: C, met: T) -> Self
    where
        C: Into<Condition>,
        T: ItemTransform + 'static,
    {
        Self {
            condition: condition.into(),
            met: Box::new(met),
            not_met: None,
        }
    }

    /// Sets the transform for items that fail the condition.
    #[must_use]
    pub fn otherwise<T: ItemTransform + 'static>(mut self, not_met: T) -> Self {
        self.not_met = Some(Box::new(not_met));
        self
    }

    /// The gate's condition.
    #[must_use]
    pub const fn condition(&self) -> &Condition {
        &self.condition
    }
}

impl fmt::Debug for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("condition", &self.condition)
            .field("otherwise", &self.not_met.is_some())
            .finish_non_exhaustive()
    }
}

impl ItemTransform for Conditional {
    fn on_item<'a>(
        &'a mut self,
        item: &'a Item,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<Outcome, TransformError>> {
        Box::pin(async move {
            if evaluate(item, &self.condition) {
                context.increment(MET_COUNTER);
                self.met.on_item(item, context).await
            } else {
                context.increment(NOT_MET_COUNTER);
                match self.not_met.as_mut() {
                    Some(transform) => transform.on_item(item, context).await,
                    None => Ok(Outcome::Keep),
                }
            }
        })
    }

    fn on_finalize<'a>(
        &'a mut self,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<(), TransformError>> {
        Box::pin(async move {
            let met = self.met.on_finalize(context).await;
            let not_met = match self.not_met.as_mut() {
                Some(transform) => transform.on_finalize(context).await,
                None => Ok(()),
            };
            met.and(not_met)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_fn;
    use filters::ConditionOptions;

    fn tag(label: &'static str) -> impl ItemTransform {
        from_fn(move |item, _context| Ok(Outcome::Replace(item.clone().with_contents(label))))
    }

    async fn run(gate: &mut Conditional, relative: &str) -> (Option<Vec<u8>>, StageContext) {
        let mut context = StageContext::new("gate");
        let item = Item::new(format!("/src/{relative}"), relative).with_contents("raw");
        let outcome = gate.on_item(&item, &mut context).await.unwrap();
        let bytes = match outcome {
            Outcome::Replace(replaced) => replaced.contents().map(<[u8]>::to_vec),
            Outcome::Keep => item.contents().map(<[u8]>::to_vec),
            Outcome::Drop => None,
        };
        (bytes, context)
    }

    #[tokio::test]
    async fn matching_items_take_met_branch() {
        let mut gate = Conditional::new(ConditionOptions::new().with_extensions(["js"]), tag("met"));
        let (bytes, context) = run(&mut gate, "app.js").await;
        assert_eq!(bytes.as_deref(), Some(&b"met"[..]));
        assert_eq!(context.counter(MET_COUNTER), 1);
        assert_eq!(context.counter(NOT_MET_COUNTER), 0);
    }

    #[tokio::test]
    async fn non_matching_items_are_kept_without_otherwise() {
        let mut gate = Conditional::new(false, tag("met"));
        let (bytes, context) = run(&mut gate, "app.js").await;
        assert_eq!(bytes.as_deref(), Some(&b"raw"[..]));
        assert_eq!(context.counter(NOT_MET_COUNTER), 1);
    }

    #[tokio::test]
    async fn otherwise_branch_handles_the_rest() {
        let mut gate = Conditional::new(false, tag("met")).otherwise(tag("other"));
        let (bytes, _) = run(&mut gate, "app.js").await;
        assert_eq!(bytes.as_deref(), Some(&b"other"[..]));
    }

    #[tokio::test]
    async fn finalize_runs_both_hooks_and_keeps_first_error() {
        let met = from_fn(|_item, _context| Ok(Outcome::Keep)).with_finalize(|context| {
            context.increment("met_final");
            Err("met failed".into())
        });
        let other = from_fn(|_item, _context| Ok(Outcome::Keep)).with_finalize(|context| {
            context.increment("other_final");
            Err("other failed".into())
        });
        let mut gate = Conditional::new(true, met).otherwise(other);
        let mut context = StageContext::new("gate");

        let error = gate.on_finalize(&mut context).await.unwrap_err();
        assert_eq!(error.to_string(), "met failed");
        assert_eq!(context.counter("met_final"), 1);
        assert_eq!(context.counter("other_final"), 1);
    }
}
