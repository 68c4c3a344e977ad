//! crates/stage/src/transform.rs
//! The transform seam and closure adapters.

use std::fmt;
use std::future::{Future, ready};
use std::pin::Pin;

use item::Item;

use crate::{Outcome, StageContext, TransformError};

/// Boxed, sendable future returned by [`ItemTransform`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FinalizeFn = Box<dyn FnMut(&mut StageContext) -> Result<(), TransformError> + Send>;

/// Per-item work plugged into a [`Stage`](crate::Stage).
///
/// `on_item` sees the original item by reference; on error the stage
/// forwards that original unchanged. Panics inside a transform are not
/// caught and propagate to the task driving the stage.
pub trait ItemTransform: Send {
    /// Handles one item.
    fn on_item<'a>(
        &'a mut self,
        item: &'a Item,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<Outcome, TransformError>>;

    /// Runs once after the last item. The default does nothing.
    fn on_finalize<'a>(
        &'a mut self,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<(), TransformError>> {
        let _ = context;
        Box::pin(ready(Ok(())))
    }
}

impl<T: ItemTransform + ?Sized> ItemTransform for Box<T> {
    fn on_item<'a>(
        &'a mut self,
        item: &'a Item,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<Outcome, TransformError>> {
        (**self).on_item(item, context)
    }

    fn on_finalize<'a>(
        &'a mut self,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<(), TransformError>> {
        (**self).on_finalize(context)
    }
}

/// Transform built from a synchronous closure. See [`from_fn`].
pub struct FnTransform<F> {
    on_item: F,
    on_finalize: Option<FinalizeFn>,
}

/// Wraps a synchronous closure as an [`ItemTransform`].
///
/// ```
/// use stage::{Outcome, from_fn};
///
/// let upper = from_fn(|item, _context| {
///     let Some(bytes) = item.contents() else {
///         return Ok(Outcome::Keep);
///     };
///     Ok(Outcome::Replace(item.clone().with_contents(bytes.to_ascii_uppercase())))
/// });
/// # let _ = upper;
/// ```
pub fn from_fn<F>(on_item: F) -> FnTransform<F>
where
    F: FnMut(&Item, &mut StageContext) -> Result<Outcome, TransformError> + Send,
{
    FnTransform {
        on_item,
        on_finalize: None,
    }
}

impl<F> FnTransform<F> {
    /// Adds a finalize hook.
    #[must_use]
    pub fn with_finalize<G>(mut self, on_finalize: G) -> Self
    where
        G: FnMut(&mut StageContext) -> Result<(), TransformError> + Send + 'static,
    {
        self.on_finalize = Some(Box::new(on_finalize));
        self
    }
}

impl<F> fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform")
            .field("finalize", &self.on_finalize.is_some())
            .finish_non_exhaustive()
    }
}

impl<F> ItemTransform for FnTransform<F>
where
    F: FnMut(&Item, &mut StageContext) -> Result<Outcome, TransformError> + Send,
{
    fn on_item<'a>(
        &'a mut self,
        item: &'a Item,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<Outcome, TransformError>> {
        Box::pin(ready((self.on_item)(item, context)))
    }

    fn on_finalize<'a>(
        &'a mut self,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<(), TransformError>> {
        let result = self.on_finalize.as_mut().map_or(Ok(()), |hook| hook(context));
        Box::pin(ready(result))
    }
}

/// Transform built from an async closure. See [`from_async_fn`].
pub struct AsyncFnTransform<F> {
    on_item: F,
    on_finalize: Option<FinalizeFn>,
}

/// Wraps an async closure as an [`ItemTransform`].
///
/// The closure receives an owned copy of the item so its future can be
/// `'static`. Counters are still kept by the stage.
///
/// ```
/// use stage::{Outcome, from_async_fn};
///
/// let rename = from_async_fn(|item| async move {
///     tokio::task::yield_now().await;
///     Ok(Outcome::Replace(item.with_relative_path("renamed.txt")))
/// });
/// # let _ = rename;
/// ```
pub fn from_async_fn<F, Fut>(on_item: F) -> AsyncFnTransform<F>
where
    F: FnMut(Item) -> Fut + Send,
    Fut: Future<Output = Result<Outcome, TransformError>> + Send + 'static,
{
    AsyncFnTransform {
        on_item,
        on_finalize: None,
    }
}

impl<F> AsyncFnTransform<F> {
    /// Adds a finalize hook.
    #[must_use]
    pub fn with_finalize<G>(mut self, on_finalize: G) -> Self
    where
        G: FnMut(&mut StageContext) -> Result<(), TransformError> + Send + 'static,
    {
        self.on_finalize = Some(Box::new(on_finalize));
        self
    }
}

impl<F> fmt::Debug for AsyncFnTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnTransform")
            .field("finalize", &self.on_finalize.is_some())
            .finish_non_exhaustive()
    }
}

impl<F, Fut> ItemTransform for AsyncFnTransform<F>
where
    F: FnMut(Item) -> Fut + Send,
    Fut: Future<Output = Result<Outcome, TransformError>> + Send + 'static,
{
    fn on_item<'a>(
        &'a mut self,
        item: &'a Item,
        _context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<Outcome, TransformError>> {
        Box::pin((self.on_item)(item.clone()))
    }

    fn on_finalize<'a>(
        &'a mut self,
        context: &'a mut StageContext,
    ) -> BoxFuture<'a, Result<(), TransformError>> {
        let result = self.on_finalize.as_mut().map_or(Ok(()), |hook| hook(context));
        Box::pin(ready(result))
    }
}
