use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::foundation::slot::SlotUpdate;

/// Pure mapping from a pattern symbol to a slot update.
///
/// The mask sees `None` for indices the pattern leaves undefined, so it can decide to clear
/// or keep those slots too.
pub struct Mask<S, I> {
    lookup: Arc<dyn Fn(Option<&S>) -> SlotUpdate<I> + Send + Sync>,
}

impl<S, I> Clone for Mask<S, I> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
        }
    }
}

impl<S, I> fmt::Debug for Mask<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask").finish_non_exhaustive()
    }
}

impl<S: 'static, I: 'static> Mask<S, I> {
    /// Mask backed by an arbitrary pure function.
    pub fn new(lookup: impl Fn(Option<&S>) -> SlotUpdate<I> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Update for `symbol`.
    pub fn item(&self, symbol: Option<&S>) -> SlotUpdate<I> {
        (self.lookup)(symbol)
    }
}

impl<S, I> Mask<S, I>
where
    S: Eq + Hash + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    /// Mask backed by a symbol -> item map; unmapped and undefined symbols keep their slot.
    pub fn from_map(items: HashMap<S, I>) -> Self {
        Self::new(move |symbol| match symbol.and_then(|s| items.get(s)) {
            Some(item) => SlotUpdate::Set(item.clone()),
            None => SlotUpdate::Keep,
        })
    }

    /// Mask that writes `item` for `symbol` and keeps everything else.
    pub fn single(symbol: S, item: I) -> Self {
        Self::new(move |s| {
            if s == Some(&symbol) {
                SlotUpdate::Set(item.clone())
            } else {
                SlotUpdate::Keep
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/item_mask.rs"]
mod tests;
