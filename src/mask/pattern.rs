use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::slot::SlotUpdate;
use crate::mask::item_mask::Mask;

/// Pure mapping from a slot index to a symbol.
///
/// `None` means the pattern is undefined for that index. Patterns are immutable and cheap to
/// clone (the lookup is shared), so one pattern can back any number of frames and runners.
pub struct Pattern<S> {
    lookup: Arc<dyn Fn(usize) -> Option<S> + Send + Sync>,
}

impl<S> Clone for Pattern<S> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
        }
    }
}

impl<S> fmt::Debug for Pattern<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern").finish_non_exhaustive()
    }
}

impl<S: 'static> Pattern<S> {
    /// Pattern backed by an arbitrary pure function.
    pub fn new(lookup: impl Fn(usize) -> Option<S> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Symbol at `index`, if the pattern defines one.
    pub fn symbol(&self, index: usize) -> Option<S> {
        (self.lookup)(index)
    }

    /// Resolve each of `slots` through this pattern and `mask`, writing every `Set` update into
    /// `container`. Unlike [`crate::Frame::apply`], no frame is built.
    pub fn apply<I: 'static>(
        &self,
        mask: &Mask<S, I>,
        slots: impl IntoIterator<Item = usize>,
        mut container: impl FnMut(usize, I),
    ) {
        for index in slots {
            if let SlotUpdate::Set(item) = mask.item(self.symbol(index).as_ref()) {
                container(index, item);
            }
        }
    }
}

impl<S> Pattern<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Pattern that defines exactly one slot.
    pub fn single(location: usize, symbol: S) -> Self {
        Self::new(move |index| (index == location).then(|| symbol.clone()))
    }

    /// Pattern backed by a slot -> symbol map.
    pub fn from_map(symbols: HashMap<usize, S>) -> Self {
        Self::new(move |index| symbols.get(&index).cloned())
    }

    /// Pattern backed by a list; indices past the end are undefined.
    pub fn from_vec(symbols: Vec<S>) -> Self {
        Self::new(move |index| symbols.get(index).cloned())
    }
}

impl Pattern<usize> {
    /// Pattern mapping every slot to its own index.
    pub fn index() -> Self {
        Self::new(Some)
    }
}

impl Pattern<char> {
    /// Pattern reading one symbol per slot from a text grid.
    ///
    /// Line breaks (`\r`, `\n`) are skipped, so multi-line literals can be laid out like the
    /// grid they describe:
    ///
    /// ```
    /// let p = slotframe::Pattern::grid("ab\ncd");
    /// assert_eq!(p.symbol(2), Some('c'));
    /// assert_eq!(p.symbol(4), None);
    /// ```
    pub fn grid(text: &str) -> Self {
        let symbols: Vec<char> = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        Self::from_vec(symbols)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/pattern.rs"]
mod tests;
