/// Outcome of a mask lookup for one slot.
///
/// `Keep` leaves the slot untouched. `Set` writes the item, even when the item itself is an
/// "empty" value such as `None` for an `Option<T>` item type: clearing a slot is a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SlotUpdate<T> {
    /// No update for this slot.
    Keep,
    /// Write this item into the slot.
    Set(T),
}

impl<T> Default for SlotUpdate<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> SlotUpdate<T> {
    /// `true` when the slot should be written.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// `true` when the slot should be left alone.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Borrow the item, if any.
    pub fn as_ref(&self) -> SlotUpdate<&T> {
        match self {
            Self::Keep => SlotUpdate::Keep,
            Self::Set(item) => SlotUpdate::Set(item),
        }
    }

    /// Transform the item, keeping `Keep` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SlotUpdate<U> {
        match self {
            Self::Keep => SlotUpdate::Keep,
            Self::Set(item) => SlotUpdate::Set(f(item)),
        }
    }

    /// Take the item out.
    ///
    /// # Panics
    ///
    /// Panics on [`SlotUpdate::Keep`].
    pub fn unwrap(self) -> T {
        match self {
            Self::Set(item) => item,
            Self::Keep => panic!("called `SlotUpdate::unwrap()` on a `Keep` value"),
        }
    }

    /// Convert into a plain `Option`, `Keep` becoming `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Keep => None,
            Self::Set(item) => Some(item),
        }
    }
}

impl<T> From<Option<T>> for SlotUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(item) => Self::Set(item),
            None => Self::Keep,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/slot.rs"]
mod tests;
