use std::convert::Infallible;

use crate::foundation::error::{SlotframeError, SlotframeResult};
use crate::foundation::slot::SlotUpdate;
use crate::mask::item_mask::Mask;
use crate::mask::pattern::Pattern;
use crate::sequence::int_gen::IntGenerator;

/// One rendering step: a pattern, a mask, and the slots they may touch.
///
/// Applying a frame walks a rewound copy of the active-slot generator, so the same frame can be
/// applied any number of times with identical effect.
pub struct Frame<S, I> {
    pattern: Pattern<S>,
    mask: Mask<S, I>,
    active_slots: IntGenerator,
}

impl<S, I> Clone for Frame<S, I> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            mask: self.mask.clone(),
            active_slots: self.active_slots.clone(),
        }
    }
}

impl<S, I> std::fmt::Debug for Frame<S, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("active_slots", &self.active_slots)
            .finish_non_exhaustive()
    }
}

fn ensure_finite(active_slots: &IntGenerator) -> SlotframeResult<()> {
    if active_slots.is_infinite() {
        return Err(SlotframeError::validation(
            "frame active slots must be a finite generator",
        ));
    }
    Ok(())
}

impl<S: 'static, I: 'static> Frame<S, I> {
    /// Build a frame. Fails when `active_slots` never runs out.
    pub fn new(
        pattern: Pattern<S>,
        mask: Mask<S, I>,
        active_slots: IntGenerator,
    ) -> SlotframeResult<Self> {
        ensure_finite(&active_slots)?;
        Ok(Self {
            pattern,
            mask,
            active_slots,
        })
    }

    /// Write every `Set` update into `container`.
    pub fn apply(&self, mut container: impl FnMut(usize, I)) {
        let result = self.try_apply(|index, item| {
            container(index, item);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`Frame::apply`], stopping at the first error `container` returns.
    pub fn try_apply<E>(
        &self,
        mut container: impl FnMut(usize, I) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut slots = self.active_slots.clone();
        slots.reset();
        for raw in slots {
            let Ok(index) = usize::try_from(raw) else {
                tracing::trace!(index = raw, "skipping negative slot index");
                continue;
            };
            let symbol = self.pattern.symbol(index);
            if let SlotUpdate::Set(item) = self.mask.item(symbol.as_ref()) {
                container(index, item)?;
            }
        }
        Ok(())
    }

    /// Copy of this frame drawing symbols from `pattern`.
    pub fn with_pattern(&self, pattern: Pattern<S>) -> Self {
        Self {
            pattern,
            ..self.clone()
        }
    }

    /// Copy of this frame resolving items through `mask`.
    pub fn with_mask(&self, mask: Mask<S, I>) -> Self {
        Self {
            mask,
            ..self.clone()
        }
    }

    /// Copy of this frame touching `active_slots` instead. Fails on an infinite generator.
    pub fn with_active_slots(&self, active_slots: IntGenerator) -> SlotframeResult<Self> {
        ensure_finite(&active_slots)?;
        Ok(Self {
            active_slots,
            ..self.clone()
        })
    }

    /// Symbol source.
    pub fn pattern(&self) -> &Pattern<S> {
        &self.pattern
    }

    /// Symbol to item mapping.
    pub fn mask(&self) -> &Mask<S, I> {
        &self.mask
    }

    /// Slots this frame may touch.
    pub fn active_slots(&self) -> &IntGenerator {
        &self.active_slots
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/frame.rs"]
mod tests;
