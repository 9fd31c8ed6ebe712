use std::sync::Arc;

use crate::foundation::error::{SlotframeError, SlotframeResult};
use crate::mask::pattern::Pattern;
use crate::mask::patterns::GRID_COLUMNS;

/// Role of a slot within a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Plain storage slot.
    Container,
    /// Crafting or processing input.
    Crafting,
    /// Output slot.
    Result,
    /// Fuel input.
    Fuel,
    /// Armor or equipment slot.
    Armor,
    /// Hotbar slot.
    Quickbar,
    /// Index not covered by the shape.
    Outside,
}

/// Container layouts with a known shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ContainerType {
    Anvil,
    Barrel,
    Beacon,
    BlastFurnace,
    Brewing,
    Cartography,
    /// Chest of any height; the shape is derived from the slot count.
    Chest,
    ChiseledBookshelf,
    Composter,
    Crafting,
    Creative,
    Dispenser,
    Dropper,
    Enchanting,
    EnderChest,
    Furnace,
    Grindstone,
    Hopper,
    Jukebox,
    Lectern,
    Loom,
    Merchant,
    Player,
    ShulkerBox,
    Smithing,
    Smoker,
    Stonecutter,
    Workbench,
    Horse,
    Mule,
    ChestMule,
    Llama,
    ChestLlama,
    Villager,
}

/// Topology of a container: how many slots it has and what each slot is for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Shape {
    /// `size` slots of one kind, no row structure.
    Generic { size: usize, kind: SlotKind },
    /// `columns x rows` slots of one kind.
    Grid {
        columns: usize,
        rows: usize,
        kind: SlotKind,
    },
    /// Parts laid out one after another.
    Combined(Arc<[Shape]>),
}

impl Shape {
    /// `size` slots of `kind`.
    pub fn generic(size: usize, kind: SlotKind) -> Self {
        Self::Generic { size, kind }
    }

    /// `columns x rows` slots of `kind`.
    pub fn grid(columns: usize, rows: usize, kind: SlotKind) -> Self {
        Self::Grid {
            columns,
            rows,
            kind,
        }
    }

    /// A chest with `rows` full rows of container slots.
    pub fn chest(rows: usize) -> Self {
        Self::grid(GRID_COLUMNS, rows, SlotKind::Container)
    }

    /// Concatenate `parts` in order. Fails with fewer than two parts.
    pub fn combine(parts: impl IntoIterator<Item = Shape>) -> SlotframeResult<Self> {
        let parts: Arc<[Shape]> = parts.into_iter().collect();
        if parts.len() < 2 {
            return Err(SlotframeError::validation(format!(
                "combining {} shape(s) is meaningless, need at least 2",
                parts.len()
            )));
        }
        Ok(Self::Combined(parts))
    }

    /// Total slot count.
    pub fn size(&self) -> usize {
        match self {
            Self::Generic { size, .. } => *size,
            Self::Grid { columns, rows, .. } => columns * rows,
            Self::Combined(parts) => parts.iter().map(Shape::size).sum(),
        }
    }

    /// Kind of the slot at `index`; [`SlotKind::Outside`] past the end.
    pub fn kind_at(&self, index: usize) -> SlotKind {
        match self {
            Self::Generic { kind, .. } | Self::Grid { kind, .. } => {
                if index < self.size() {
                    *kind
                } else {
                    SlotKind::Outside
                }
            }
            Self::Combined(parts) => {
                let mut offset = 0;
                for part in parts.iter() {
                    let size = part.size();
                    if index < offset + size {
                        return part.kind_at(index - offset);
                    }
                    offset += size;
                }
                SlotKind::Outside
            }
        }
    }

    /// Total pattern over this shape.
    pub fn to_pattern(&self) -> Pattern<SlotKind> {
        let shape = self.clone();
        Pattern::new(move |index| Some(shape.kind_at(index)))
    }

    /// Fixed layout of `container`.
    ///
    /// Chests have no fixed layout; this returns the three-row chest. Use
    /// [`Shape::for_container`] when the slot count is known.
    pub fn preset(container: ContainerType) -> Self {
        use SlotKind::*;

        let g = Shape::generic;
        // every preset combines at least two parts
        let combine = |parts: Vec<Shape>| Shape::Combined(parts.into());
        match container {
            ContainerType::Anvil
            | ContainerType::Cartography
            | ContainerType::Grindstone
            | ContainerType::Merchant
            | ContainerType::Smithing => combine(vec![g(2, Crafting), g(1, Result)]),
            ContainerType::Barrel | ContainerType::ShulkerBox => Shape::chest(3),
            ContainerType::Beacon => g(1, Crafting),
            ContainerType::BlastFurnace | ContainerType::Furnace | ContainerType::Smoker => {
                combine(vec![g(1, Crafting), g(1, Fuel), g(1, Result)])
            }
            ContainerType::Brewing => combine(vec![g(3, Result), g(1, Crafting), g(1, Fuel)]),
            ContainerType::Chest | ContainerType::EnderChest => Shape::chest(3),
            ContainerType::ChiseledBookshelf => g(6, Container),
            ContainerType::Composter | ContainerType::Jukebox | ContainerType::Lectern => {
                g(1, Container)
            }
            ContainerType::Crafting => combine(vec![Shape::grid(2, 2, Crafting), g(1, Result)]),
            ContainerType::Creative => Shape::grid(GRID_COLUMNS, 1, Quickbar),
            ContainerType::Dispenser | ContainerType::Dropper => Shape::grid(3, 3, Container),
            ContainerType::Enchanting => g(2, Crafting),
            ContainerType::Hopper => Shape::grid(5, 1, Container),
            ContainerType::Loom => combine(vec![g(3, Crafting), g(1, Result)]),
            ContainerType::Player => combine(vec![
                Shape::grid(GRID_COLUMNS, 1, Quickbar),
                Shape::grid(GRID_COLUMNS, 3, Container),
                g(4, Armor),
                g(1, Container),
            ]),
            ContainerType::Stonecutter => combine(vec![g(1, Crafting), g(1, Result)]),
            ContainerType::Workbench => combine(vec![Shape::grid(3, 3, Crafting), g(1, Result)]),
            ContainerType::Horse => g(2, Armor),
            ContainerType::Mule | ContainerType::Llama => g(1, Armor),
            ContainerType::ChestMule => combine(vec![g(1, Armor), Shape::grid(5, 3, Container)]),
            ContainerType::ChestLlama => combine(vec![g(1, Armor), Shape::grid(3, 3, Container)]),
            ContainerType::Villager => g(8, Container),
        }
    }

    /// Shape of a `container` holding `size` slots.
    ///
    /// Only chests depend on `size`: whole rows give a chest grid, anything else a generic
    /// container of `size` slots.
    pub fn for_container(container: ContainerType, size: usize) -> Self {
        match container {
            ContainerType::Chest if size % GRID_COLUMNS == 0 => Shape::chest(size / GRID_COLUMNS),
            ContainerType::Chest => Shape::generic(size, SlotKind::Container),
            other => Shape::preset(other),
        }
    }
}

impl From<&Shape> for Pattern<SlotKind> {
    fn from(shape: &Shape) -> Self {
        shape.to_pattern()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/shape.rs"]
mod tests;
