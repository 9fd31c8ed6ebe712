use std::ops::RangeInclusive;

use crate::foundation::error::{SlotframeError, SlotframeResult};
use crate::mask::pattern::Pattern;

/// Column count of the fixed grid assumed by [`RowStrip`] and [`ColumnStrip`].
pub const GRID_COLUMNS: usize = 9;

/// Edge classification produced by [`BorderPattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Border {
    /// Slot lies on the outer edge of the grid.
    Outer,
    /// Slot lies strictly inside the grid.
    Inner,
}

/// Classifies the cells of a `width x height` grid as outer edge or inner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BorderPattern {
    width: usize,
    height: usize,
}

impl BorderPattern {
    /// Border pattern for a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Classify `index`; `None` outside the grid.
    pub fn symbol(&self, index: usize) -> Option<Border> {
        let size = self.width * self.height;
        if index >= size {
            return None;
        }
        let (row, column) = (index / self.width, index % self.width);
        let outer =
            row == 0 || row + 1 == self.height || column == 0 || column + 1 == self.width;
        Some(if outer { Border::Outer } else { Border::Inner })
    }
}

impl From<BorderPattern> for Pattern<Border> {
    fn from(border: BorderPattern) -> Self {
        Pattern::new(move |index| border.symbol(index))
    }
}

/// Checkerboard tile color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// Dark tile.
    Black,
    /// Light tile.
    White,
}

impl Tile {
    /// The other color.
    pub fn other(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Alternates two tiles by index parity over `0..size`.
///
/// Parity-only alternation yields a true checkerboard on grids with an odd column count,
/// which is what the 9-column grids this targets have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CheckerboardPattern {
    size: usize,
    start: Tile,
}

impl CheckerboardPattern {
    /// Checkerboard of `size` slots whose slot 0 has the `start` tile.
    pub fn new(size: usize, start: Tile) -> Self {
        Self { size, start }
    }

    /// Tile at `index`; `None` outside `0..size`.
    pub fn symbol(&self, index: usize) -> Option<Tile> {
        if index >= self.size {
            return None;
        }
        Some(if index % 2 == 0 {
            self.start
        } else {
            self.start.other()
        })
    }

    /// The same board with every tile swapped.
    pub fn inverse(&self) -> Self {
        Self {
            size: self.size,
            start: self.start.other(),
        }
    }
}

impl From<CheckerboardPattern> for Pattern<Tile> {
    fn from(board: CheckerboardPattern) -> Self {
        Pattern::new(move |index| board.symbol(index))
    }
}

fn strip_range(first: usize, last: usize) -> SlotframeResult<RangeInclusive<usize>> {
    if first >= last {
        return Err(SlotframeError::validation(format!(
            "strip start ({first}) must be lower than end ({last})"
        )));
    }
    Ok(first..=last)
}

/// Horizontal strip: slots of `row` whose column lies in an inclusive range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowStrip {
    row: usize,
    columns: RangeInclusive<usize>,
}

impl RowStrip {
    /// Strip over columns `first..=last` of `row`. Fails unless `first < last`.
    pub fn new(row: usize, first: usize, last: usize) -> SlotframeResult<Self> {
        Ok(Self {
            row,
            columns: strip_range(first, last)?,
        })
    }

    /// The whole `row`.
    pub fn full(row: usize) -> Self {
        Self {
            row,
            columns: 0..=GRID_COLUMNS - 1,
        }
    }

    /// Row this strip lies in.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Inclusive column range.
    pub fn columns(&self) -> &RangeInclusive<usize> {
        &self.columns
    }

    /// `true` when `index` is inside the strip.
    pub fn symbol(&self, index: usize) -> bool {
        index / GRID_COLUMNS == self.row && self.columns.contains(&(index % GRID_COLUMNS))
    }
}

impl From<RowStrip> for Pattern<bool> {
    fn from(strip: RowStrip) -> Self {
        Pattern::new(move |index| Some(strip.symbol(index)))
    }
}

/// Vertical strip: slots of `column` whose row lies in an inclusive range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnStrip {
    column: usize,
    rows: RangeInclusive<usize>,
}

impl ColumnStrip {
    /// Strip over rows `first..=last` of `column`. Fails unless `first < last`.
    pub fn new(column: usize, first: usize, last: usize) -> SlotframeResult<Self> {
        Ok(Self {
            column,
            rows: strip_range(first, last)?,
        })
    }

    /// Rows `0..=5` of `column`, i.e. the full height of a six-row grid.
    pub fn full(column: usize) -> Self {
        Self { column, rows: 0..=5 }
    }

    /// Column this strip lies in.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Inclusive row range.
    pub fn rows(&self) -> &RangeInclusive<usize> {
        &self.rows
    }

    /// `true` when `index` is inside the strip.
    pub fn symbol(&self, index: usize) -> bool {
        index % GRID_COLUMNS == self.column && self.rows.contains(&(index / GRID_COLUMNS))
    }
}

impl From<ColumnStrip> for Pattern<bool> {
    fn from(strip: ColumnStrip) -> Self {
        Pattern::new(move |index| Some(strip.symbol(index)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/patterns.rs"]
mod tests;
