use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::{EngineError, EngineResult};

/// Largest supported board edge; also sizes the Zobrist table.
pub const MAX_SIDE: usize = 16;
const MIN_SIDE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Dark pieces, start on the low rows and move towards higher row indices.
    Onyx,
    /// Light pieces, start on the high rows and move towards row 0.
    Crystal,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Onyx, Side::Crystal];

    pub fn opponent(self) -> Side {
        match self {
            Side::Onyx => Side::Crystal,
            Side::Crystal => Side::Onyx,
        }
    }

    /// Grid value used at the presentation boundary (1 = Onyx, 2 = Crystal).
    pub fn cell(self) -> u8 {
        match self {
            Side::Onyx => 1,
            Side::Crystal => 2,
        }
    }

    pub fn from_cell(value: u8) -> Option<Side> {
        match value {
            1 => Some(Side::Onyx),
            2 => Some(Side::Crystal),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Onyx => 0,
            Side::Crystal => 1,
        }
    }

    /// Row delta of a single step forward.
    pub fn forward(self) -> i32 {
        match self {
            Side::Onyx => 1,
            Side::Crystal => -1,
        }
    }

    pub fn goal_row(self, dims: Dimensions) -> u8 {
        match self {
            Side::Onyx => dims.height - 1,
            Side::Crystal => 0,
        }
    }

    /// Rows already travelled from this side's home edge.
    pub fn advancement(self, sq: Square, dims: Dimensions) -> u8 {
        match self {
            Side::Onyx => sq.row,
            Side::Crystal => dims.height - 1 - sq.row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self { Self { row, col } }

    /// Chebyshev (king-move) distance.
    pub fn distance(self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions", into = "RawDimensions")]
pub struct Dimensions {
    width: u8,
    height: u8,
}

#[derive(Serialize, Deserialize)]
struct RawDimensions {
    width: usize,
    height: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = EngineError;
    fn try_from(raw: RawDimensions) -> EngineResult<Self> { Dimensions::new(raw.width, raw.height) }
}

impl From<Dimensions> for RawDimensions {
    fn from(d: Dimensions) -> Self { RawDimensions { width: d.width(), height: d.height() } }
}

impl Default for Dimensions {
    fn default() -> Self { Self::standard() }
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> EngineResult<Self> {
        let ok = |n: usize| (MIN_SIDE..=MAX_SIDE).contains(&n);
        if !ok(width) || !ok(height) {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self { width: width as u8, height: height as u8 })
    }

    /// The regular 8x8 board.
    pub const fn standard() -> Self { Self { width: 8, height: 8 } }

    /// The wide variant: 10 columns, 5 rows.
    pub const fn wide() -> Self { Self { width: 10, height: 5 } }

    pub fn width(&self) -> usize { self.width as usize }
    pub fn height(&self) -> usize { self.height as usize }
    pub fn cells(&self) -> usize { self.width() * self.height() }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < self.height as i32 && col < self.width as i32
    }

    pub(crate) fn index(&self, sq: Square) -> usize { sq.row as usize * self.width() + sq.col as usize }

    /// The middle half of the columns: `width/4 .. 3*width/4`.
    pub fn center_columns(&self) -> Range<u8> { self.width / 4..(3 * self.width) / 4 }

    pub fn is_center(&self, col: u8) -> bool { self.center_columns().contains(&col) }
}
