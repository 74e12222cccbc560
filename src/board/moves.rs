use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{Dimensions, Side, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    ForwardLeft,
    Forward,
    ForwardRight,
}

impl Direction {
    /// Generation order within one piece.
    pub const ALL: [Direction; 3] = [Direction::ForwardLeft, Direction::Forward, Direction::ForwardRight];

    pub fn col_delta(self) -> i32 {
        match self {
            Direction::ForwardLeft => -1,
            Direction::Forward => 0,
            Direction::ForwardRight => 1,
        }
    }
}

/// One step of one piece. The destination is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: Square,
    pub direction: Direction,
    pub mover: Side,
}

impl Move {
    pub fn new(origin: Square, direction: Direction, mover: Side) -> Self { Self { origin, direction, mover } }

    /// Target square, or `None` when the step leaves the board.
    pub fn destination(&self, dims: Dimensions) -> Option<Square> {
        let row = self.origin.row as i32 + self.mover.forward();
        let col = self.origin.col as i32 + self.direction.col_delta();
        if dims.contains(row, col) { Some(Square::new(row as u8, col as u8)) } else { None }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::ForwardLeft => "fl",
            Direction::Forward => "f",
            Direction::ForwardRight => "fr",
        };
        write!(f, "{}{}:{}", self.origin.row, self.origin.col, dir)
    }
}
