use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::movegen;
use crate::board::{Dimensions, Direction, Move, Side, Square};
use crate::error::{EngineError, EngineResult};
use crate::search::eval::Heuristic;

/// How a game is won besides immobilizing the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalRule {
    /// One piece on the far edge, or the opponent has no pieces left.
    #[default]
    Edge,
    /// Three pieces on the far edge, or the opponent is down to two pieces.
    ThreeHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub goal: GoalRule,
    /// Whether a straight-forward step may capture.
    pub straight_captures: bool,
}

impl Default for Rules {
    fn default() -> Self { Self { goal: GoalRule::Edge, straight_captures: true } }
}

impl Rules {
    /// Classic Breakthrough: only diagonal steps capture.
    pub fn classic() -> Self { Self { goal: GoalRule::Edge, straight_captures: false } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalStatus {
    Ongoing,
    OnyxWins,
    CrystalWins,
}

impl TerminalStatus {
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Onyx => TerminalStatus::OnyxWins,
            Side::Crystal => TerminalStatus::CrystalWins,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            TerminalStatus::Ongoing => None,
            TerminalStatus::OnyxWins => Some(Side::Onyx),
            TerminalStatus::CrystalWins => Some(Side::Crystal),
        }
    }
}

/// An immutable position. Every transition builds a new value.
///
/// Piece lists are kept in generation order (row ascending; Onyx breaks ties by
/// descending column, Crystal by ascending column) so that move generation is
/// reproducible. `cells` mirrors the lists for constant-time occupancy checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    dims: Dimensions,
    rules: Rules,
    pieces: [Vec<Square>; 2],
    cells: Vec<u8>,
    side_to_move: Side,
    heuristic: Heuristic,
}

fn order_key(side: Side, sq: Square) -> (u8, i16) {
    match side {
        Side::Onyx => (sq.row, -(sq.col as i16)),
        Side::Crystal => (sq.row, sq.col as i16),
    }
}

fn sort_pieces(side: Side, pieces: &mut [Square]) {
    pieces.sort_unstable_by_key(|&sq| order_key(side, sq));
}

impl BoardState {
    /// Standard opening layout: two home rows per side (one on boards under four rows).
    pub fn initial(dims: Dimensions, heuristic: Heuristic) -> Self {
        let home_rows = if dims.height() >= 4 { 2 } else { 1 };
        let mut pieces: [Vec<Square>; 2] = [Vec::new(), Vec::new()];
        let mut cells = vec![0u8; dims.cells()];
        for r in 0..home_rows {
            for c in 0..dims.width() {
                let onyx = Square::new(r as u8, c as u8);
                let crystal = Square::new((dims.height() - 1 - r) as u8, c as u8);
                pieces[Side::Onyx.index()].push(onyx);
                pieces[Side::Crystal.index()].push(crystal);
                cells[dims.index(onyx)] = Side::Onyx.cell();
                cells[dims.index(crystal)] = Side::Crystal.cell();
            }
        }
        for side in Side::BOTH { sort_pieces(side, &mut pieces[side.index()]); }
        Self { dims, rules: Rules::default(), pieces, cells, side_to_move: Side::Onyx, heuristic }
    }

    pub fn from_pieces(
        dims: Dimensions,
        onyx: &[Square],
        crystal: &[Square],
        side_to_move: Side,
        heuristic: Heuristic,
    ) -> EngineResult<Self> {
        let mut cells = vec![0u8; dims.cells()];
        let mut pieces: [Vec<Square>; 2] = [Vec::with_capacity(onyx.len()), Vec::with_capacity(crystal.len())];
        for (side, list) in [(Side::Onyx, onyx), (Side::Crystal, crystal)] {
            for &sq in list {
                if !dims.contains(sq.row as i32, sq.col as i32) {
                    return Err(EngineError::InvalidPosition(format!("{side:?} piece at {sq} is off the board")));
                }
                let cell = &mut cells[dims.index(sq)];
                if *cell != 0 {
                    return Err(EngineError::InvalidPosition(format!("square {sq} is occupied twice")));
                }
                *cell = side.cell();
                pieces[side.index()].push(sq);
            }
            sort_pieces(side, &mut pieces[side.index()]);
        }
        Ok(Self { dims, rules: Rules::default(), pieces, cells, side_to_move, heuristic })
    }

    /// Reads a dense grid (0 = empty, 1 = Onyx, 2 = Crystal), row 0 first.
    pub fn from_grid(grid: &[Vec<u8>], dims: Dimensions, side_to_move: Side, heuristic: Heuristic) -> EngineResult<Self> {
        if grid.len() != dims.height() {
            return Err(EngineError::MalformedGrid(format!("expected {} rows, got {}", dims.height(), grid.len())));
        }
        let mut onyx = Vec::new();
        let mut crystal = Vec::new();
        for (r, row) in grid.iter().enumerate() {
            if row.len() != dims.width() {
                return Err(EngineError::MalformedGrid(format!("row {r} has {} cells, expected {}", row.len(), dims.width())));
            }
            for (c, &v) in row.iter().enumerate() {
                let sq = Square::new(r as u8, c as u8);
                match v {
                    0 => {}
                    1 => onyx.push(sq),
                    2 => crystal.push(sq),
                    other => return Err(EngineError::MalformedGrid(format!("unexpected cell value {other} at {sq}"))),
                }
            }
        }
        Self::from_pieces(dims, &onyx, &crystal, side_to_move, heuristic)
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn dims(&self) -> Dimensions { self.dims }
    pub fn rules(&self) -> Rules { self.rules }
    pub fn side_to_move(&self) -> Side { self.side_to_move }
    pub fn heuristic(&self) -> Heuristic { self.heuristic }

    /// Pieces of `side` in generation order.
    pub fn pieces(&self, side: Side) -> &[Square] { &self.pieces[side.index()] }

    pub fn piece_count(&self, side: Side) -> usize { self.pieces[side.index()].len() }

    pub fn occupant(&self, sq: Square) -> Option<Side> {
        if !self.dims.contains(sq.row as i32, sq.col as i32) { return None; }
        Side::from_cell(self.cells[self.dims.index(sq)])
    }

    pub fn apply_move(&self, mv: &Move) -> EngineResult<BoardState> {
        let illegal = |reason: &'static str| EngineError::IllegalMove {
            origin: mv.origin,
            direction: mv.direction,
            mover: mv.mover,
            reason,
        };
        if mv.mover != self.side_to_move { return Err(illegal("not the side to move")); }
        if self.occupant(mv.origin) != Some(mv.mover) { return Err(illegal("origin holds no piece of the mover")); }
        let dest = mv.destination(self.dims).ok_or_else(|| illegal("destination is off the board"))?;
        let captured = match self.occupant(dest) {
            Some(s) if s == mv.mover => return Err(illegal("destination holds a friendly piece")),
            Some(_) if mv.direction == Direction::Forward && !self.rules.straight_captures => {
                return Err(illegal("straight captures are disabled"));
            }
            Some(_) => true,
            None => false,
        };

        let mut next = self.clone();
        let opp = mv.mover.opponent();
        if captured { next.pieces[opp.index()].retain(|&sq| sq != dest); }
        let own = &mut next.pieces[mv.mover.index()];
        if let Some(slot) = own.iter_mut().find(|sq| **sq == mv.origin) { *slot = dest; }
        sort_pieces(mv.mover, own);
        next.cells[self.dims.index(mv.origin)] = 0;
        next.cells[self.dims.index(dest)] = mv.mover.cell();
        next.side_to_move = opp;
        Ok(next)
    }

    /// Win conditions are checked Onyx first, then Crystal, then immobilization
    /// of the side to move (which loses).
    pub fn status(&self) -> TerminalStatus {
        for side in Side::BOTH {
            let goal = side.goal_row(self.dims);
            let won = match self.rules.goal {
                GoalRule::Edge => {
                    self.pieces(side).iter().any(|sq| sq.row == goal) || self.piece_count(side.opponent()) == 0
                }
                GoalRule::ThreeHome => {
                    self.pieces(side).iter().filter(|sq| sq.row == goal).count() >= 3
                        || self.piece_count(side.opponent()) <= 2
                }
            };
            if won { return TerminalStatus::won_by(side); }
        }
        if !movegen::has_legal_move(self) {
            return TerminalStatus::won_by(self.side_to_move.opponent());
        }
        TerminalStatus::Ongoing
    }

    pub fn is_terminal(&self) -> bool { self.status() != TerminalStatus::Ongoing }

    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.dims.width()).map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.width()) {
            let line: String = row
                .iter()
                .map(|&v| match Side::from_cell(v) {
                    Some(Side::Onyx) => 'x',
                    Some(Side::Crystal) => 'o',
                    None => '.',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        write!(f, "{:?} to move", self.side_to_move)
    }
}
