//! Error types for the engine.
//!
//! Everything that can go wrong is caught either when a session or position is
//! built (configuration and layout errors) or at the state-transition boundary
//! (illegal moves). Evaluation and ordering are total and never fail.

use thiserror::Error;

use crate::board::{Direction, Side, Square};

#[derive(Error, Debug)]
pub enum EngineError {
    /// A move that does not fit the position it was applied to.
    #[error("illegal move: {mover:?} {direction:?} from {origin}: {reason}")]
    IllegalMove {
        origin: Square,
        direction: Direction,
        mover: Side,
        reason: &'static str,
    },

    /// The side to move has no candidate moves in a position not flagged terminal.
    #[error("no legal move for {side:?}")]
    NoLegalMove { side: Side },

    /// A decision was requested for a finished game.
    #[error("game is already over: {winner:?} has won")]
    GameOver { winner: Side },

    #[error("invalid search depth {0} (must be at least 1)")]
    InvalidDepth(u32),

    #[error("invalid thread count {0} (must be at least 1)")]
    InvalidThreads(usize),

    #[error("unknown heuristic id {0} (expected 1..=4)")]
    UnknownHeuristic(u8),

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("evaluation weights must be finite")]
    InvalidWeights,

    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type EngineResult<T> = Result<T, EngineError>;
