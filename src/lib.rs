// Breakthrough engine: immutable positions, move generation, minimax/alpha-beta search
pub mod arena;
pub mod board;
pub mod error;
pub mod interface;
pub mod perft;
pub mod protocol;
pub mod search;

pub use board::{BoardState, Dimensions, Move, Side, Square};
pub use error::{EngineError, EngineResult};
pub use search::{Algorithm, Decision, Heuristic, SearchParams, Searcher};
