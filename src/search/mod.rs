pub mod alphabeta;
pub mod eval;
pub mod noise;
pub mod ordering;
pub mod zobrist;

pub use alphabeta::{Algorithm, Decision, SearchParams, Searcher};
pub use eval::{EvalWeights, Evaluator, Heuristic};

use crate::board::BoardState;
use crate::error::EngineResult;

/// One alpha-beta decision with default settings: the resulting position, the
/// nodes visited and the opponent's remaining piece count.
pub fn decide(root: &BoardState, depth: u32, heuristic: Heuristic) -> EngineResult<(BoardState, u64, usize)> {
    let params = SearchParams { depth, heuristic, ..SearchParams::default() };
    let d = Searcher::new(params)?.decide(root)?;
    Ok((d.state, d.nodes, d.remaining))
}
