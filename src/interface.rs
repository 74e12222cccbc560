//! Grid-level entry point for presentation layers.
//!
//! Callers hand over a dense grid (0 = empty, 1 = Onyx, 2 = Crystal), the side
//! to move, a depth and a heuristic id, and get back the grid after the engine's
//! move, the nodes visited, and the opponent's remaining piece count.

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Dimensions, Rules, Side};
use crate::error::EngineResult;
use crate::search::{Algorithm, Heuristic, SearchParams, Searcher};

pub type Grid = Vec<Vec<u8>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub grid: Grid,
    pub side: Side,
    pub depth: u32,
    /// Heuristic id, 1..=4.
    pub heuristic: u8,
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Board size for non-default variants; 8x8 otherwise.
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReply {
    pub grid: Grid,
    pub nodes: u64,
    pub remaining: usize,
    pub winning: bool,
}

impl TurnRequest {
    pub fn dimensions(&self) -> EngineResult<Dimensions> {
        let standard = Dimensions::standard();
        Dimensions::new(self.width.unwrap_or(standard.width()), self.height.unwrap_or(standard.height()))
    }

    pub fn params(&self) -> EngineResult<SearchParams> {
        Ok(SearchParams {
            depth: self.depth,
            algorithm: self.algorithm,
            heuristic: Heuristic::try_from(self.heuristic)?,
            seed: self.seed,
            ..SearchParams::default()
        })
    }
}

pub fn play_turn(req: &TurnRequest) -> EngineResult<TurnReply> {
    let params = req.params()?;
    let mut searcher = Searcher::new(params)?;
    let root = BoardState::from_grid(&req.grid, req.dimensions()?, req.side, params.heuristic)?.with_rules(req.rules);
    let d = searcher.decide(&root)?;
    Ok(TurnReply { grid: d.state.to_grid(), nodes: d.nodes, remaining: d.remaining, winning: d.winning })
}

/// The bare contract: `(grid after move, nodes visited, opponent pieces left)`.
/// Without a seed the noisy heuristics draw fresh noise on every call.
pub fn decide_grid(
    grid: &[Vec<u8>],
    side: Side,
    depth: u32,
    heuristic: u8,
    algorithm: Algorithm,
    dims: Option<Dimensions>,
    seed: Option<u64>,
) -> EngineResult<(Grid, u64, usize)> {
    let dims = dims.unwrap_or_default();
    let req = TurnRequest {
        grid: grid.to_vec(),
        side,
        depth,
        heuristic,
        algorithm,
        width: Some(dims.width()),
        height: Some(dims.height()),
        rules: Rules::default(),
        seed,
    };
    let reply = play_turn(&req)?;
    Ok((reply.grid, reply.nodes, reply.remaining))
}
