use rayon::prelude::*;

use crate::board::{movegen, BoardState};
use crate::error::EngineResult;

// Terminal positions are leaves, whatever depth remains.
pub fn perft(state: &BoardState, depth: u32) -> EngineResult<u64> {
    if depth == 0 || state.is_terminal() { return Ok(1); }
    let mut nodes = 0u64;
    for mv in movegen::available_moves(state) {
        let child = state.apply_move(&mv)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}

/// `perft` with the root moves spread over the current rayon pool.
pub fn perft_split(state: &BoardState, depth: u32) -> EngineResult<u64> {
    if depth == 0 || state.is_terminal() { return Ok(1); }
    let root_moves = movegen::available_moves(state);
    let counts = root_moves
        .par_iter()
        .map(|mv| perft(&state.apply_move(mv)?, depth - 1))
        .collect::<EngineResult<Vec<u64>>>()?;
    Ok(counts.into_iter().sum())
}
