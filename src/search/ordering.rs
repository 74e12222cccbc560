use std::cmp::Reverse;

use crate::board::{movegen, BoardState, Move};

pub const CAPTURE_BONUS: i32 = 10;
pub const CENTER_BONUS: i32 = 5;
/// Per row the destination lies from the mover's home edge.
pub const PROGRESS_BONUS: i32 = 1;

/// Cheap static score of a move: captures first, then center landings, then progress.
pub fn move_score(state: &BoardState, mv: &Move) -> i32 {
    let dims = state.dims();
    let Some(dest) = mv.destination(dims) else { return i32::MIN };
    let mut score = 0;
    if movegen::is_capture(state, mv) { score += CAPTURE_BONUS; }
    if dims.is_center(dest.col) { score += CENTER_BONUS; }
    score + PROGRESS_BONUS * mv.mover.advancement(dest, dims) as i32
}

/// Sorts best-first by `move_score`. The sort is stable, so equal scores keep
/// generation order.
pub fn order_moves(moves: &mut [Move], state: &BoardState) {
    moves.sort_by_cached_key(|m| Reverse(move_score(state, m)));
}
