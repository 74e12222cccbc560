use crate::board::{BoardState, Side, Square, MAX_SIDE};
use std::sync::OnceLock;

const SQUARES: usize = MAX_SIDE * MAX_SIDE;

pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; 2 * SQUARES]> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64; 2 * SQUARES] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; 2 * SQUARES];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn init_side() -> u64 {
    *SIDE_KEY.get_or_init(|| splitmix64(0xABCDEF1234567890))
}

// Indexed on the largest board so keys do not depend on the variant.
fn square_index(sq: Square) -> usize { sq.row as usize * MAX_SIDE + sq.col as usize }

/// Hashes both sides' pieces on the 16x16 index space plus the side to move;
/// board size and rules do not enter the key.
pub fn compute(state: &BoardState) -> u64 {
    let table = init_table();
    let mut key = 0u64;
    for side in Side::BOTH {
        for &sq in state.pieces(side) {
            key ^= table[side.index() * SQUARES + square_index(sq)];
        }
    }
    if state.side_to_move() == Side::Crystal { key ^= init_side(); }
    key
}
