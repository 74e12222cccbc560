//! Plays whole games between two configured searchers and keeps the per-player
//! statistics a front end reports after every turn.

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Side};
use crate::error::EngineResult;
use crate::interface::Grid;
use crate::search::{Decision, SearchParams, Searcher};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub turns: u32,
    pub nodes: u64,
    pub seconds: f64,
    /// Opponent pieces taken since the start position.
    pub captured: usize,
}

impl PlayerStats {
    pub fn avg_nodes(&self) -> f64 {
        if self.turns == 0 { 0.0 } else { self.nodes as f64 / self.turns as f64 }
    }

    pub fn avg_seconds(&self) -> f64 {
        if self.turns == 0 { 0.0 } else { self.seconds / self.turns as f64 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    /// `None` only when the ply cap ended the game.
    pub winner: Option<Side>,
    pub plies: u32,
    pub onyx: PlayerStats,
    pub crystal: PlayerStats,
    pub final_grid: Grid,
}

impl GameReport {
    pub fn stats(&self, side: Side) -> &PlayerStats {
        match side {
            Side::Onyx => &self.onyx,
            Side::Crystal => &self.crystal,
        }
    }
}

pub fn play_game(onyx: SearchParams, crystal: SearchParams, start: BoardState, max_plies: u32) -> EngineResult<GameReport> {
    play_game_with(onyx, crystal, start, max_plies, |_, _| {})
}

/// Like `play_game`, calling `observe(position_before, decision)` after each move.
pub fn play_game_with<F>(
    onyx: SearchParams,
    crystal: SearchParams,
    start: BoardState,
    max_plies: u32,
    mut observe: F,
) -> EngineResult<GameReport>
where
    F: FnMut(&BoardState, &Decision),
{
    let mut searchers = [Searcher::new(onyx)?, Searcher::new(crystal)?];
    let initial = [start.piece_count(Side::Onyx), start.piece_count(Side::Crystal)];
    let mut stats = [PlayerStats::default(), PlayerStats::default()];
    let mut state = start;
    let mut plies = 0u32;

    let winner = loop {
        if let Some(w) = state.status().winner() { break Some(w); }
        if plies >= max_plies { break None; }
        let mover = state.side_to_move();
        let d = searchers[mover.index()].decide(&state)?;
        let s = &mut stats[mover.index()];
        s.turns += 1;
        s.nodes += d.nodes;
        s.seconds += d.elapsed.as_secs_f64();
        s.captured = initial[mover.opponent().index()] - d.remaining;
        info!(
            "ply {} {:?} {} nodes {} (avg {:.1}) captured {}",
            plies + 1,
            mover,
            d.chosen,
            d.nodes,
            s.avg_nodes(),
            s.captured
        );
        observe(&state, &d);
        state = d.state;
        plies += 1;
    };
    info!("game over after {plies} plies: {winner:?}");

    let [onyx_stats, crystal_stats] = stats;
    Ok(GameReport { winner, plies, onyx: onyx_stats, crystal: crystal_stats, final_grid: state.to_grid() })
}
