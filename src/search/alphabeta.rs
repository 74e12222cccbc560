use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{movegen, BoardState, Move, Side};
use crate::error::{EngineError, EngineResult};
use crate::search::eval::{EvalWeights, Evaluator, Heuristic, LOSS_SCORE, WIN_SCORE};
use crate::search::noise::{NoiseSource, SeededNoise};
use crate::search::ordering::order_moves;

/// Piece count at or below which either side triggers one extra ply.
pub const ENDGAME_PIECES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Full-width minimax, every node up to the depth limit.
    Minimax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    pub order_moves: bool,
    pub adaptive_depth: bool,
    pub threads: usize,
    pub seed: Option<u64>,
    pub weights: EvalWeights,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 4,
            algorithm: Algorithm::AlphaBeta,
            heuristic: Heuristic::Offensive2,
            order_moves: true,
            adaptive_depth: true,
            threads: 1,
            seed: None,
            weights: EvalWeights::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub chosen: Move,
    /// Position after `chosen`.
    pub state: BoardState,
    pub score: f64,
    pub nodes: u64,
    /// Pieces the opponent of the mover still has after the move.
    pub remaining: usize,
    /// The move ends the game immediately.
    pub winning: bool,
    /// Depth limit actually searched, after the endgame extension.
    pub depth: u32,
    pub elapsed: Duration,
}

/// Per-call search state: the depth limit, the evaluator and the node counter.
struct Session<'a> {
    eval: &'a Evaluator,
    limit: u32,
    prune: bool,
    order: bool,
    nodes: u64,
}

impl<'a> Session<'a> {
    fn new(eval: &'a Evaluator, limit: u32, params: &SearchParams) -> Self {
        Self { eval, limit, prune: params.algorithm == Algorithm::AlphaBeta, order: params.order_moves, nodes: 0 }
    }

    fn moves(&self, state: &BoardState) -> Vec<Move> {
        let mut moves = movegen::available_moves(state);
        if self.order { order_moves(&mut moves, state); }
        moves
    }

    /// Minimax with optional alpha-beta cutoffs; `maximizing` is true on the
    /// perspective player's plies.
    fn search(&mut self, state: &BoardState, depth: u32, mut alpha: f64, mut beta: f64, maximizing: bool) -> EngineResult<f64> {
        if depth >= self.limit || state.is_terminal() {
            return Ok(self.eval.evaluate(state));
        }
        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        for mv in self.moves(state) {
            self.nodes += 1;
            let child = state.apply_move(&mv)?;
            let score = self.search(&child, depth + 1, alpha, beta, !maximizing)?;
            if maximizing {
                best = best.max(score);
                if self.prune && best >= beta { break; }
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                if self.prune && best <= alpha { break; }
                beta = beta.min(best);
            }
        }
        Ok(best)
    }
}

struct RootChoice {
    mv: Move,
    child: BoardState,
    score: f64,
    winning: bool,
}

pub struct Searcher {
    params: SearchParams,
    noise: Arc<dyn NoiseSource>,
    nodes: u64,
    elapsed: Duration,
}

impl Searcher {
    pub fn new(params: SearchParams) -> EngineResult<Self> {
        let noise = match params.seed {
            Some(seed) => SeededNoise::new(seed),
            None => SeededNoise::from_entropy(),
        };
        Self::with_noise(params, Arc::new(noise))
    }

    pub fn with_noise(params: SearchParams, noise: Arc<dyn NoiseSource>) -> EngineResult<Self> {
        if params.depth == 0 { return Err(EngineError::InvalidDepth(params.depth)); }
        if params.threads == 0 { return Err(EngineError::InvalidThreads(params.threads)); }
        if !params.weights.is_finite() { return Err(EngineError::InvalidWeights); }
        Ok(Self { params, noise, nodes: 0, elapsed: Duration::ZERO })
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    /// Nodes visited by the last decision.
    pub fn nodes(&self) -> u64 { self.nodes }

    /// Wall time of the last decision.
    pub fn elapsed(&self) -> Duration { self.elapsed }

    pub fn get_threads(&self) -> usize { self.params.threads }

    pub fn effective_depth(&self, root: &BoardState) -> u32 {
        let endgame = Side::BOTH.iter().any(|&s| root.piece_count(s) <= ENDGAME_PIECES);
        if self.params.adaptive_depth && endgame { self.params.depth + 1 } else { self.params.depth }
    }

    /// Picks a move for the side to move of `root`, searched with this
    /// searcher's heuristic regardless of the one stamped on `root`.
    pub fn decide(&mut self, root: &BoardState) -> EngineResult<Decision> {
        let t0 = Instant::now();
        self.nodes = 0;
        let result = self.decide_inner(root);
        self.elapsed = t0.elapsed();
        let mut decision = result?;
        decision.elapsed = self.elapsed;
        debug!(
            "{:?} {:?} depth {} chose {} score {} nodes {} in {:.3}s",
            self.params.algorithm,
            decision.state.side_to_move().opponent(),
            decision.depth,
            decision.chosen,
            decision.score,
            decision.nodes,
            decision.elapsed.as_secs_f64()
        );
        Ok(decision)
    }

    fn decide_inner(&mut self, root: &BoardState) -> EngineResult<Decision> {
        if let Some(winner) = root.status().winner() {
            return Err(EngineError::GameOver { winner });
        }
        let root = root.clone().with_heuristic(self.params.heuristic);
        let mover = root.side_to_move();
        let limit = self.effective_depth(&root);
        let eval = Evaluator::new(mover, self.params.weights, self.noise.clone());

        let mut moves = movegen::available_moves(&root);
        if moves.is_empty() { return Err(EngineError::NoLegalMove { side: mover }); }
        if self.params.order_moves { order_moves(&mut moves, &root); }

        let choice = if self.params.threads > 1 && limit > 1 {
            self.root_parallel(&root, moves, &eval, limit)?
        } else {
            self.root_sequential(&root, moves, &eval, limit)?
        };
        Ok(Decision {
            chosen: choice.mv,
            remaining: choice.child.piece_count(mover.opponent()),
            state: choice.child,
            score: choice.score,
            nodes: self.nodes,
            winning: choice.winning,
            depth: limit,
            elapsed: Duration::ZERO,
        })
    }

    fn root_sequential(&mut self, root: &BoardState, moves: Vec<Move>, eval: &Evaluator, limit: u32) -> EngineResult<RootChoice> {
        let mut session = Session::new(eval, limit, &self.params);
        let mut best: Option<RootChoice> = None;
        let mut alpha = LOSS_SCORE;
        for mv in moves {
            session.nodes += 1;
            let child = root.apply_move(&mv)?;
            if child.is_terminal() {
                trace!("root {mv}: ends the game");
                self.nodes = session.nodes;
                return Ok(RootChoice { mv, score: eval.evaluate(&child), child, winning: true });
            }
            let score = session.search(&child, 1, alpha, WIN_SCORE, false)?;
            trace!("root {mv}: {score}");
            // Strictly better only; the first move is taken so that a lost
            // position still yields a move.
            if best.as_ref().map_or(true, |b| score > b.score) {
                alpha = alpha.max(score);
                best = Some(RootChoice { mv, child, score, winning: false });
            }
        }
        self.nodes = session.nodes;
        best.ok_or(EngineError::NoLegalMove { side: root.side_to_move() })
    }

    // Root split: each child gets a full window, so the scores are exact and
    // the in-order reduction picks the same move as the sequential loop.
    fn root_parallel(&mut self, root: &BoardState, moves: Vec<Move>, eval: &Evaluator, limit: u32) -> EngineResult<RootChoice> {
        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            self.nodes += 1;
            let child = root.apply_move(&mv)?;
            if child.is_terminal() {
                trace!("root {mv}: ends the game");
                return Ok(RootChoice { mv, score: eval.evaluate(&child), child, winning: true });
            }
            children.push((mv, child));
        }

        let params = self.params;
        let pool = rayon::ThreadPoolBuilder::new().num_threads(params.threads).build()?;
        let results: Vec<(f64, u64)> = pool.install(|| {
            children
                .par_iter()
                .map(|(_, child)| {
                    let mut w = Session::new(eval, limit, &params);
                    let score = w.search(child, 1, LOSS_SCORE, WIN_SCORE, false)?;
                    Ok((score, w.nodes))
                })
                .collect::<EngineResult<Vec<_>>>()
        })?;

        let mut best: Option<RootChoice> = None;
        for ((mv, child), (score, nodes)) in children.into_iter().zip(results) {
            self.nodes += nodes;
            trace!("root {mv}: {score}");
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(RootChoice { mv, child, score, winning: false });
            }
        }
        best.ok_or(EngineError::NoLegalMove { side: root.side_to_move() })
    }
}
