use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::board::{BoardState, Side, Square};
use crate::error::EngineError;
use crate::search::noise::NoiseSource;

pub const WIN_SCORE: f64 = f64::INFINITY;
pub const LOSS_SCORE: f64 = f64::NEG_INFINITY;

/// Material/advancement utility policies, keyed by their small integer ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// `2 * (30 - opponent) + noise`
    Offensive1 = 1,
    /// `2 * mine + noise`
    Defensive1 = 2,
    /// `mine - 2 * opponent`
    Offensive2 = 3,
    /// `2 * mine - 2 * opponent`
    Defensive2 = 4,
}

impl TryFrom<u8> for Heuristic {
    type Error = EngineError;
    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Heuristic::Offensive1),
            2 => Ok(Heuristic::Defensive1),
            3 => Ok(Heuristic::Offensive2),
            4 => Ok(Heuristic::Defensive2),
            other => Err(EngineError::UnknownHeuristic(other)),
        }
    }
}

impl Heuristic {
    pub fn id(self) -> u8 { self as u8 }

    /// Whether this policy mixes in tie-break noise.
    pub fn is_noisy(self) -> bool { matches!(self, Heuristic::Offensive1 | Heuristic::Defensive1) }

    pub fn utility(self, state: &BoardState, perspective: Side, noise: f64) -> f64 {
        let mine = side_score(state, perspective);
        let theirs = side_score(state, perspective.opponent());
        match self {
            Heuristic::Offensive1 => 2.0 * (30.0 - theirs) + noise,
            Heuristic::Defensive1 => 2.0 * mine + noise,
            Heuristic::Offensive2 => mine - 2.0 * theirs,
            Heuristic::Defensive2 => 2.0 * mine - 2.0 * theirs,
        }
    }
}

/// Piece count plus the rows every piece has travelled.
pub fn side_score(state: &BoardState, side: Side) -> f64 {
    state.piece_count(side) as f64 + advancement(state, side)
}

fn advancement(state: &BoardState, side: Side) -> f64 {
    let dims = state.dims();
    state.pieces(side).iter().map(|&sq| side.advancement(sq, dims) as f64).sum()
}

fn center_count(state: &BoardState, side: Side) -> f64 {
    let dims = state.dims();
    state.pieces(side).iter().filter(|sq| dims.is_center(sq.col)).count() as f64
}

/// Ordered pairs of distinct pieces within two squares of each other.
fn coordinated_pairs(pieces: &[Square]) -> f64 {
    let mut pairs = 0usize;
    for (i, &a) in pieces.iter().enumerate() {
        pairs += pieces[i + 1..].iter().filter(|&&b| a.distance(b) <= 2).count();
    }
    (2 * pairs) as f64
}

/// Positional terms added on top of the heuristic utility, each scored as
/// friendly minus enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per piece standing in the middle half of the columns.
    pub center: f64,
    /// Per ordered pair of pieces within Chebyshev distance 2.
    pub coordination: f64,
    /// Per row travelled.
    pub advancement: f64,
}

impl Default for EvalWeights {
    fn default() -> Self { Self { center: 1.0, coordination: 0.5, advancement: 0.0 } }
}

impl EvalWeights {
    /// Center and advancement terms only, on a coarser scale.
    pub fn classic() -> Self { Self { center: 10.0, coordination: 0.0, advancement: 5.0 } }

    /// Heuristic utility alone.
    pub fn none() -> Self { Self { center: 0.0, coordination: 0.0, advancement: 0.0 } }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.coordination.is_finite() && self.advancement.is_finite()
    }
}

/// Scores positions from one fixed player's point of view.
#[derive(Clone)]
pub struct Evaluator {
    perspective: Side,
    weights: EvalWeights,
    noise: Arc<dyn NoiseSource>,
}

impl Evaluator {
    pub fn new(perspective: Side, weights: EvalWeights, noise: Arc<dyn NoiseSource>) -> Self {
        Self { perspective, weights, noise }
    }

    pub fn perspective(&self) -> Side { self.perspective }

    pub fn evaluate(&self, state: &BoardState) -> f64 {
        if let Some(winner) = state.status().winner() {
            return if winner == self.perspective { WIN_SCORE } else { LOSS_SCORE };
        }
        let heuristic = state.heuristic();
        let noise = if heuristic.is_noisy() { self.noise.sample(state) } else { 0.0 };
        heuristic.utility(state, self.perspective, noise) + self.positional(state)
    }

    fn positional(&self, state: &BoardState) -> f64 {
        let me = self.perspective;
        let them = me.opponent();
        let w = &self.weights;
        let mut score = 0.0;
        if w.center != 0.0 {
            score += w.center * (center_count(state, me) - center_count(state, them));
        }
        if w.coordination != 0.0 {
            score += w.coordination * (coordinated_pairs(state.pieces(me)) - coordinated_pairs(state.pieces(them)));
        }
        if w.advancement != 0.0 {
            score += w.advancement * (advancement(state, me) - advancement(state, them));
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Dimensions;
    use crate::search::noise::Silent;

    fn sq(r: u8, c: u8) -> Square { Square::new(r, c) }

    fn silent(perspective: Side, weights: EvalWeights) -> Evaluator { Evaluator::new(perspective, weights, Arc::new(Silent)) }

    #[test]
    fn heuristic_ids_round_trip() {
        for id in 1..=4u8 {
            assert_eq!(Heuristic::try_from(id).unwrap().id(), id);
        }
        assert!(matches!(Heuristic::try_from(0), Err(EngineError::UnknownHeuristic(0))));
        assert!(matches!(Heuristic::try_from(5), Err(EngineError::UnknownHeuristic(5))));
    }

    #[test]
    fn side_score_counts_pieces_and_rows() {
        let d = Dimensions::standard();
        let s = BoardState::from_pieces(d, &[sq(2, 0), sq(3, 1)], &[sq(6, 0)], Side::Onyx, Heuristic::Offensive2).unwrap();
        assert_eq!(side_score(&s, Side::Onyx), 2.0 + 5.0);
        assert_eq!(side_score(&s, Side::Crystal), 1.0 + 1.0);
    }

    #[test]
    fn utilities_match_formulas() {
        let d = Dimensions::standard();
        let s = BoardState::from_pieces(d, &[sq(2, 0), sq(3, 1)], &[sq(6, 0)], Side::Onyx, Heuristic::Offensive2).unwrap();
        // mine = 7, theirs = 2
        assert_eq!(Heuristic::Offensive1.utility(&s, Side::Onyx, 0.0), 56.0);
        assert_eq!(Heuristic::Defensive1.utility(&s, Side::Onyx, 0.0625), 14.0625);
        assert_eq!(Heuristic::Offensive2.utility(&s, Side::Onyx, 0.0), 3.0);
        assert_eq!(Heuristic::Defensive2.utility(&s, Side::Onyx, 0.0), 10.0);
        assert_eq!(Heuristic::Offensive2.utility(&s, Side::Crystal, 0.0), -12.0);
    }

    #[test]
    fn terminal_positions_score_infinite() {
        let d = Dimensions::standard();
        let s = BoardState::from_pieces(d, &[sq(7, 3)], &[sq(5, 5)], Side::Crystal, Heuristic::Offensive2).unwrap();
        assert_eq!(silent(Side::Onyx, EvalWeights::default()).evaluate(&s), WIN_SCORE);
        assert_eq!(silent(Side::Crystal, EvalWeights::default()).evaluate(&s), LOSS_SCORE);
    }

    #[test]
    fn positional_terms_are_symmetric() {
        let d = Dimensions::standard();
        // Onyx: two adjacent center pieces. Crystal: one edge piece.
        let s = BoardState::from_pieces(d, &[sq(2, 3), sq(2, 4)], &[sq(5, 0)], Side::Onyx, Heuristic::Offensive2).unwrap();
        let onyx = silent(Side::Onyx, EvalWeights::default());
        let crystal = silent(Side::Crystal, EvalWeights::default());
        let base_o = Heuristic::Offensive2.utility(&s, Side::Onyx, 0.0);
        let base_c = Heuristic::Offensive2.utility(&s, Side::Crystal, 0.0);
        // center: 2 - 0, coordination: 0.5 * 2 ordered pairs
        assert_eq!(onyx.evaluate(&s) - base_o, 2.0 + 1.0);
        assert_eq!(crystal.evaluate(&s) - base_c, -3.0);
    }

    #[test]
    fn classic_weights_reward_advancement() {
        let d = Dimensions::standard();
        let s = BoardState::from_pieces(d, &[sq(4, 0)], &[sq(6, 7)], Side::Onyx, Heuristic::Offensive2).unwrap();
        let e = silent(Side::Onyx, EvalWeights::classic());
        // advancement 4 vs 1, no center pieces
        assert_eq!(e.evaluate(&s) - Heuristic::Offensive2.utility(&s, Side::Onyx, 0.0), 5.0 * 3.0);
    }
}
