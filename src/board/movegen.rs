use crate::board::{BoardState, Direction, Move, Side, Square};

/// Destination of `origin` stepping in `dir`, if the step is legal for `side`.
fn legal_target(state: &BoardState, origin: Square, dir: Direction, side: Side) -> Option<Square> {
    let dest = Move::new(origin, dir, side).destination(state.dims())?;
    match state.occupant(dest) {
        None => Some(dest),
        Some(s) if s == side => None,
        Some(_) if dir == Direction::Forward && !state.rules().straight_captures => None,
        Some(_) => Some(dest),
    }
}

/// Appends the legal moves of the side to move, piece by piece in generation
/// order, forward-left before forward before forward-right.
pub fn generate_into(state: &BoardState, out: &mut Vec<Move>) {
    let side = state.side_to_move();
    for &origin in state.pieces(side) {
        for dir in Direction::ALL {
            if legal_target(state, origin, dir, side).is_some() {
                out.push(Move::new(origin, dir, side));
            }
        }
    }
}

pub fn available_moves(state: &BoardState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(state.piece_count(state.side_to_move()) * 3);
    generate_into(state, &mut moves);
    moves
}

pub fn has_legal_move(state: &BoardState) -> bool {
    let side = state.side_to_move();
    state
        .pieces(side)
        .iter()
        .any(|&origin| Direction::ALL.iter().any(|&dir| legal_target(state, origin, dir, side).is_some()))
}

/// Whether `mv` lands on an opposing piece.
pub fn is_capture(state: &BoardState, mv: &Move) -> bool {
    mv.destination(state.dims())
        .and_then(|dest| state.occupant(dest))
        .map_or(false, |s| s != mv.mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Dimensions, Rules};
    use crate::search::eval::Heuristic;
    use pretty_assertions::assert_eq;

    fn sq(r: u8, c: u8) -> Square { Square::new(r, c) }

    #[test]
    fn start_position_has_22_moves() {
        let s = BoardState::initial(Dimensions::standard(), Heuristic::Offensive2);
        let moves = available_moves(&s);
        assert_eq!(moves.len(), 22);
        assert!(moves.iter().all(|m| m.origin.row == 1));
        // first piece in Onyx order is the rightmost of row 1
        assert_eq!(moves[0], Move::new(sq(1, 7), Direction::ForwardLeft, Side::Onyx));
        assert_eq!(moves[1], Move::new(sq(1, 7), Direction::Forward, Side::Onyx));
    }

    #[test]
    fn straight_capture_follows_rules() {
        let d = Dimensions::standard();
        let s = BoardState::from_pieces(d, &[sq(3, 3)], &[sq(4, 3), sq(7, 0)], Side::Onyx, Heuristic::Offensive2).unwrap();
        let dirs: Vec<Direction> = available_moves(&s).iter().map(|m| m.direction).collect();
        assert_eq!(dirs, vec![Direction::ForwardLeft, Direction::Forward, Direction::ForwardRight]);

        let classic = s.with_rules(Rules::classic());
        let dirs: Vec<Direction> = available_moves(&classic).iter().map(|m| m.direction).collect();
        assert_eq!(dirs, vec![Direction::ForwardLeft, Direction::ForwardRight]);
    }

    #[test]
    fn blocked_side_has_no_moves() {
        let d = Dimensions::standard();
        // Crystal piece on (4,0) faces two Crystal blockers and the board edge.
        let s = BoardState::from_pieces(d, &[sq(0, 7)], &[sq(4, 0), sq(3, 0), sq(3, 1)], Side::Crystal, Heuristic::Offensive2).unwrap();
        let moves = available_moves(&s);
        // the blockers themselves can still advance
        assert!(moves.iter().all(|m| m.origin != sq(4, 0)));
        assert!(has_legal_move(&s));
    }
}
