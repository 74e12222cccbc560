use onyxbreak::board::{BoardState, Dimensions, Side, Square};
use onyxbreak::search::{Algorithm, Decision, Heuristic, SearchParams, Searcher};

fn sq(r: u8, c: u8) -> Square { Square::new(r, c) }

fn run(b: &BoardState, depth: u32, algorithm: Algorithm, heuristic: Heuristic) -> Decision {
    let p = SearchParams { depth, algorithm, heuristic, seed: Some(42), ..SearchParams::default() };
    Searcher::new(p).unwrap().decide(b).unwrap()
}

fn midgame() -> BoardState {
    let d = Dimensions::standard();
    let onyx = [sq(0, 1), sq(0, 6), sq(1, 0), sq(1, 3), sq(2, 2), sq(3, 4), sq(3, 5), sq(4, 1)];
    let crystal = [sq(7, 0), sq(7, 7), sq(6, 2), sq(6, 6), sq(5, 3), sq(5, 5), sq(4, 6), sq(5, 0)];
    BoardState::from_pieces(d, &onyx, &crystal, Side::Onyx, Heuristic::Offensive2).unwrap()
}

#[test]
fn alphabeta_matches_minimax_on_startpos() {
    let b = BoardState::initial(Dimensions::standard(), Heuristic::Offensive2);
    for h in [Heuristic::Offensive1, Heuristic::Defensive1, Heuristic::Offensive2, Heuristic::Defensive2] {
        let mm = run(&b, 3, Algorithm::Minimax, h);
        let ab = run(&b, 3, Algorithm::AlphaBeta, h);
        assert_eq!(ab.score, mm.score, "{h:?}: scores differ");
        assert_eq!(ab.chosen, mm.chosen, "{h:?}: moves differ");
        assert!(ab.nodes <= mm.nodes, "{h:?}: alpha-beta {} > minimax {}", ab.nodes, mm.nodes);
    }
}

#[test]
fn alphabeta_matches_minimax_in_midgame() {
    let b = midgame();
    for depth in 1..=3 {
        let mm = run(&b, depth, Algorithm::Minimax, Heuristic::Offensive1);
        let ab = run(&b, depth, Algorithm::AlphaBeta, Heuristic::Offensive1);
        assert_eq!(ab.score, mm.score, "depth {depth}: scores differ");
        assert_eq!(ab.chosen, mm.chosen, "depth {depth}: moves differ");
        assert!(ab.nodes <= mm.nodes, "depth {depth}: alpha-beta {} > minimax {}", ab.nodes, mm.nodes);
    }
}

#[test]
fn alphabeta_prunes_at_depth_three() {
    let b = BoardState::initial(Dimensions::standard(), Heuristic::Offensive2);
    let mm = run(&b, 3, Algorithm::Minimax, Heuristic::Offensive2);
    let ab = run(&b, 3, Algorithm::AlphaBeta, Heuristic::Offensive2);
    assert_eq!(mm.nodes, 22 + 484 + 11_132);
    assert!(ab.nodes < mm.nodes, "no pruning happened: {}", ab.nodes);
}
