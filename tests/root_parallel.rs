use onyxbreak::board::{BoardState, Dimensions, Side, Square};
use onyxbreak::search::{Algorithm, Heuristic, SearchParams, Searcher};

fn sq(r: u8, c: u8) -> Square { Square::new(r, c) }

#[test]
fn root_parallel_bestmove_equals_single_thread() {
    let b = BoardState::initial(Dimensions::standard(), Heuristic::Offensive1);
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let p1 = SearchParams { depth: 3, algorithm, heuristic: Heuristic::Offensive1, seed: Some(17), threads: 1, ..SearchParams::default() };
        let r1 = Searcher::new(p1).unwrap().decide(&b).unwrap();

        let p4 = SearchParams { threads: 4, ..p1 };
        let mut s4 = Searcher::new(p4).unwrap();
        assert_eq!(s4.get_threads(), 4);
        let r4 = s4.decide(&b).unwrap();

        assert_eq!(r4.score, r1.score, "{algorithm:?}: score differs between single and multi-thread");
        assert_eq!(r4.chosen, r1.chosen, "{algorithm:?}: move differs between single and multi-thread");
        if algorithm == Algorithm::Minimax {
            assert_eq!(r4.nodes, r1.nodes, "minimax visits the same tree on any thread count");
        }
    }
}

#[test]
fn root_parallel_takes_immediate_win() {
    let d = Dimensions::standard();
    let b = BoardState::from_pieces(d, &[sq(1, 1), sq(6, 6)], &[sq(4, 2), sq(5, 0)], Side::Onyx, Heuristic::Offensive2).unwrap();
    let p = SearchParams { depth: 3, threads: 4, seed: Some(1), ..SearchParams::default() };
    let r = Searcher::new(p).unwrap().decide(&b).unwrap();
    assert!(r.winning);
    assert_eq!(r.chosen.origin, sq(6, 6));
    assert_eq!(r.state.status().winner(), Some(Side::Onyx));
}

#[test]
fn zero_threads_is_rejected() {
    let p = SearchParams { threads: 0, ..SearchParams::default() };
    assert!(Searcher::new(p).is_err());
}
