use onyxbreak::arena::{play_game, play_game_with};
use onyxbreak::board::{BoardState, Dimensions, Side};
use onyxbreak::search::{Algorithm, Heuristic, SearchParams};

fn player(algorithm: Algorithm, heuristic: Heuristic, seed: u64) -> SearchParams {
    SearchParams { depth: 2, algorithm, heuristic, seed: Some(seed), ..SearchParams::default() }
}

#[test]
fn game_runs_to_a_winner() {
    let start = BoardState::initial(Dimensions::standard(), Heuristic::Offensive1);
    let report = play_game(
        player(Algorithm::Minimax, Heuristic::Offensive1, 1),
        player(Algorithm::AlphaBeta, Heuristic::Defensive2, 2),
        start,
        500,
    )
    .unwrap();
    let winner = report.winner.expect("forward-only games always finish");
    let grid = &report.final_grid;
    let won = match winner {
        Side::Onyx => grid[7].contains(&1) || !grid.iter().flatten().any(|&v| v == 2),
        Side::Crystal => grid[0].contains(&2) || !grid.iter().flatten().any(|&v| v == 1),
    };
    assert!(won, "final grid does not show a {winner:?} win: {grid:?}");

    assert_eq!(report.onyx.turns + report.crystal.turns, report.plies);
    assert!(report.onyx.turns == report.crystal.turns || report.onyx.turns == report.crystal.turns + 1);
    let crystal_left = grid.iter().flatten().filter(|&&v| v == 2).count();
    let onyx_left = grid.iter().flatten().filter(|&&v| v == 1).count();
    assert_eq!(report.onyx.captured, 16 - crystal_left);
    assert_eq!(report.crystal.captured, 16 - onyx_left);
    assert!(report.onyx.avg_nodes() > 0.0);
}

#[test]
fn ply_cap_stops_game_without_winner() {
    let start = BoardState::initial(Dimensions::wide(), Heuristic::Offensive2);
    let mut seen = Vec::new();
    let report = play_game_with(
        player(Algorithm::AlphaBeta, Heuristic::Offensive2, 3),
        player(Algorithm::AlphaBeta, Heuristic::Offensive2, 4),
        start,
        3,
        |before, d| seen.push((before.side_to_move(), d.nodes)),
    )
    .unwrap();
    assert_eq!(report.plies, 3);
    assert_eq!(report.winner, None);
    let sides: Vec<Side> = seen.iter().map(|(s, _)| *s).collect();
    assert_eq!(sides, vec![Side::Onyx, Side::Crystal, Side::Onyx]);
    assert_eq!(report.onyx.nodes, seen[0].1 + seen[2].1);
}
