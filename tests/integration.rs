//! End-to-end tests: text in, search, path out.

use eight_puzzle_solver::heuristics::manhattan_distance;
use eight_puzzle_solver::node::reconstruct_path;
use eight_puzzle_solver::utils::{format_path, parse_grid, parse_inline_grid};
use eight_puzzle_solver::{
    solve_best_first, Board, CancelReason, NeverCancel, SearchConfig, SearchEngine, SearchError,
    SearchOutcome, SearchState,
};

fn solved(outcome: SearchOutcome) -> eight_puzzle_solver::Solution {
    match outcome {
        SearchOutcome::Solved(solution) => solution,
        other => panic!("expected Solved, got {:?}", other.state()),
    }
}

#[test]
fn scenario_a_one_move() {
    let start = parse_grid("1 2 3\n4 5 6\n7 0 8").unwrap();
    let solution = solved(solve_best_first(&start).unwrap());
    assert_eq!(solution.path.len(), 2);
    assert_eq!(
        solution.final_board().map(Board::to_grid),
        Some([[1, 2, 3], [4, 5, 6], [7, 8, 0]])
    );
}

#[test]
fn scenario_b_two_moves() {
    let start = parse_inline_grid("1 2 3,4 0 6,7 5 8").unwrap();
    let solution = solved(solve_best_first(&start).unwrap());
    assert_eq!(solution.path.len(), 3);
    assert_eq!(solution.path[0], start);
    assert_eq!(solution.path[2], Board::goal());
}

#[test]
fn scenario_c_unsolvable_is_rejected() {
    let start = Board::new([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
    let err = solve_best_first(&start).unwrap_err();
    assert!(matches!(err, SearchError::Unsolvable { .. }));
    assert!(err.to_string().contains("unsolvable"));
}

#[test]
fn goal_board_gives_single_element_path() {
    let solution = solved(solve_best_first(&Board::goal()).unwrap());
    assert_eq!(solution.path, vec![Board::goal()]);
    assert_eq!(format_path(&solution.path), "move: 0\n1 2 3\n4 5 6\n7 8 0\n\n");
}

#[test]
fn random_boards_solve_optimally_and_consistently() {
    for seed in 100..110 {
        let start = Board::random_solvable(seed);
        let solution = solved(solve_best_first(&start).unwrap());
        assert_eq!(solution.path.len(), solution.cost as usize + 1);
        assert_eq!(solution.path[0], start);
        assert!(solution.path.last().unwrap().is_goal());
        // Manhattan distance is a lower bound on the move count.
        assert!(manhattan_distance(&start) <= solution.cost);
        for pair in solution.path.windows(2) {
            assert_eq!(
                manhattan_distance(&pair[0]).abs_diff(manhattan_distance(&pair[1])),
                1
            );
        }
    }
}

#[test]
fn config_from_toml_drives_engine() {
    let config = SearchConfig::from_toml_str(
        r#"
            check_interval = 2
            heuristic = "misplaced_tiles"
        "#,
    )
    .unwrap();
    let engine = SearchEngine::new(config);
    let start = parse_grid("4 1 3\n7 2 6\n0 5 8").unwrap();

    let mut checks = 0;
    let outcome = engine
        .solve(&start, &mut |cost: u32| {
            assert_eq!(cost % 2, 0);
            checks += 1;
            true
        })
        .unwrap();
    let solution = solved(outcome);
    assert_eq!(solution.cost, 6);
    assert!(checks > 0);
}

#[test]
fn cancellation_returns_partial_path() {
    let engine = SearchEngine::new(SearchConfig {
        check_interval: 3,
        ..Default::default()
    });
    let start = parse_grid("8 6 7\n2 5 4\n3 0 1").unwrap();
    let mut calls = 0;
    let outcome = engine
        .solve(&start, &mut |_cost: u32| {
            calls += 1;
            calls < 4
        })
        .unwrap();
    assert_eq!(outcome.state(), SearchState::Cancelled);
    match outcome {
        SearchOutcome::Cancelled { partial, reason } => {
            assert_eq!(reason, CancelReason::Requested);
            assert_eq!(partial.path[0], start);
            assert_eq!(partial.stats.checks_offered, 4);
            for pair in partial.path.windows(2) {
                assert!(pair[0].generate_neighbors(None).contains(&pair[1]));
            }
        }
        _ => unreachable!(),
    }
}

#[test]
fn tree_search_matches_graph_search_cost() {
    let start = parse_grid("1 2 3\n0 4 6\n7 5 8").unwrap();
    let graph = solved(solve_best_first(&start).unwrap());
    let tree_engine = SearchEngine::new(SearchConfig {
        closed_set: false,
        ..Default::default()
    });
    let tree = solved(tree_engine.solve(&start, &mut NeverCancel).unwrap());
    assert_eq!(graph.cost, 3);
    assert_eq!(tree.cost, graph.cost);
    assert_eq!(tree.path, graph.path);
}

#[test]
fn reconstruct_path_on_hand_built_arena() {
    use eight_puzzle_solver::node::SearchTree;

    let start = parse_grid("1 2 3\n4 5 6\n0 7 8").unwrap();
    let mut tree = SearchTree::with_root(start.clone());
    let mut index = 0;
    // Walk the empty cell right twice by always taking the move that lowers h.
    while !tree.get(index).is_goal() {
        let next = tree
            .expand(index)
            .into_iter()
            .min_by_key(manhattan_distance)
            .unwrap();
        index = tree.push_child(index, next);
    }
    let path = reconstruct_path(tree.nodes(), index);
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], start);
    assert!(path[2].is_goal());
}
