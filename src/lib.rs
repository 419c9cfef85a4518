//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the sliding-tile 8-puzzle and an
//! informed best-first search that finds a shortest sequence of moves to the goal
//! configuration (`1 2 3 / 4 5 6 / 7 8 0`).
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Reads a board from a file, the command line or stdin, solves
//!   it and prints every board along the solution path.
//! - `heuristic_evaluator`: Solves a batch of seeded random boards under each
//!   available heuristic and reports how much search each one needed.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`, `Coord`), move generation and
//!   solvability checks.
//! - `heuristics`: Distance estimates (Manhattan distance, misplaced tiles).
//! - `node`: Arena-stored search nodes and path reconstruction.
//! - `frontier`: The cost-ordered open set.
//! - `solver`: The `SearchEngine`, its outcomes and the cancellation hook.
//! - `config`: `SearchConfig`, loadable from TOML.
//! - `utils`: Parsing boards from text and rendering solution paths.

pub mod config;
pub mod engine;
pub mod frontier;
pub mod heuristics;
pub mod node;
pub mod solver;
pub mod utils;

pub use config::SearchConfig;
pub use engine::{Board, Coord, InvalidGridError};
pub use heuristics::Heuristic;
pub use solver::{
    solve_best_first, CancelReason, CancellationCheck, NeverCancel, SearchEngine, SearchError,
    SearchOutcome, SearchState, SearchStats, Solution,
};
