use crate::config::SearchConfig;
use crate::engine::Board;
use crate::frontier::Frontier;
use crate::node::SearchTree;
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that prevent a search from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The initial board has odd inversion parity, so the goal is unreachable.
    #[error("board is unsolvable: {inversions} inversions (goal requires an even count)")]
    Unsolvable { inversions: usize },
}

/// Lifecycle of one search. Every state but `Searching` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Succeeded,
    Cancelled,
    Exhausted,
}

/// Why a search stopped before reaching the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancellation check asked the engine to stop.
    Requested,
    /// `max_expansions` was reached.
    ExpansionLimit,
}

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub nodes_expanded: u64,
    /// Nodes created, including the root.
    pub nodes_generated: u64,
    /// Frontier entries discarded because their board was already expanded.
    pub duplicates_skipped: u64,
    /// Largest frontier size observed.
    pub frontier_peak: usize,
    /// Deepest path cost of any created node.
    pub max_depth: u32,
    /// Number of times the cancellation check was consulted.
    pub checks_offered: u64,
}

/// A path found by the search, complete or partial.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Boards from the initial board to the final one, inclusive.
    pub path: Vec<Board>,
    /// Number of moves along `path`.
    pub cost: u32,
    /// Counters for the search that produced this path.
    pub stats: SearchStats,
}

impl Solution {
    /// The last board on the path.
    pub fn final_board(&self) -> Option<&Board> {
        self.path.last()
    }
}

/// Result of a search that was allowed to start.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// The goal was reached; `path` ends at the goal board.
    Solved(Solution),
    /// The search stopped early. `partial` leads to the lowest-key node created,
    /// preferring the deeper node among equal keys.
    Cancelled {
        partial: Solution,
        reason: CancelReason,
    },
    /// The frontier ran dry before the goal was reached.
    Exhausted(SearchStats),
}

impl SearchOutcome {
    pub fn state(&self) -> SearchState {
        match self {
            SearchOutcome::Solved(_) => SearchState::Succeeded,
            SearchOutcome::Cancelled { .. } => SearchState::Cancelled,
            SearchOutcome::Exhausted(_) => SearchState::Exhausted,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    /// The full or partial path, if one exists.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Cancelled { partial, .. } => Some(partial),
            SearchOutcome::Exhausted(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Cancelled { partial, .. } => &partial.stats,
            SearchOutcome::Exhausted(stats) => stats,
        }
    }
}

/// Caller hook consulted at the search's cancellation checkpoints.
///
/// Implemented for any `FnMut(u32) -> bool` closure, which receives the path cost
/// of the node that triggered the check and returns `false` to stop searching.
pub trait CancellationCheck {
    fn should_continue(&mut self, cost: u32) -> bool;
}

impl<F: FnMut(u32) -> bool> CancellationCheck for F {
    fn should_continue(&mut self, cost: u32) -> bool {
        self(cost)
    }
}

/// A check that never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancellationCheck for NeverCancel {
    fn should_continue(&mut self, _cost: u32) -> bool {
        true
    }
}

/// Best-first search engine ordered by `g + h`.
#[derive(Clone, Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        config.validate();
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches from `initial` toward the goal configuration.
    ///
    /// The lowest `g + h` node is expanded first; ties go to the node that entered the
    /// frontier first. Each expansion skips the move that would undo the parent's
    /// move and, when `closed_set` is on, any board that was already expanded.
    ///
    /// Whenever a newly created node's cost is a multiple of `check_interval`,
    /// `cancel` is consulted. If it declines, the search stops and returns the path
    /// to the most promising node created so far.
    ///
    /// # Errors
    /// Returns `SearchError::Unsolvable` without searching if `check_solvability`
    /// is on and the board's parity rules out a solution.
    pub fn solve(
        &self,
        initial: &Board,
        cancel: &mut impl CancellationCheck,
    ) -> Result<SearchOutcome, SearchError> {
        let heuristic = self.config.heuristic;
        let interval = self.config.check_interval;

        if self.config.check_solvability && !initial.is_solvable() {
            let inversions = initial.inversion_count();
            tracing::warn!(inversions, "Rejecting unsolvable board");
            return Err(SearchError::Unsolvable { inversions });
        }

        let mut stats = SearchStats::default();
        let mut tree = SearchTree::with_root(initial.clone());
        let mut frontier = Frontier::new();
        let mut closed: HashSet<Board> = HashSet::new();

        let root_key = tree.priority_key(0, heuristic);
        frontier.push(0usize, root_key);
        stats.nodes_generated = 1;
        stats.frontier_peak = 1;
        // Most promising node created so far: lowest key, then deepest.
        let mut best = ((root_key, Reverse(0u32)), 0usize);
        let mut cancel_reason = CancelReason::Requested;

        tracing::info!(
            %heuristic,
            h0 = root_key,
            closed_set = self.config.closed_set,
            "Starting search"
        );

        let (state, terminal) = loop {
            let Some((current, key)) = frontier.pop() else {
                break (SearchState::Exhausted, None);
            };

            if self.config.closed_set && !closed.insert(tree.get(current).board.clone()) {
                stats.duplicates_skipped += 1;
                continue;
            }

            if tree.get(current).is_goal() {
                break (SearchState::Succeeded, Some(current));
            }

            if let Some(limit) = self.config.max_expansions {
                if stats.nodes_expanded >= limit {
                    cancel_reason = CancelReason::ExpansionLimit;
                    break (SearchState::Cancelled, None);
                }
            }

            stats.nodes_expanded += 1;
            tracing::trace!(node = current, key, g = tree.get(current).cost, "Expanding");

            let mut cancelled = false;
            for board in tree.expand(current) {
                if self.config.closed_set && closed.contains(&board) {
                    continue;
                }
                let child = tree.push_child(current, board);
                let cost = tree.get(child).cost;
                let child_key = tree.priority_key(child, heuristic);
                stats.nodes_generated += 1;
                stats.max_depth = stats.max_depth.max(cost);
                if (child_key, Reverse(cost)) < best.0 {
                    best = ((child_key, Reverse(cost)), child);
                }

                if interval > 0 && cost % interval == 0 {
                    stats.checks_offered += 1;
                    tracing::debug!(g = cost, expanded = stats.nodes_expanded, "Cancellation checkpoint");
                    if !cancel.should_continue(cost) {
                        cancelled = true;
                        break;
                    }
                }

                frontier.push(child, child_key);
            }
            stats.frontier_peak = stats.frontier_peak.max(frontier.len());

            if cancelled {
                break (SearchState::Cancelled, None);
            }
        };

        tracing::info!(
            ?state,
            expanded = stats.nodes_expanded,
            generated = stats.nodes_generated,
            depth = stats.max_depth,
            "Search finished"
        );

        let outcome = match (state, terminal) {
            (SearchState::Succeeded, Some(index)) => SearchOutcome::Solved(Solution {
                path: tree.reconstruct_path(index),
                cost: tree.get(index).cost,
                stats,
            }),
            (SearchState::Cancelled, _) => {
                let (_, index) = best;
                SearchOutcome::Cancelled {
                    partial: Solution {
                        path: tree.reconstruct_path(index),
                        cost: tree.get(index).cost,
                        stats,
                    },
                    reason: cancel_reason,
                }
            }
            _ => SearchOutcome::Exhausted(stats),
        };
        Ok(outcome)
    }
}

/// Solves `initial` with the default configuration and no cancellation.
pub fn solve_best_first(initial: &Board) -> Result<SearchOutcome, SearchError> {
    SearchEngine::default().solve(initial, &mut NeverCancel)
}
