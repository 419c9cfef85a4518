use crate::engine::{Board, BOARD_SIZE, EMPTY};
use serde::Deserialize;
use std::fmt;

/// Returns the goal `(row, col)` of a non-empty tile value.
fn goal_position(value: u8) -> (usize, usize) {
    let idx = (value - 1) as usize;
    (idx / BOARD_SIZE, idx % BOARD_SIZE)
}

/// Calculates the total Manhattan distance of every tile from its goal cell.
///
/// The empty cell is not counted. The result is 0 exactly when `board` is the goal,
/// and a single tile move changes it by exactly 1, which makes it admissible and
/// consistent for unit-cost moves.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::manhattan_distance;
/// assert_eq!(manhattan_distance(&Board::goal()), 0);
/// let board = Board::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// assert_eq!(manhattan_distance(&board), 2);
/// ```
pub fn manhattan_distance(board: &Board) -> u32 {
    let mut distance = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = board.get_tile(r, c);
            if value == EMPTY {
                continue;
            }
            let (gr, gc) = goal_position(value);
            distance += (r.abs_diff(gr) + c.abs_diff(gc)) as u32;
        }
    }
    distance
}

/// Counts the tiles (not the empty cell) that are not on their goal cell.
///
/// Never larger than `manhattan_distance`, so also admissible, but a weaker guide.
pub fn misplaced_tiles(board: &Board) -> u32 {
    let mut count = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = board.get_tile(r, c);
            if value != EMPTY && goal_position(value) != (r, c) {
                count += 1;
            }
        }
    }
    count
}

/// Distance estimate used to order the search frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Sum of per-tile Manhattan distances.
    #[default]
    Manhattan,
    /// Number of out-of-place tiles.
    MisplacedTiles,
}

impl Heuristic {
    /// Every available heuristic, in declaration order.
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::MisplacedTiles];

    /// Estimates the number of moves remaining from `board` to the goal.
    pub fn estimate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(board),
            Heuristic::MisplacedTiles => misplaced_tiles(board),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::MisplacedTiles => "misplaced_tiles",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown heuristic '{}', expected one of: manhattan, misplaced_tiles",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(grid: [[u8; 3]; 3]) -> Board {
        Board::new(grid).unwrap()
    }

    #[test]
    fn test_manhattan_goal_is_zero() {
        assert_eq!(manhattan_distance(&Board::goal()), 0);
    }

    #[test]
    fn test_manhattan_known_values() {
        assert_eq!(manhattan_distance(&board([[1, 2, 3], [4, 5, 6], [7, 0, 8]])), 1);
        assert_eq!(manhattan_distance(&board([[1, 2, 3], [4, 0, 6], [7, 5, 8]])), 2);
        // 8 and 1 have swapped places, each three steps from home.
        assert_eq!(manhattan_distance(&board([[8, 2, 3], [4, 5, 6], [7, 1, 0]])), 6);
    }

    #[test]
    fn test_manhattan_changes_by_one_per_move() {
        let mut frontier = vec![board([[8, 6, 7], [2, 5, 4], [3, 0, 1]])];
        for _ in 0..4 {
            let mut next = Vec::new();
            for b in &frontier {
                let h = manhattan_distance(b);
                for n in b.generate_neighbors(None) {
                    assert_eq!(h.abs_diff(manhattan_distance(&n)), 1);
                    next.push(n);
                }
            }
            frontier = next;
        }
    }

    #[test]
    fn test_manhattan_zero_only_for_goal() {
        for seed in 0..50 {
            let b = Board::random_solvable(seed);
            assert_eq!(manhattan_distance(&b) == 0, b.is_goal());
        }
    }

    #[test]
    fn test_misplaced_tiles() {
        assert_eq!(misplaced_tiles(&Board::goal()), 0);
        assert_eq!(misplaced_tiles(&board([[1, 2, 3], [4, 0, 6], [7, 5, 8]])), 2);
        for seed in 0..50 {
            let b = Board::random_solvable(seed);
            assert!(misplaced_tiles(&b) <= manhattan_distance(&b));
        }
    }

    #[test]
    fn test_heuristic_enum_dispatch() {
        let b = board([[8, 2, 3], [4, 5, 6], [7, 1, 0]]);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
        assert_eq!(Heuristic::Manhattan.estimate(&b), 6);
        assert_eq!(Heuristic::MisplacedTiles.estimate(&b), 2);
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!("manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!(
            "misplaced_tiles".parse::<Heuristic>(),
            Ok(Heuristic::MisplacedTiles)
        );
        assert!("euclid".parse::<Heuristic>().is_err());
    }
}
