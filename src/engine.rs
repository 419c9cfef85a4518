//! Board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Coord`: A `(row, col)` position on the grid.
//! - `Board`: A validated 3x3 arrangement of the tiles `1..=8` plus the empty cell,
//!   with successor generation, solvability testing and seeded random generation.
//! - `InvalidGridError`: Why a caller-supplied grid was rejected.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use thiserror::Error;

/// Defines the size of the board (width and height).
/// The board is always square, so `BOARD_SIZE` of 3 means a 3x3 grid holding 8 tiles.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, including the empty one.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The value used to mark the empty cell.
pub const EMPTY: u8 = 0;

/// Raw row-major grid contents as supplied by callers.
pub type Grid = [[u8; BOARD_SIZE]; BOARD_SIZE];

const GOAL_GRID: Grid = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

/// A cell position on the board, 0-based from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Reasons a grid cannot be turned into a `Board`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGridError {
    /// A cell holds a value outside `0..=8`.
    #[error("value {value} is out of range; all nine values in grid must be integers in the range [0,8]")]
    OutOfRange { value: u8 },
    /// A value appears more than once.
    #[error("value {value} appears more than once; each of 0..=8 must appear exactly once")]
    Duplicate { value: u8 },
    /// The supplied empty-cell hint does not point at the `0` tile.
    #[error("empty-cell hint ({row}, {col}) does not hold the empty tile")]
    BadEmptyHint { row: usize, col: usize },
}

/// A snapshot of tile positions on the 3x3 grid.
///
/// A `Board` always holds each value `0..=8` exactly once, with `0` standing for the
/// empty cell. The empty cell's coordinate is cached so that successor generation does
/// not need to rescan the grid. Boards are plain values: moving a tile produces a new
/// `Board` and leaves the source untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid,
    empty: Coord,
}

impl Board {
    /// Creates a board from a grid, locating the empty cell by scanning.
    ///
    /// # Errors
    /// Returns an `InvalidGridError` unless the grid holds every value `0..=8` exactly once.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Coord};
    /// let board = Board::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
    /// assert_eq!(board.empty(), Coord::new(1, 1));
    /// assert!(Board::new([[1, 1, 3], [4, 0, 6], [7, 5, 8]]).is_err());
    /// ```
    pub fn new(grid: Grid) -> Result<Self, InvalidGridError> {
        let empty = validate_grid(&grid)?;
        Ok(Board { grid, empty })
    }

    /// Creates a board from a grid whose empty cell is already known.
    ///
    /// The grid is still validated, and the hint must point at the `0` tile.
    pub fn with_empty_hint(grid: Grid, hint: Coord) -> Result<Self, InvalidGridError> {
        let empty = validate_grid(&grid)?;
        if empty != hint {
            return Err(InvalidGridError::BadEmptyHint {
                row: hint.row,
                col: hint.col,
            });
        }
        Ok(Board { grid, empty })
    }

    /// Returns the goal configuration: tiles ascending row-major, empty cell last.
    pub fn goal() -> Self {
        Board {
            grid: GOAL_GRID,
            empty: Coord::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
        }
    }

    /// Creates a random solvable board from the given seed.
    ///
    /// The same seed always produces the same board. Shuffles that land on an
    /// unsolvable permutation are discarded and reshuffled.
    pub fn random_solvable(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut values: Vec<u8> = (0..CELL_COUNT as u8).collect();

        loop {
            values.shuffle(&mut rng);

            let mut grid = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
            let mut empty = Coord::new(0, 0);
            for (idx, &value) in values.iter().enumerate() {
                let (r, c) = (idx / BOARD_SIZE, idx % BOARD_SIZE);
                grid[r][c] = value;
                if value == EMPTY {
                    empty = Coord::new(r, c);
                }
            }

            let board = Board { grid, empty };
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Returns the value at the specified row (`r`) and column (`c`).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    /// Returns the coordinate of the empty cell.
    pub fn empty(&self) -> Coord {
        self.empty
    }

    /// Returns a copy of the raw grid contents.
    pub fn to_grid(&self) -> Grid {
        self.grid
    }

    /// Returns `true` if this board is the goal configuration.
    pub fn is_goal(&self) -> bool {
        self.grid == GOAL_GRID
    }

    /// Coordinates orthogonally adjacent to the empty cell, in the order
    /// up, left, down, right.
    pub fn empty_neighbors(&self) -> Vec<Coord> {
        let Coord { row, col } = self.empty;
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(Coord::new(row - 1, col));
        }
        if col > 0 {
            out.push(Coord::new(row, col - 1));
        }
        if row < BOARD_SIZE - 1 {
            out.push(Coord::new(row + 1, col));
        }
        if col < BOARD_SIZE - 1 {
            out.push(Coord::new(row, col + 1));
        }
        out
    }

    /// Generates every board reachable by sliding one tile into the empty cell.
    ///
    /// If `excluded` names one of the candidate cells, that candidate is skipped.
    /// The search passes its parent's empty coordinate here so that the move which
    /// produced this board is never immediately undone.
    ///
    /// A corner empty cell yields 2 boards, an edge 3 and the center 4, minus one
    /// if the excluded cell is among them. Each returned board is independent.
    pub fn generate_neighbors(&self, excluded: Option<Coord>) -> Vec<Board> {
        self.empty_neighbors()
            .into_iter()
            .filter(|&target| Some(target) != excluded)
            .map(|target| self.slide_from(target))
            .collect()
    }

    /// Moves the tile at `target` into the empty cell, returning the new board.
    fn slide_from(&self, target: Coord) -> Board {
        let mut next = self.clone();
        next.grid[self.empty.row][self.empty.col] = self.grid[target.row][target.col];
        next.grid[target.row][target.col] = EMPTY;
        next.empty = target;
        next
    }

    /// Number of tile pairs (ignoring the empty cell) that appear in the wrong
    /// relative order when the grid is read row-major.
    pub fn inversion_count(&self) -> usize {
        let flattened: Vec<u8> = self
            .grid
            .iter()
            .flat_map(|row| row.iter().copied())
            .filter(|&v| v != EMPTY)
            .collect();

        flattened
            .iter()
            .enumerate()
            .map(|(i, &val)| flattened[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    /// Returns `true` if the goal is reachable from this board.
    ///
    /// On an odd-width board every move preserves inversion parity, and the goal has
    /// zero inversions, so exactly the even-parity permutations are solvable.
    pub fn is_solvable(&self) -> bool {
        self.inversion_count() % 2 == 0
    }
}

/// Checks that the grid is a permutation of `0..=8` and returns the empty cell.
fn validate_grid(grid: &Grid) -> Result<Coord, InvalidGridError> {
    let mut seen = [false; CELL_COUNT];
    let mut empty = None;

    for (r, row) in grid.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(InvalidGridError::OutOfRange { value })?;
            if *slot {
                return Err(InvalidGridError::Duplicate { value });
            }
            *slot = true;
            if value == EMPTY {
                empty = Some(Coord::new(r, c));
            }
        }
    }

    // Nine distinct in-range values over nine cells always include the 0.
    empty.ok_or(InvalidGridError::OutOfRange { value: EMPTY })
}

impl Default for Board {
    fn default() -> Self {
        Board::goal()
    }
}

impl fmt::Display for Board {
    /// Formats the board as three lines of space-separated values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
