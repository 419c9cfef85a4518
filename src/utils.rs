use crate::engine::{Board, Grid, InvalidGridError, BOARD_SIZE};
use std::fmt::Write;
use thiserror::Error;

/// Errors from turning text into a `Board`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid number of rows. Expected {expected}, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Row {row} has {found} values (expected {expected})")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unrecognized value '{token}' in row {row} col {col}")]
    BadToken {
        token: String,
        row: usize,
        col: usize,
    },
    #[error(transparent)]
    InvalidGrid(#[from] InvalidGridError),
}

/// Parses rows of whitespace-separated integers into a `Board`.
///
/// Each string slice is one row, starting from row 0. Exactly `BOARD_SIZE` rows of
/// `BOARD_SIZE` values are required, and the values must form a valid board.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 0 6", "7 5 8"]).unwrap();
/// assert_eq!(board.get_tile(1, 1), 0);
///
/// assert!(board_from_str_array(&["1 2 3", "4 x 6", "7 5 8"]).is_err());
/// assert!(board_from_str_array(&["1 2 3", "4 5 6"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, ParseError> {
    if rows.len() != BOARD_SIZE {
        return Err(ParseError::RowCount {
            expected: BOARD_SIZE,
            found: rows.len(),
        });
    }

    let mut grid: Grid = [[0; BOARD_SIZE]; BOARD_SIZE];
    for (r, row_str) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row_str.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE {
            return Err(ParseError::ColumnCount {
                row: r,
                expected: BOARD_SIZE,
                found: tokens.len(),
            });
        }
        for (c, token) in tokens.iter().enumerate() {
            grid[r][c] = token.parse::<u8>().map_err(|_| ParseError::BadToken {
                token: token.to_string(),
                row: r,
                col: c,
            })?;
        }
    }

    Ok(Board::new(grid)?)
}

/// Parses a multi-line grid, one row per line. Blank lines are ignored.
pub fn parse_grid(text: &str) -> Result<Board, ParseError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&rows)
}

/// Parses a single-line grid whose rows are separated by `,` or `/`,
/// e.g. `"1 2 3,4 5 6,7 8 0"`.
pub fn parse_inline_grid(text: &str) -> Result<Board, ParseError> {
    let rows: Vec<&str> = text
        .split(|ch: char| ch == ',' || ch == '/')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();
    board_from_str_array(&rows)
}

/// Renders a solution path, labeling each board with its move index.
pub fn format_path(path: &[Board]) -> String {
    let mut out = String::new();
    for (i, board) in path.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "move: {}\n{}\n", i, board);
    }
    out
}
