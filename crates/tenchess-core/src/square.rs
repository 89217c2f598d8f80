//! Board square representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 10;

/// Errors that can occur when parsing a square from `"row,col"` text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("invalid square '{0}': expected \"row,col\"")]
    Malformed(String),

    #[error("square {row},{col} is off the board (rows and columns run 0-9)")]
    OutOfRange { row: i64, col: i64 },
}

/// A square on the 10x10 board, indexed 0-99.
///
/// Squares are indexed row-major from the top-left:
/// - (0,0) = 0, (0,1) = 1, ..., (0,9) = 9
/// - (1,0) = 10, ..., (9,9) = 99
///
/// Row 0 is Black's back row and row 9 is White's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

    /// Creates a square from row and column, or `None` if either is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square(row * BOARD_SIZE + col))
        } else {
            None
        }
    }

    /// Creates a square from index (0-99).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the index (0-99).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0-9).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Returns the column (0-9).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Returns the square reached by stepping `dr` rows and `dc` columns,
    /// or `None` when that step leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    /// Iterates over all squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareParseError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or(SquareParseError::OutOfRange {
            row: row.into(),
            col: col.into(),
        })
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> Self {
        (sq.row(), sq.col())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SquareParseError::Malformed(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(malformed)?;
        let row: i64 = row.trim().parse().map_err(|_| malformed())?;
        let col: i64 = col.trim().parse().map_err(|_| malformed())?;
        let in_range = |v: i64| (0..i64::from(BOARD_SIZE)).contains(&v);
        if !in_range(row) || !in_range(col) {
            return Err(SquareParseError::OutOfRange { row, col });
        }
        Ok(Square(row as u8 * BOARD_SIZE + col as u8))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({},{})", self.row(), self.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.col())
    }
}
