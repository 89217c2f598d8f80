//! Board layout text: parsing and rendering.
//!
//! A layout lists the ten rows from row 0 (Black's back row) to row 9
//! (White's back row). Rows are separated by newlines or `/`. Inside a row,
//! each piece is its letter (uppercase White, lowercase Black), `.` is an
//! empty square and a digit `1`-`9` stands for that many empty squares.
//!
//! ```text
//! rnebqkbenr
//! pppppppppp
//! ..........
//! ```

use crate::{Piece, Square, BOARD_SIZE};
use thiserror::Error;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: expected 10 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("invalid layout: row {row} has {len} squares, expected 10")]
    InvalidRowLength { row: usize, len: usize },

    #[error("invalid layout: unknown piece letter '{letter}' in row {row}")]
    InvalidPiece { row: usize, letter: char },
}

/// Parsed layout data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutParser {
    /// Occupied squares in row-major order.
    pub placements: Vec<(Square, Piece)>,
}

impl LayoutParser {
    /// The fixed starting position.
    pub const STARTPOS: &'static str = "rnebqkbenr/pppppppppp/........../........../........../........../........../........../PPPPPPPPPP/RNEBQKBENR";

    /// Parses a layout.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .split(['\n', '/'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(LayoutError::InvalidRowCount(rows.len()));
        }

        let mut placements = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in line.chars() {
                if c == '.' {
                    col += 1;
                } else if let Some(run) = c.to_digit(10).filter(|&d| d > 0) {
                    col += run as usize;
                } else if let Some(piece) = Piece::from_char(c) {
                    if let Some(sq) = Square::new(row as u8, col as u8) {
                        placements.push((sq, piece));
                    }
                    col += 1;
                } else {
                    return Err(LayoutError::InvalidPiece { row, letter: c });
                }
            }
            if col != BOARD_SIZE as usize {
                return Err(LayoutError::InvalidRowLength { row, len: col });
            }
        }

        Ok(LayoutParser { placements })
    }

    /// Renders a layout, one row per line, using `.` for empty squares.
    pub fn render<F>(piece_at: F) -> String
    where
        F: Fn(Square) -> Option<Piece>,
    {
        let mut out = String::with_capacity(Square::COUNT + BOARD_SIZE as usize);
        for sq in Square::all() {
            out.push(piece_at(sq).map_or('.', Piece::to_char));
            if sq.col() == BOARD_SIZE - 1 {
                out.push('\n');
            }
        }
        out
    }
}
