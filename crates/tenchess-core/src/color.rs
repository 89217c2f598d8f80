//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row delta of a forward step (-1 for White, +1 for Black).
    ///
    /// White starts on the bottom rows (8 and 9) and advances toward row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns the row pawns of this color start on.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 8,
            Color::Black => 1,
        }
    }

    /// Returns the back row of this color.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 9,
            Color::Black => 0,
        }
    }

    /// Returns the row on which pawns of this color promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
