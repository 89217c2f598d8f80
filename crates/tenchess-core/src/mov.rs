//! Move representation.

use crate::Square;
use std::fmt;

/// Whether a move lands on an empty square or takes an enemy piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Move onto an empty square.
    Quiet = 0,
    /// Move onto a square held by an enemy piece.
    Capture = 1,
}

/// A move from one square to another.
///
/// Encoded compactly: 7 bits from, 7 bits to, 1 bit flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 7) | ((flag as u16) << 14);
        Move(encoded)
    }

    /// Creates a quiet move.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Quiet)
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Capture)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & 0x7F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> 7) & 0x7F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        if (self.0 >> 14) & 1 == 1 {
            MoveFlag::Capture
        } else {
            MoveFlag::Quiet
        }
    }

    /// Returns true if this move takes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self.flag(), MoveFlag::Capture)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from(), sep, self.to())
    }
}
