//! Piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The thirteen piece kinds.
///
/// The first seven appear in the starting position. The rest only come into
/// existence through captures: amazon, cannon, thief and giraffe by capture
/// pairings, scholar and clown by the last-pawn conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
    Elephant = 6,
    Amazon = 7,
    Cannon = 8,
    Thief = 9,
    Giraffe = 10,
    Scholar = 11,
    Clown = 12,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 13] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Elephant,
        PieceKind::Amazon,
        PieceKind::Cannon,
        PieceKind::Thief,
        PieceKind::Giraffe,
        PieceKind::Scholar,
        PieceKind::Clown,
    ];

    /// Returns the index of this piece kind (0-12).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the layout letter for this kind with the given color.
    ///
    /// White pieces are uppercase, Black pieces lowercase.
    pub const fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Elephant => 'e',
            PieceKind::Amazon => 'a',
            PieceKind::Cannon => 'c',
            PieceKind::Thief => 't',
            PieceKind::Giraffe => 'g',
            PieceKind::Scholar => 's',
            PieceKind::Clown => 'j',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a layout letter into a piece kind and color.
    pub const fn from_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'e' => PieceKind::Elephant,
            'a' => PieceKind::Amazon,
            'c' => PieceKind::Cannon,
            't' => PieceKind::Thief,
            'g' => PieceKind::Giraffe,
            's' => PieceKind::Scholar,
            'j' => PieceKind::Clown,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true for kinds that only arise through transformation.
    #[inline]
    pub const fn is_variant(self) -> bool {
        matches!(
            self,
            PieceKind::Amazon
                | PieceKind::Cannon
                | PieceKind::Thief
                | PieceKind::Giraffe
                | PieceKind::Scholar
                | PieceKind::Clown
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Elephant => "Elephant",
            PieceKind::Amazon => "Amazon",
            PieceKind::Cannon => "Cannon",
            PieceKind::Thief => "Thief",
            PieceKind::Giraffe => "Giraffe",
            PieceKind::Scholar => "Scholar",
            PieceKind::Clown => "Clown",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece as it sits on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Returns the layout letter for this piece.
    #[inline]
    pub const fn to_char(self) -> char {
        self.kind.to_char(self.color)
    }

    /// Parses a layout letter.
    #[inline]
    pub const fn from_char(c: char) -> Option<Piece> {
        match PieceKind::from_char(c) {
            Some((kind, color)) => Some(Piece { color, kind }),
            None => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_char() {
        assert_eq!(PieceKind::Pawn.to_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_char(Color::Black), 'p');
        assert_eq!(PieceKind::Elephant.to_char(Color::White), 'E');
        assert_eq!(PieceKind::Clown.to_char(Color::Black), 'j');
    }

    #[test]
    fn kind_from_char() {
        assert_eq!(
            PieceKind::from_char('A'),
            Some((PieceKind::Amazon, Color::White))
        );
        assert_eq!(
            PieceKind::from_char('t'),
            Some((PieceKind::Thief, Color::Black))
        );
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }

    #[test]
    fn every_kind_has_a_distinct_letter() {
        for kind in PieceKind::ALL {
            let c = kind.to_char(Color::Black);
            assert_eq!(PieceKind::from_char(c), Some((kind, Color::Black)));
        }
    }

    #[test]
    fn variant_kinds() {
        assert!(!PieceKind::Elephant.is_variant());
        assert!(!PieceKind::King.is_variant());
        assert!(PieceKind::Amazon.is_variant());
        assert!(PieceKind::Clown.is_variant());
    }

    #[test]
    fn piece_display() {
        let p = Piece::new(Color::White, PieceKind::Giraffe);
        assert_eq!(p.to_string(), "White Giraffe");
        assert_eq!(Piece::from_char('G'), Some(p));
    }
}
