//! Board representation.

use std::fmt;

use tenchess_core::{Color, LayoutError, LayoutParser, Piece, PieceKind, Square};

/// Stable identity of a piece, assigned when it is placed on the board.
///
/// The id travels with the piece when it moves and survives transformations,
/// so ability state can be attached to the piece rather than to a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

/// A piece together with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub piece: Piece,
    pub id: PieceId,
}

/// A 10x10 board: each square holds at most one piece.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Occupant>; Square::COUNT],
    next_id: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Board {
            cells: [None; Square::COUNT],
            next_id: 0,
        }
    }

    /// Creates the fixed starting position.
    ///
    /// Black holds rows 0 and 1, White rows 8 and 9. Both back rows read
    /// rook, knight, elephant, bishop, queen, king, bishop, elephant, knight, rook.
    pub fn startpos() -> Self {
        const BACK_ROW: [PieceKind; 10] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Elephant,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Elephant,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in (0u8..).zip(BACK_ROW) {
                if let Some(sq) = Square::new(color.back_row(), col) {
                    board.put(sq, Piece::new(color, kind));
                }
                if let Some(sq) = Square::new(color.pawn_start_row(), col) {
                    board.put(sq, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        board
    }

    /// Creates a board from layout text (see [`LayoutParser`]).
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let layout = LayoutParser::parse(text)?;
        let mut board = Board::empty();
        for (sq, piece) in layout.placements {
            board.put(sq, piece);
        }
        Ok(board)
    }

    /// Renders the board as layout text.
    pub fn to_layout(&self) -> String {
        LayoutParser::render(|sq| self.piece_at(sq))
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize].map(|o| o.piece)
    }

    /// Returns the piece and its identity on a square.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<Occupant> {
        self.cells[sq.index() as usize]
    }

    /// Returns the identity of the piece on a square.
    #[inline]
    pub fn id_at(&self, sq: Square) -> Option<PieceId> {
        self.cells[sq.index() as usize].map(|o| o.id)
    }

    /// Returns the color of the piece on a square.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    /// Places a new piece, replacing whatever was there, and returns its fresh id.
    pub fn put(&mut self, sq: Square, piece: Piece) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.cells[sq.index() as usize] = Some(Occupant { piece, id });
        id
    }

    /// Changes the kind of the piece on a square, keeping its color and id.
    ///
    /// Returns false if the square is empty.
    pub fn set_kind(&mut self, sq: Square, kind: PieceKind) -> bool {
        match &mut self.cells[sq.index() as usize] {
            Some(occupant) => {
                occupant.piece.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the occupant of a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Occupant> {
        self.cells[sq.index() as usize].take()
    }

    /// Moves the occupant of `from` to `to`, clearing `from`.
    ///
    /// Returns the occupant previously on `to`, if any.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Occupant> {
        let mover = self.take(from);
        std::mem::replace(&mut self.cells[to.index() as usize], mover)
    }

    /// Finds the king of the given color, scanning row-major.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.squares_of(color, PieceKind::King).next()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        Square::all().filter_map(|sq| self.occupant(sq).map(|o| (sq, o)))
    }

    /// Iterates over the squares holding pieces of one color, row-major.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.occupants()
            .filter(move |(_, o)| o.piece.color == color)
            .map(|(sq, _)| sq)
    }

    /// Iterates over the squares holding a given colored kind, row-major.
    pub fn squares_of(&self, color: Color, kind: PieceKind) -> impl Iterator<Item = Square> + '_ {
        let wanted = Piece::new(color, kind);
        self.occupants()
            .filter(move |(_, o)| o.piece == wanted)
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces of a given colored kind.
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.squares_of(color, kind).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_layout())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        write!(f, "{}", self.to_layout())?;
        write!(f, ")")
    }
}
