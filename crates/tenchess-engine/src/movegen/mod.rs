//! Pseudo-legal move generation.
//!
//! One generator per movement pattern: sliders (rook, bishop and queen
//! lines), fixed leapers (knight jumps, king steps), pawns and elephants.
//! Generators only look at board occupancy; they know nothing about check
//! or about variant state.
//!
//! [`Movement`] is the closed set of patterns; every piece kind resolves to
//! a slice of them through [`base_movement`] or [`ability_movement`].

use crate::Board;
use tenchess_core::{Color, Move, PieceKind, Square};

/// Orthogonal directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight directions.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Knight jump offsets.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King step offsets.
pub const KING_STEPS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// A list of moves from one square, each destination listed once.
///
/// A piece can reach at most every other square of the board, so the list
/// uses a fixed-size array and a 100-bit destination set instead of heap
/// allocation. Pushing a second move to an already listed destination is a
/// no-op, which turns the union of several movement patterns into a set.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
    destinations: u128,
}

impl MoveList {
    /// Maximum number of distinct destinations.
    pub const MAX_MOVES: usize = Square::COUNT;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        const PLACEHOLDER: Move = match Square::from_index(0) {
            Some(sq) => Move::quiet(sq, sq),
            None => unreachable!(),
        };
        MoveList {
            moves: [PLACEHOLDER; Self::MAX_MOVES],
            len: 0,
            destinations: 0,
        }
    }

    /// Adds a move unless its destination is already listed.
    #[inline]
    pub fn push(&mut self, m: Move) {
        let bit = 1u128 << m.to().index();
        if self.destinations & bit != 0 {
            return;
        }
        debug_assert!(self.len < Self::MAX_MOVES);
        self.destinations |= bit;
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if some move lands on `sq`.
    #[inline]
    pub const fn reaches(&self, sq: Square) -> bool {
        self.destinations & (1u128 << sq.index()) != 0
    }

    /// Returns the move landing on `sq`, if any.
    pub fn find(&self, sq: Square) -> Option<Move> {
        if !self.reaches(sq) {
            return None;
        }
        self.as_slice().iter().copied().find(|m| m.to() == sq)
    }

    /// Returns the destination squares in generation order.
    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().map(|m| m.to())
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            let m = self.moves[read];
            if f(&m) {
                self.moves[write] = m;
                write += 1;
            } else {
                self.destinations &= !(1u128 << m.to().index());
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Walk each direction until the edge, a friendly piece, or an enemy
    /// piece (which is captured).
    Slide(&'static [(i8, i8)]),
    /// Jump to each offset that is empty or enemy-held.
    Leap(&'static [(i8, i8)]),
    /// Pawn pushes and diagonal captures.
    Pawn,
    /// One step forward, or forward and one or two columns sideways.
    Elephant,
}

impl Movement {
    /// Generates this pattern's moves for a `color` piece on `from`.
    pub fn generate(self, board: &Board, from: Square, color: Color, moves: &mut MoveList) {
        match self {
            Movement::Slide(directions) => slide_moves(board, from, color, directions, moves),
            Movement::Leap(offsets) => leap_moves(board, from, color, offsets, moves),
            Movement::Pawn => pawn_moves(board, from, color, moves),
            Movement::Elephant => elephant_moves(board, from, color, moves),
        }
    }
}

const PAWN: &[Movement] = &[Movement::Pawn];
const KNIGHT: &[Movement] = &[Movement::Leap(&KNIGHT_JUMPS)];
const BISHOP: &[Movement] = &[Movement::Slide(&BISHOP_DIRECTIONS)];
const ROOK: &[Movement] = &[Movement::Slide(&ROOK_DIRECTIONS)];
const QUEEN: &[Movement] = &[Movement::Slide(&QUEEN_DIRECTIONS)];
const KING: &[Movement] = &[Movement::Leap(&KING_STEPS)];
const ELEPHANT: &[Movement] = &[Movement::Elephant];
const AMAZON: &[Movement] = &[
    Movement::Slide(&QUEEN_DIRECTIONS),
    Movement::Leap(&KNIGHT_JUMPS),
];
const CANNON: &[Movement] = &[
    Movement::Slide(&ROOK_DIRECTIONS),
    Movement::Leap(&KING_STEPS),
];

/// Movement of a piece kind with no variant state attached.
///
/// Stateful kinds resolve to their resting pattern: a thief without a stolen
/// ability slides like a bishop, a giraffe on an even move count jumps like a
/// knight, and scholars and clowns without captures step like a king.
pub const fn base_movement(kind: PieceKind) -> &'static [Movement] {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => KING,
        PieceKind::Elephant => ELEPHANT,
        PieceKind::Amazon => AMAZON,
        PieceKind::Cannon => CANNON,
        PieceKind::Thief => BISHOP,
        PieceKind::Giraffe => KNIGHT,
        PieceKind::Scholar | PieceKind::Clown => KING,
    }
}

/// Movement granted by having captured (or stolen) a piece of `kind`.
///
/// Same as [`base_movement`] except for the giraffe, whose alternation
/// belongs to the giraffe itself: capturing one only grants king steps.
pub const fn ability_movement(kind: PieceKind) -> &'static [Movement] {
    match kind {
        PieceKind::Giraffe => KING,
        other => base_movement(other),
    }
}

/// Movement of a giraffe that has made `moves` moves.
pub const fn giraffe_movement(moves: u32) -> &'static [Movement] {
    if moves % 2 == 0 {
        KNIGHT
    } else {
        BISHOP
    }
}

/// Pushes the move to `to` if it is empty or enemy-held. Returns true if
/// the square was empty.
#[inline]
fn push_if_open(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    moves: &mut MoveList,
) -> bool {
    match board.color_at(to) {
        None => {
            moves.push(Move::quiet(from, to));
            true
        }
        Some(c) if c != color => {
            moves.push(Move::capture(from, to));
            false
        }
        Some(_) => false,
    }
}

/// Generates sliding moves along each direction.
pub fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            if !push_if_open(board, from, to, color, moves) {
                break;
            }
            current = to;
        }
    }
}

/// Generates fixed-offset jumps.
pub fn leap_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            push_if_open(board, from, to, color, moves);
        }
    }
}

/// Generates pawn moves.
///
/// A single push onto an empty square; from the start row, a double push if
/// both squares ahead are empty; a diagonal capture onto either forward
/// diagonal holding an enemy piece. No en passant.
pub fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            moves.push(Move::quiet(from, one));
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move::quiet(from, two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.color_at(to).is_some_and(|c| c != color) {
                moves.push(Move::capture(from, to));
            }
        }
    }
}

/// Generates elephant moves.
///
/// One row forward, landing straight ahead or one or two columns to either
/// side. Each landing square is checked on its own; nothing in between can
/// block the jump.
pub fn elephant_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let dir = color.forward();
    for dc in [0, -1, 1, -2, 2] {
        if let Some(to) = from.offset(dir, dc) {
            push_if_open(board, from, to, color, moves);
        }
    }
}
