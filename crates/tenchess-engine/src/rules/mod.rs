//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait which abstracts over the two
//! ways of playing: [`ClassicRules`] (plain 10x10 chess with elephants) and
//! [`VariantRules`] (capture-driven transformations). The legality evaluator
//! and the [`Game`](crate::Game) session are rule-agnostic; they delegate
//! movement and post-move effects to the active rule set.

mod classic;
mod variant;

pub use classic::ClassicRules;
pub use variant::{transformation, VariantRules};

use serde::{Deserialize, Serialize};
use tenchess_core::{Color, Piece, PieceKind, Square};

use crate::{Board, MoveList, VariantState};

/// Kinds a pawn may promote to.
pub const PROMOTION_CHOICES: [PieceKind; 5] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Elephant,
];

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinReason {
    Checkmate,
    Resignation,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub reason: WinReason,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            WinReason::Checkmate => "checkmate",
            WinReason::Resignation => "resignation",
        };
        write!(f, "{} wins by {}", self.winner, reason)
    }
}

/// What committing a move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: Square,
    pub to: Square,
    /// The moving piece as it was before the move.
    pub mover: Piece,
    pub captured: Option<Piece>,
    /// A clown was captured by a non-king and both pieces left the board.
    pub mutual_destruction: bool,
    /// A pawn reached its last row and waits for a promotion choice.
    pub promotion: Option<Square>,
    /// The kind the mover turned into, if the move transformed it.
    pub transformed: Option<PieceKind>,
}

/// Returns true if moving `from` onto `to` captures a clown with something
/// other than a king, which removes both pieces.
pub fn is_mutual_destruction(board: &Board, from: Square, to: Square) -> bool {
    match (board.piece_at(from), board.piece_at(to)) {
        (Some(mover), Some(target)) => {
            target.kind == PieceKind::Clown
                && mover.kind != PieceKind::King
                && mover.color != target.color
        }
        _ => false,
    }
}

/// Trait for the rule sets.
///
/// Only [`pseudo_legal_moves`](RuleSet::pseudo_legal_moves) and
/// [`new_state`](RuleSet::new_state) are required; the move-commit sequence
/// shared by every rule set is provided, with
/// [`after_move`](RuleSet::after_move) and
/// [`on_turn_start`](RuleSet::on_turn_start) as hooks for variant effects.
///
/// # Example
///
/// ```
/// use tenchess_core::Square;
/// use tenchess_engine::rules::{RuleSet, VariantRules};
///
/// let rules = VariantRules::default();
/// let board = rules.initial_board();
/// let state = rules.new_state();
/// let moves = rules.pseudo_legal_moves(&board, &state, Square::new(9, 1).unwrap());
/// assert_eq!(moves.len(), 2);
/// ```
pub trait RuleSet {
    /// Returns the starting board.
    fn initial_board(&self) -> Board {
        Board::startpos()
    }

    /// Returns an empty variant state for a new game.
    fn new_state(&self) -> VariantState;

    /// Generates the pseudo-legal moves of the piece on `from`.
    ///
    /// Ignores whose turn it is and whether the move exposes a king. An
    /// empty square yields an empty list.
    fn pseudo_legal_moves(&self, board: &Board, state: &VariantState, from: Square) -> MoveList;

    /// Returns the kinds a pawn may promote to.
    fn promotion_choices(&self) -> &'static [PieceKind] {
        &PROMOTION_CHOICES
    }

    /// Returns the board as it would be right after the move, for legality
    /// probes. Variant state is not consulted or changed.
    fn simulate(&self, board: &Board, from: Square, to: Square) -> Board {
        let mut scratch = board.clone();
        if is_mutual_destruction(board, from, to) {
            scratch.take(from);
            scratch.take(to);
        } else {
            scratch.relocate(from, to);
        }
        scratch
    }

    /// Commits a move that has already been checked for legality.
    ///
    /// Handles the clown mutual destruction, pawn bookkeeping and promotion
    /// detection, then runs [`after_move`](RuleSet::after_move) unless the
    /// mover was destroyed or now waits for a promotion choice. Returns
    /// `None` if `from` is empty.
    fn apply_move(
        &self,
        board: &mut Board,
        state: &mut VariantState,
        from: Square,
        to: Square,
    ) -> Option<AppliedMove> {
        let mover = board.occupant(from)?;
        let victim = board.occupant(to);
        let mut applied = AppliedMove {
            from,
            to,
            mover: mover.piece,
            captured: victim.map(|o| o.piece),
            mutual_destruction: false,
            promotion: None,
            transformed: None,
        };

        if let Some(victim) = victim {
            let key = state.key(to, victim);
            state.release(key);
        }

        if is_mutual_destruction(board, from, to) {
            board.take(from);
            board.take(to);
            let key = state.key(from, mover);
            state.release(key);
            if mover.piece.kind == PieceKind::Pawn {
                state.decrement_pawn_count(mover.piece.color);
            }
            applied.mutual_destruction = true;
            tracing::debug!("{} on {} and clown on {} destroy each other", mover.piece, from, to);
            return Some(applied);
        }

        if let Some(victim) = victim {
            if victim.piece.kind == PieceKind::Pawn {
                state.decrement_pawn_count(victim.piece.color);
            }
        }

        board.relocate(from, to);

        if mover.piece.kind == PieceKind::Pawn && to.row() == mover.piece.color.promotion_row() {
            applied.promotion = Some(to);
            return Some(applied);
        }

        applied.transformed = self.after_move(board, state, &applied);
        Some(applied)
    }

    /// Applies rule-specific effects of a committed, non-promoting move.
    ///
    /// Returns the kind the mover turned into, if any.
    fn after_move(
        &self,
        _board: &mut Board,
        _state: &mut VariantState,
        _applied: &AppliedMove,
    ) -> Option<PieceKind> {
        None
    }

    /// Replaces the pawn on `sq` with the chosen kind. The pawn counts as
    /// gone for its side.
    fn complete_promotion(
        &self,
        board: &mut Board,
        state: &mut VariantState,
        sq: Square,
        kind: PieceKind,
    ) -> bool {
        let Some(color) = board.color_at(sq) else {
            return false;
        };
        board.set_kind(sq, kind);
        state.decrement_pawn_count(color);
        true
    }

    /// Runs once each time `color` gets the move.
    ///
    /// Returns the square of a piece converted by the hook, if any.
    fn on_turn_start(
        &self,
        _board: &mut Board,
        _state: &mut VariantState,
        _color: Color,
    ) -> Option<Square> {
        None
    }
}
