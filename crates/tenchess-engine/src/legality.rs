//! Check, legal move filtering and checkmate detection.
//!
//! All functions are pure: they read the board and state they are given and
//! probe candidate moves on scratch copies produced by
//! [`RuleSet::simulate`].

use tenchess_core::{Color, Square};

use crate::rules::RuleSet;
use crate::{Board, MoveList, VariantState};

/// Returns true if `color`'s king is attacked.
///
/// A king is attacked when any enemy piece has a pseudo-legal move onto its
/// square. A side without a king is never in check.
pub fn is_in_check<R: RuleSet + ?Sized>(
    rules: &R,
    board: &Board,
    state: &VariantState,
    color: Color,
) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    board
        .pieces_of(color.opposite())
        .any(|from| rules.pseudo_legal_moves(board, state, from).reaches(king))
}

/// Returns the legal moves of the piece on `from`.
///
/// These are its pseudo-legal moves minus those that leave its own king
/// attacked. An empty square yields an empty list.
pub fn legal_moves<R: RuleSet + ?Sized>(
    rules: &R,
    board: &Board,
    state: &VariantState,
    from: Square,
) -> MoveList {
    let Some(color) = board.color_at(from) else {
        return MoveList::new();
    };
    let mut moves = rules.pseudo_legal_moves(board, state, from);
    moves.retain(|mv| {
        let after = rules.simulate(board, from, mv.to());
        !is_in_check(rules, &after, state, color)
    });
    moves
}

/// Returns true if any piece of `color` has a legal move.
pub fn has_legal_move<R: RuleSet + ?Sized>(
    rules: &R,
    board: &Board,
    state: &VariantState,
    color: Color,
) -> bool {
    board
        .pieces_of(color)
        .any(|from| !legal_moves(rules, board, state, from).is_empty())
}

/// Returns true if `color` is in check and has no legal move.
pub fn is_checkmate<R: RuleSet + ?Sized>(
    rules: &R,
    board: &Board,
    state: &VariantState,
    color: Color,
) -> bool {
    is_in_check(rules, board, state, color) && !has_legal_move(rules, board, state, color)
}
