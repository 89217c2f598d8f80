//! Classic rules implementation.

use super::RuleSet;
use crate::movegen::base_movement;
use crate::{Board, MoveList, VariantState};
use tenchess_core::Square;

/// Plain 10x10 chess with elephants.
///
/// Every piece moves by its base pattern. There are no transformations,
/// no stolen or acquired abilities and no last-pawn conversion; clown
/// captures and pawn promotion still follow the shared commit sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicRules;

impl RuleSet for ClassicRules {
    fn new_state(&self) -> VariantState {
        VariantState::default()
    }

    fn pseudo_legal_moves(&self, board: &Board, _state: &VariantState, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = board.piece_at(from) {
            for movement in base_movement(piece.kind) {
                movement.generate(board, from, piece.color, &mut moves);
            }
        }
        moves
    }
}
