//! Game session: the live board, variant state and turn order.
//!
//! The [`Game`] struct owns everything a match mutates. Queries never touch
//! the live position, and every rejected request leaves it unchanged.

use crate::legality;
use crate::rules::{GameResult, RuleSet, VariantRules, WinReason};
use crate::{Board, MoveList, VariantState};
use tenchess_core::{Color, Move, Piece, PieceKind, Square};
use thiserror::Error;

/// Error type for game operations.
///
/// A returned error guarantees that neither the board nor the variant state
/// changed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// A pawn on the given square is waiting for its promotion choice.
    #[error("promotion pending on {0}")]
    PromotionPending(Square),
    /// No pawn is waiting for a promotion choice.
    #[error("no promotion pending")]
    NoPromotionPending,
    /// The promotion choice names a different square than the pending pawn.
    #[error("promotion pending on {pending}, not {requested}")]
    PromotionSquareMismatch { pending: Square, requested: Square },
    /// Pawns cannot promote to this kind.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    /// There is no piece on the source square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece on the source square belongs to the side not on move.
    #[error("piece on {0} belongs to the opponent")]
    NotYourPiece(Square),
    /// The destination is not among the piece's legal moves.
    #[error("illegal move {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}

/// What a committed move (or promotion choice) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    /// A clown was captured by a non-king and both pieces left the board.
    pub mutual_destruction: bool,
    /// Set when a pawn reached its last row; the turn does not pass until
    /// [`Game::complete_promotion`] is called.
    pub promotion_pending: Option<Square>,
    /// The kind the moved piece turned into, by transformation or promotion.
    pub transformed: Option<PieceKind>,
    /// A last pawn of the side now on move that was converted at handover.
    pub threshold: Option<Square>,
    /// The side now on move is in check.
    pub check: bool,
    pub result: Option<GameResult>,
}

/// A game of 10x10 chess under a rule set.
///
/// Defaults to the variant rules with piece-keyed state.
#[derive(Debug, Clone)]
pub struct Game<R: RuleSet = VariantRules> {
    rules: R,
    board: Board,
    state: VariantState,
    side_to_move: Color,
    pending_promotion: Option<Square>,
    result: Option<GameResult>,
    plies: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new variant game from the starting position.
    pub fn new() -> Self {
        Self::with_rules(VariantRules::default())
    }
}

impl<R: RuleSet> Game<R> {
    /// Creates a new game from the starting position under `rules`.
    pub fn with_rules(rules: R) -> Self {
        let board = rules.initial_board();
        let state = rules.new_state();
        Game {
            rules,
            board,
            state,
            side_to_move: Color::White,
            pending_promotion: None,
            result: None,
            plies: 0,
        }
    }

    /// Creates a game from an arbitrary board.
    ///
    /// Pawn counts are taken from the board and variant state starts empty.
    /// No turn-start hook runs for `side_to_move`, but a side that is
    /// already mated ends the game immediately.
    pub fn from_board(rules: R, board: Board, side_to_move: Color) -> Self {
        let mut state = rules.new_state();
        for color in Color::ALL {
            let pawns = board.count(color, PieceKind::Pawn);
            state.set_pawn_count(color, u8::try_from(pawns).unwrap_or(u8::MAX));
        }
        let mut game = Game {
            rules,
            board,
            state,
            side_to_move,
            pending_promotion: None,
            result: None,
            plies: 0,
        };
        if game.is_checkmate(side_to_move) {
            game.result = Some(GameResult {
                winner: side_to_move.opposite(),
                reason: WinReason::Checkmate,
            });
        }
        game
    }

    /// Starts over from the starting position with empty variant state.
    pub fn reset(&mut self) {
        self.board = self.rules.initial_board();
        self.state = self.rules.new_state();
        self.side_to_move = Color::White;
        self.pending_promotion = None;
        self.result = None;
        self.plies = 0;
        tracing::debug!("game reset");
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the live variant state.
    pub fn state(&self) -> &VariantState {
        &self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the square of a pawn waiting for its promotion choice.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.plies
    }

    /// Returns the legal moves of the piece on `sq`, whoever's turn it is.
    pub fn legal_moves(&self, sq: Square) -> MoveList {
        legality::legal_moves(&self.rules, &self.board, &self.state, sq)
    }

    /// Returns every legal move of `color`, in row-major source order.
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in self.board.pieces_of(color) {
            moves.extend_from_slice(self.legal_moves(from).as_slice());
        }
        moves
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        legality::is_in_check(&self.rules, &self.board, &self.state, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        legality::is_checkmate(&self.rules, &self.board, &self.state, color)
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        legality::has_legal_move(&self.rules, &self.board, &self.state, color)
    }

    /// Moves the piece on `from` to `to` for the side on move.
    ///
    /// Unless the move leaves a promotion pending, the turn passes: the side
    /// switches, the new side's last-pawn conversion runs, and checkmate is
    /// evaluated for it.
    pub fn execute_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        let mover = self.validate(from, to).map_err(|err| {
            tracing::debug!("rejected {} to {}: {}", from, to, err);
            err
        })?;

        let applied = self
            .rules
            .apply_move(&mut self.board, &mut self.state, from, to)
            .ok_or(GameError::EmptySquare(from))?;
        self.plies += 1;
        tracing::debug!("{} {} to {}", mover, from, to);

        let mut outcome = MoveOutcome {
            captured: applied.captured,
            mutual_destruction: applied.mutual_destruction,
            promotion_pending: applied.promotion,
            transformed: applied.transformed,
            threshold: None,
            check: false,
            result: None,
        };

        if let Some(sq) = applied.promotion {
            self.pending_promotion = Some(sq);
            tracing::debug!("{} pawn on {} awaits promotion", mover.color, sq);
            return Ok(outcome);
        }

        self.hand_over(&mut outcome);
        Ok(outcome)
    }

    fn validate(&self, from: Square, to: Square) -> Result<Piece, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if let Some(sq) = self.pending_promotion {
            return Err(GameError::PromotionPending(sq));
        }
        let piece = self.board.piece_at(from).ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(GameError::NotYourPiece(from));
        }
        if !self.legal_moves(from).reaches(to) {
            return Err(GameError::IllegalMove { from, to });
        }
        Ok(piece)
    }

    /// Replaces the pending pawn on `sq` with `kind` and passes the turn.
    pub fn complete_promotion(
        &mut self,
        sq: Square,
        kind: PieceKind,
    ) -> Result<MoveOutcome, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let pending = self.pending_promotion.ok_or(GameError::NoPromotionPending)?;
        if pending != sq {
            return Err(GameError::PromotionSquareMismatch {
                pending,
                requested: sq,
            });
        }
        if !self.rules.promotion_choices().contains(&kind) {
            return Err(GameError::InvalidPromotion(kind));
        }

        self.rules
            .complete_promotion(&mut self.board, &mut self.state, sq, kind);
        self.pending_promotion = None;
        tracing::debug!("pawn on {} promoted to {}", sq, kind);

        let mut outcome = MoveOutcome {
            captured: None,
            mutual_destruction: false,
            promotion_pending: None,
            transformed: Some(kind),
            threshold: None,
            check: false,
            result: None,
        };
        self.hand_over(&mut outcome);
        Ok(outcome)
    }

    /// Runs the last-pawn conversion for `color`.
    ///
    /// Turn handover already does this for the side coming on move; calling
    /// it again in the same turn never converts a second pawn.
    pub fn check_threshold_transformations(&mut self, color: Color) -> Option<Square> {
        self.rules
            .on_turn_start(&mut self.board, &mut self.state, color)
    }

    /// The side to move concedes.
    pub fn resign(&mut self) -> Result<GameResult, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let result = GameResult {
            winner: self.side_to_move.opposite(),
            reason: WinReason::Resignation,
        };
        self.result = Some(result);
        self.pending_promotion = None;
        tracing::debug!("{} resigns", self.side_to_move);
        Ok(result)
    }

    fn hand_over(&mut self, outcome: &mut MoveOutcome) {
        let mover = self.side_to_move;
        self.side_to_move = mover.opposite();
        outcome.threshold = self.check_threshold_transformations(self.side_to_move);
        outcome.check = self.is_in_check(self.side_to_move);
        if outcome.check && !self.has_legal_move(self.side_to_move) {
            let result = GameResult {
                winner: mover,
                reason: WinReason::Checkmate,
            };
            self.result = Some(result);
            outcome.result = Some(result);
            tracing::debug!("checkmate, {} wins", mover);
        }
    }
}
