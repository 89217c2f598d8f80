//! Variant rules: transforming pieces and acquired abilities.

use super::{AppliedMove, RuleSet};
use crate::config::{GiraffeToggle, RulesConfig};
use crate::movegen::{ability_movement, base_movement, giraffe_movement, Movement};
use crate::{Board, MoveList, StateTracking, VariantState};
use tenchess_core::{Color, Piece, PieceKind, Square};

/// The variant rules.
///
/// On top of the classic movement:
/// - a knight taking a queen becomes an amazon (queen + knight), a rook
///   taking a rook a cannon (rook + king), a bishop taking a bishop a thief,
///   a knight taking a knight a giraffe; each piece transforms at most once
/// - a thief moves like the last kind it captured, or like a bishop before
///   its first capture
/// - a giraffe alternates between knight and bishop movement
/// - when a side is down to its last pawn, that pawn becomes a scholar
///   (White) or a clown (Black): king steps plus every kind it captures
/// - taking a clown with anything but a king removes both pieces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantRules {
    tracking: StateTracking,
    giraffe: GiraffeToggle,
}

impl VariantRules {
    pub const fn new(tracking: StateTracking, giraffe: GiraffeToggle) -> Self {
        VariantRules { tracking, giraffe }
    }

    pub const fn from_config(config: &RulesConfig) -> Self {
        Self::new(config.tracking, config.giraffe)
    }

    /// Square-keyed state and giraffes that never switch.
    pub const fn legacy() -> Self {
        Self::from_config(&RulesConfig::legacy())
    }

    pub const fn tracking(&self) -> StateTracking {
        self.tracking
    }

    pub const fn giraffe(&self) -> GiraffeToggle {
        self.giraffe
    }
}

/// The kind a mover turns into by capturing `captured`, if the pair transforms.
pub const fn transformation(mover: PieceKind, captured: PieceKind) -> Option<PieceKind> {
    match (mover, captured) {
        (PieceKind::Knight, PieceKind::Queen) => Some(PieceKind::Amazon),
        (PieceKind::Rook, PieceKind::Rook) => Some(PieceKind::Cannon),
        (PieceKind::Bishop, PieceKind::Bishop) => Some(PieceKind::Thief),
        (PieceKind::Knight, PieceKind::Knight) => Some(PieceKind::Giraffe),
        _ => None,
    }
}

fn extend(board: &Board, from: Square, color: Color, movement: &[Movement], moves: &mut MoveList) {
    for m in movement {
        m.generate(board, from, color, moves);
    }
}

impl RuleSet for VariantRules {
    fn new_state(&self) -> VariantState {
        VariantState::new(self.tracking)
    }

    fn pseudo_legal_moves(&self, board: &Board, state: &VariantState, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        let Some(occupant) = board.occupant(from) else {
            return moves;
        };
        let Piece { color, kind } = occupant.piece;
        let key = state.key(from, occupant);

        match kind {
            PieceKind::Giraffe => {
                let movement = giraffe_movement(state.giraffe_moves(key));
                extend(board, from, color, movement, &mut moves);
            }
            PieceKind::Thief => {
                let movement = match state.thief_ability(key) {
                    Some(stolen) => ability_movement(stolen),
                    None => base_movement(PieceKind::Thief),
                };
                extend(board, from, color, movement, &mut moves);
            }
            PieceKind::Scholar | PieceKind::Clown => {
                extend(board, from, color, base_movement(kind), &mut moves);
                for acquired in state.acquired(kind, key) {
                    extend(board, from, color, ability_movement(acquired), &mut moves);
                }
            }
            _ => extend(board, from, color, base_movement(kind), &mut moves),
        }
        moves
    }

    fn after_move(
        &self,
        board: &mut Board,
        state: &mut VariantState,
        applied: &AppliedMove,
    ) -> Option<PieceKind> {
        let occupant = board.occupant(applied.to)?;
        let key = state.key(applied.to, occupant);
        let mover = applied.mover.kind;
        let mut transformed = None;

        if let Some(captured) = applied.captured {
            if !state.is_transformed(key) {
                if let Some(kind) = transformation(mover, captured.kind) {
                    board.set_kind(applied.to, kind);
                    if kind == PieceKind::Thief {
                        state.set_thief_ability(key, None);
                    }
                    state.mark_transformed(key);
                    tracing::debug!("{} on {} becomes {}", applied.mover, applied.to, kind);
                    transformed = Some(kind);
                }
            }

            match mover {
                PieceKind::Thief => {
                    state.set_thief_ability(key, Some(captured.kind));
                    tracing::debug!("thief on {} now moves as {}", applied.to, captured.kind);
                }
                PieceKind::Scholar | PieceKind::Clown => {
                    if state.record_capture(mover, key, captured.kind) {
                        tracing::debug!("{} on {} acquires {}", mover, applied.to, captured.kind);
                    }
                }
                _ => {}
            }
        }

        if mover == PieceKind::Giraffe && self.giraffe == GiraffeToggle::Alternating {
            state.advance_giraffe(state.key(applied.from, occupant), key);
        }

        transformed
    }

    /// Converts the side's last pawn once its pawn count drops to exactly one.
    ///
    /// The first pawn in row-major order that has not transformed before
    /// becomes a scholar (White) or clown (Black) with an empty capture set,
    /// and the pawn count is forced to zero so the conversion never repeats.
    fn on_turn_start(
        &self,
        board: &mut Board,
        state: &mut VariantState,
        color: Color,
    ) -> Option<Square> {
        if state.pawn_count(color) != 1 {
            return None;
        }

        let target = board.squares_of(color, PieceKind::Pawn).find(|&sq| {
            board
                .occupant(sq)
                .is_some_and(|o| !state.is_transformed(state.key(sq, o)))
        })?;
        let occupant = board.occupant(target)?;
        let key = state.key(target, occupant);

        let kind = match color {
            Color::White => PieceKind::Scholar,
            Color::Black => PieceKind::Clown,
        };
        board.set_kind(target, kind);
        state.init_acquired(kind, key);
        state.mark_transformed(key);
        if color == Color::Black {
            state.forbid_queen_capturing_clown();
        }
        state.set_pawn_count(color, 0);
        tracing::debug!("{} last pawn on {} becomes {}", color, target, kind);
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateKey;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn setup(rules: VariantRules, layout: &str) -> (Board, VariantState) {
        (Board::from_layout(layout).unwrap(), rules.new_state())
    }

    fn play(
        rules: &VariantRules,
        board: &mut Board,
        state: &mut VariantState,
        from: Square,
        to: Square,
    ) -> AppliedMove {
        rules.apply_move(board, state, from, to).unwrap()
    }

    fn kind_at(board: &Board, at: Square) -> Option<PieceKind> {
        board.piece_at(at).map(|p| p.kind)
    }

    #[test]
    fn transformation_pairs() {
        assert_eq!(transformation(PieceKind::Knight, PieceKind::Queen), Some(PieceKind::Amazon));
        assert_eq!(transformation(PieceKind::Rook, PieceKind::Rook), Some(PieceKind::Cannon));
        assert_eq!(transformation(PieceKind::Bishop, PieceKind::Bishop), Some(PieceKind::Thief));
        assert_eq!(transformation(PieceKind::Knight, PieceKind::Knight), Some(PieceKind::Giraffe));
        assert_eq!(transformation(PieceKind::Queen, PieceKind::Knight), None);
        assert_eq!(transformation(PieceKind::Rook, PieceKind::Bishop), None);
    }

    #[test]
    fn knight_takes_queen_becomes_amazon() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/3q6/55/2N7/5K4");
        let applied = play(&rules, &mut board, &mut state, sq(8, 2), sq(6, 3));
        assert_eq!(applied.transformed, Some(PieceKind::Amazon));
        assert_eq!(kind_at(&board, sq(6, 3)), Some(PieceKind::Amazon));
        let occupant = board.occupant(sq(6, 3)).unwrap();
        assert!(state.is_transformed(state.key(sq(6, 3), occupant)));
        // Queen lines plus knight jumps.
        let moves = rules.pseudo_legal_moves(&board, &state, sq(6, 3));
        assert!(moves.reaches(sq(2, 3)));
        assert!(moves.reaches(sq(4, 4)));
        assert!(moves.reaches(sq(3, 0)));
    }

    #[test]
    fn rook_takes_rook_becomes_cannon() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/r9/55/55/55/55/55/R4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(3, 0));
        assert_eq!(kind_at(&board, sq(3, 0)), Some(PieceKind::Cannon));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 0));
        assert!(moves.reaches(sq(2, 1)));
        assert!(moves.reaches(sq(3, 9)));
        assert!(!moves.reaches(sq(1, 2)));
    }

    #[test]
    fn bishop_takes_bishop_becomes_thief_without_ability() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/2b7/55/B4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(7, 2));
        assert_eq!(kind_at(&board, sq(7, 2)), Some(PieceKind::Thief));
        let key = state.key(sq(7, 2), board.occupant(sq(7, 2)).unwrap());
        assert_eq!(state.thief_ability(key), None);
        // Moves like a bishop until it steals something.
        let moves = rules.pseudo_legal_moves(&board, &state, sq(7, 2));
        assert!(moves.reaches(sq(2, 7)));
        assert!(!moves.reaches(sq(6, 2)));
    }

    #[test]
    fn knight_takes_knight_becomes_giraffe() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/1n8/55/N4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(7, 1));
        assert_eq!(kind_at(&board, sq(7, 1)), Some(PieceKind::Giraffe));
    }

    #[test]
    fn giraffe_moves_as_knight_on_even_count_and_bishop_on_odd() {
        let rules = VariantRules::default();
        let (board, mut state) = setup(rules, "4k5/55/55/55/55/4G5/55/55/55/5K4");
        let from = sq(5, 4);
        let key = state.key(from, board.occupant(from).unwrap());

        let untoggled = rules.pseudo_legal_moves(&board, &state, from);
        assert_eq!(untoggled.len(), 8);
        assert!(untoggled.reaches(sq(3, 5)));
        assert!(!untoggled.reaches(sq(4, 5)));

        state.advance_giraffe(key, key);
        let toggled = rules.pseudo_legal_moves(&board, &state, from);
        assert!(toggled.reaches(sq(4, 5)));
        assert!(toggled.reaches(sq(1, 8)));
        assert!(!toggled.reaches(sq(3, 5)));
    }

    #[test]
    fn alternating_giraffe_switches_after_each_move() {
        let rules = VariantRules::new(StateTracking::Piece, GiraffeToggle::Alternating);
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/4G5/55/55/55/5K4");
        play(&rules, &mut board, &mut state, sq(5, 4), sq(3, 5));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 5));
        assert!(moves.reaches(sq(4, 6)), "bishop step after first move");
        assert!(!moves.reaches(sq(5, 6)));
        play(&rules, &mut board, &mut state, sq(3, 5), sq(5, 7));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(5, 7));
        assert!(moves.reaches(sq(3, 8)), "knight jump after second move");
    }

    #[test]
    fn square_keyed_giraffe_carries_its_count() {
        let rules = VariantRules::new(StateTracking::Square, GiraffeToggle::Alternating);
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/4G5/55/55/55/5K4");
        assert_eq!(state.tracking(), StateTracking::Square);

        play(&rules, &mut board, &mut state, sq(5, 4), sq(3, 5));
        assert_eq!(state.giraffe_moves(StateKey::Square(sq(5, 4))), 0);
        assert_eq!(state.giraffe_moves(StateKey::Square(sq(3, 5))), 1);
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 5));
        assert!(moves.reaches(sq(4, 6)), "bishop step after first move");

        play(&rules, &mut board, &mut state, sq(3, 5), sq(5, 7));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(5, 7));
        assert!(moves.reaches(sq(3, 8)), "knight jump after second move");
        assert!(!moves.reaches(sq(4, 6)));

        play(&rules, &mut board, &mut state, sq(5, 7), sq(3, 8));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 8));
        assert!(moves.reaches(sq(4, 7)), "bishop step after third move");
        assert!(!moves.reaches(sq(5, 7)));
    }

    #[test]
    fn rules_follow_config() {
        let config = RulesConfig::from_toml_str("tracking = \"square\"").unwrap();
        let rules = VariantRules::from_config(&config);
        assert_eq!(rules.tracking(), StateTracking::Square);
        assert_eq!(rules.giraffe(), GiraffeToggle::Alternating);
        assert_eq!(VariantRules::legacy().giraffe(), GiraffeToggle::Frozen);
    }

    #[test]
    fn frozen_giraffe_never_switches() {
        let rules = VariantRules::new(StateTracking::Piece, GiraffeToggle::Frozen);
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/4G5/55/55/55/5K4");
        play(&rules, &mut board, &mut state, sq(5, 4), sq(3, 5));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 5));
        assert_eq!(moves.len(), 8);
        assert!(!moves.reaches(sq(4, 6)));
    }

    #[test]
    fn thief_imitates_last_capture_only() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/2b7/55/B4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(7, 2));
        let thief_id = board.id_at(sq(7, 2)).unwrap();

        board.put(sq(4, 5), Piece::new(Color::Black, PieceKind::Rook));
        play(&rules, &mut board, &mut state, sq(7, 2), sq(4, 5));
        assert_eq!(state.thief_ability(StateKey::Piece(thief_id)), Some(PieceKind::Rook));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(4, 5));
        assert!(moves.reaches(sq(4, 0)));
        assert!(!moves.reaches(sq(3, 4)));

        board.put(sq(2, 5), Piece::new(Color::Black, PieceKind::Knight));
        play(&rules, &mut board, &mut state, sq(4, 5), sq(2, 5));
        assert_eq!(state.thief_ability(StateKey::Piece(thief_id)), Some(PieceKind::Knight));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(2, 5));
        assert!(moves.reaches(sq(4, 6)));
        assert!(!moves.reaches(sq(2, 0)), "rook ability was replaced");
    }

    #[test]
    fn scholar_accumulates_captured_kinds() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/4n5/4S5/55/55/5K4");
        let id = board.id_at(sq(6, 4)).unwrap();
        state.init_acquired(PieceKind::Scholar, StateKey::Piece(id));

        let before = rules.pseudo_legal_moves(&board, &state, sq(6, 4));
        assert_eq!(before.len(), 8);

        play(&rules, &mut board, &mut state, sq(6, 4), sq(5, 4));
        board.put(sq(4, 4), Piece::new(Color::Black, PieceKind::Rook));
        play(&rules, &mut board, &mut state, sq(5, 4), sq(4, 4));
        board.put(sq(3, 4), Piece::new(Color::Black, PieceKind::Knight));
        play(&rules, &mut board, &mut state, sq(4, 4), sq(3, 4));

        let kinds: Vec<PieceKind> = state
            .acquired(PieceKind::Scholar, StateKey::Piece(id))
            .collect();
        assert_eq!(kinds, vec![PieceKind::Knight, PieceKind::Rook]);
        let moves = rules.pseudo_legal_moves(&board, &state, sq(3, 4));
        assert!(moves.reaches(sq(2, 3)), "king step");
        assert!(moves.reaches(sq(1, 5)), "knight jump");
        assert!(moves.reaches(sq(3, 9)), "rook line");
    }

    #[test]
    fn clown_moves_like_king_not_elephant() {
        let rules = VariantRules::default();
        let (board, state) = setup(rules, "4k5/55/55/55/4j5/55/55/55/55/5K4");
        let moves = rules.pseudo_legal_moves(&board, &state, sq(4, 4));
        assert_eq!(moves.len(), 8);
        assert!(moves.reaches(sq(3, 4)));
        assert!(!moves.reaches(sq(5, 6)), "no elephant jump");
    }

    #[test]
    fn square_tracking_never_retransforms_a_square() {
        let rules = VariantRules::legacy();
        let (mut board, mut state) =
            setup(rules, "4k5/55/55/55/3q6/55/2N7/55/55/1N3K4");
        play(&rules, &mut board, &mut state, sq(6, 2), sq(4, 3));
        assert_eq!(kind_at(&board, sq(4, 3)), Some(PieceKind::Amazon));
        assert!(state.is_transformed(StateKey::Square(sq(4, 3))));

        // A fresh queen on the same square, taken by the other knight.
        board.put(sq(4, 3), Piece::new(Color::Black, PieceKind::Queen));
        board.put(sq(6, 2), Piece::new(Color::White, PieceKind::Knight));
        let applied = play(&rules, &mut board, &mut state, sq(6, 2), sq(4, 3));
        assert_eq!(applied.transformed, None);
        assert_eq!(kind_at(&board, sq(4, 3)), Some(PieceKind::Knight));
    }

    #[test]
    fn piece_tracking_moves_ability_with_the_piece() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/2b7/55/B4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(7, 2));
        board.put(sq(5, 4), Piece::new(Color::Black, PieceKind::Rook));
        play(&rules, &mut board, &mut state, sq(7, 2), sq(5, 4));
        // A quiet rook move keeps the stolen ability.
        play(&rules, &mut board, &mut state, sq(5, 4), sq(5, 0));
        let moves = rules.pseudo_legal_moves(&board, &state, sq(5, 0));
        assert!(moves.reaches(sq(5, 9)));
    }

    #[test]
    fn square_tracking_leaves_ability_behind() {
        let rules = VariantRules::legacy();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/2b7/55/B4K4");
        play(&rules, &mut board, &mut state, sq(9, 0), sq(7, 2));
        board.put(sq(5, 4), Piece::new(Color::Black, PieceKind::Rook));
        play(&rules, &mut board, &mut state, sq(7, 2), sq(5, 4));
        assert_eq!(state.thief_ability(StateKey::Square(sq(5, 4))), Some(PieceKind::Rook));
        play(&rules, &mut board, &mut state, sq(5, 4), sq(5, 0));
        // On its new square the thief is back to bishop movement.
        let moves = rules.pseudo_legal_moves(&board, &state, sq(5, 0));
        assert!(!moves.reaches(sq(5, 9)));
        assert!(moves.reaches(sq(4, 1)));
        assert_eq!(state.thief_ability(StateKey::Square(sq(5, 4))), Some(PieceKind::Rook));
    }

    #[test]
    fn last_white_pawn_becomes_scholar() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/55/3P2P3/5K4");
        state.set_pawn_count(Color::White, 1);
        let converted = rules.on_turn_start(&mut board, &mut state, Color::White);
        assert_eq!(converted, Some(sq(8, 3)));
        assert_eq!(kind_at(&board, sq(8, 3)), Some(PieceKind::Scholar));
        assert_eq!(kind_at(&board, sq(8, 6)), Some(PieceKind::Pawn));
        let key = state.key(sq(8, 3), board.occupant(sq(8, 3)).unwrap());
        assert_eq!(state.acquired(PieceKind::Scholar, key).count(), 0);
        assert_eq!(state.pawn_count(Color::White), 0);
        assert!(state.queen_can_capture_clown());
        assert_eq!(rules.on_turn_start(&mut board, &mut state, Color::White), None);
    }

    #[test]
    fn last_black_pawn_becomes_clown() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/6p3/55/55/55/55/55/55/55/5K4");
        state.set_pawn_count(Color::Black, 1);
        assert_eq!(rules.on_turn_start(&mut board, &mut state, Color::Black), Some(sq(1, 6)));
        assert_eq!(kind_at(&board, sq(1, 6)), Some(PieceKind::Clown));
        assert!(!state.queen_can_capture_clown());
        assert_eq!(state.pawn_count(Color::Black), 0);
    }

    #[test]
    fn conversion_needs_exactly_one() {
        let rules = VariantRules::default();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/55/3P6/5K4");
        state.set_pawn_count(Color::White, 2);
        assert_eq!(rules.on_turn_start(&mut board, &mut state, Color::White), None);
        state.set_pawn_count(Color::White, 1);
        assert_eq!(rules.on_turn_start(&mut board, &mut state, Color::Black), None);
        assert_eq!(kind_at(&board, sq(8, 3)), Some(PieceKind::Pawn));
    }

    #[test]
    fn conversion_skips_transformed_squares() {
        let rules = VariantRules::legacy();
        let (mut board, mut state) = setup(rules, "4k5/55/55/55/55/55/55/55/3P2P3/5K4");
        state.set_pawn_count(Color::White, 1);
        state.mark_transformed(StateKey::Square(sq(8, 3)));
        assert_eq!(rules.on_turn_start(&mut board, &mut state, Color::White), Some(sq(8, 6)));
    }
}
