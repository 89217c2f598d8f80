//! Variant state: stolen abilities, acquired captures, giraffe counters,
//! transformation marks, pawn counts.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tenchess_core::{Color, PieceKind, Square};

use crate::board::{Occupant, PieceId};

/// How variant state is attached to pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateTracking {
    /// State belongs to the piece: it follows the piece when it moves and is
    /// dropped when the piece is captured.
    #[default]
    Piece,
    /// State belongs to the square the piece stood on when it was recorded.
    /// Entries are never moved or cleared, so a piece that moves away leaves
    /// its abilities behind and whatever lands there later inherits them.
    Square,
}

/// Key of a variant-state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Square(Square),
    Piece(PieceId),
}

/// Auxiliary state of the variant rules.
///
/// Reset to empty (and both pawn counts to ten) at the start of each game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantState {
    tracking: StateTracking,
    thief_abilities: HashMap<StateKey, Option<PieceKind>>,
    scholar_captures: HashMap<StateKey, BTreeSet<PieceKind>>,
    clown_captures: HashMap<StateKey, BTreeSet<PieceKind>>,
    giraffe_moves: HashMap<StateKey, u32>,
    transformed: HashSet<StateKey>,
    pawn_counts: [u8; 2],
    queen_can_capture_clown: bool,
}

impl Default for VariantState {
    fn default() -> Self {
        Self::new(StateTracking::default())
    }
}

impl VariantState {
    /// Pawns per side in the starting position.
    pub const INITIAL_PAWNS: u8 = 10;

    /// Creates an empty state for a new game.
    pub fn new(tracking: StateTracking) -> Self {
        VariantState {
            tracking,
            thief_abilities: HashMap::new(),
            scholar_captures: HashMap::new(),
            clown_captures: HashMap::new(),
            giraffe_moves: HashMap::new(),
            transformed: HashSet::new(),
            pawn_counts: [Self::INITIAL_PAWNS; 2],
            queen_can_capture_clown: true,
        }
    }

    /// Returns how entries are keyed.
    #[inline]
    pub fn tracking(&self) -> StateTracking {
        self.tracking
    }

    /// Returns the key for the piece `occupant` standing on `sq`.
    #[inline]
    pub fn key(&self, sq: Square, occupant: Occupant) -> StateKey {
        match self.tracking {
            StateTracking::Piece => StateKey::Piece(occupant.id),
            StateTracking::Square => StateKey::Square(sq),
        }
    }

    /// Drops every entry of a piece that left the board.
    ///
    /// Square-keyed entries outlive their pieces, so this only acts on
    /// piece keys.
    pub fn release(&mut self, key: StateKey) {
        if let StateKey::Piece(_) = key {
            self.thief_abilities.remove(&key);
            self.scholar_captures.remove(&key);
            self.clown_captures.remove(&key);
            self.giraffe_moves.remove(&key);
            self.transformed.remove(&key);
        }
    }

    /// Returns the kind a thief currently imitates.
    pub fn thief_ability(&self, key: StateKey) -> Option<PieceKind> {
        self.thief_abilities.get(&key).copied().flatten()
    }

    /// Sets (or clears) the kind a thief imitates, replacing any previous one.
    pub fn set_thief_ability(&mut self, key: StateKey, kind: Option<PieceKind>) {
        self.thief_abilities.insert(key, kind);
    }

    fn capture_map(&self, holder: PieceKind) -> Option<&HashMap<StateKey, BTreeSet<PieceKind>>> {
        match holder {
            PieceKind::Scholar => Some(&self.scholar_captures),
            PieceKind::Clown => Some(&self.clown_captures),
            _ => None,
        }
    }

    fn capture_map_mut(
        &mut self,
        holder: PieceKind,
    ) -> Option<&mut HashMap<StateKey, BTreeSet<PieceKind>>> {
        match holder {
            PieceKind::Scholar => Some(&mut self.scholar_captures),
            PieceKind::Clown => Some(&mut self.clown_captures),
            _ => None,
        }
    }

    /// Returns the kinds a scholar or clown has captured, in kind order.
    ///
    /// Scholars and clowns keep separate sets. Any other `holder` has none.
    pub fn acquired(
        &self,
        holder: PieceKind,
        key: StateKey,
    ) -> impl Iterator<Item = PieceKind> + '_ {
        self.capture_map(holder)
            .and_then(|map| map.get(&key))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Starts an empty capture set for a freshly converted scholar or clown.
    pub fn init_acquired(&mut self, holder: PieceKind, key: StateKey) {
        if let Some(map) = self.capture_map_mut(holder) {
            map.insert(key, BTreeSet::new());
        }
    }

    /// Adds a captured kind to a scholar's or clown's set.
    ///
    /// Returns true if the kind was not already in the set.
    pub fn record_capture(
        &mut self,
        holder: PieceKind,
        key: StateKey,
        captured: PieceKind,
    ) -> bool {
        match self.capture_map_mut(holder) {
            Some(map) => map.entry(key).or_default().insert(captured),
            None => false,
        }
    }

    /// Returns how many moves the giraffe has made.
    pub fn giraffe_moves(&self, key: StateKey) -> u32 {
        self.giraffe_moves.get(&key).copied().unwrap_or(0)
    }

    /// Counts one more giraffe move, carrying the count from `from` to `to`.
    ///
    /// Piece keys are the same on both ends. Square keys hand the count over
    /// to the giraffe's new square.
    pub fn advance_giraffe(&mut self, from: StateKey, to: StateKey) {
        let moves = self.giraffe_moves.remove(&from).unwrap_or(0) + 1;
        self.giraffe_moves.insert(to, moves);
    }

    /// Returns true if the key has already undergone its one transformation.
    pub fn is_transformed(&self, key: StateKey) -> bool {
        self.transformed.contains(&key)
    }

    /// Marks the key as transformed.
    pub fn mark_transformed(&mut self, key: StateKey) {
        self.transformed.insert(key);
    }

    /// Returns the pawn count of a color.
    #[inline]
    pub fn pawn_count(&self, color: Color) -> u8 {
        self.pawn_counts[color.index()]
    }

    /// Overrides the pawn count of a color.
    pub fn set_pawn_count(&mut self, color: Color, count: u8) {
        self.pawn_counts[color.index()] = count;
    }

    /// Counts one pawn of `color` gone, by capture or promotion.
    pub fn decrement_pawn_count(&mut self, color: Color) {
        let count = &mut self.pawn_counts[color.index()];
        *count = count.saturating_sub(1);
    }

    /// Returns false once Black's clown conversion has happened.
    #[inline]
    pub fn queen_can_capture_clown(&self) -> bool {
        self.queen_can_capture_clown
    }

    /// Clears the queen-may-capture-clown flag for the rest of the game.
    pub fn forbid_queen_capturing_clown(&mut self) {
        self.queen_can_capture_clown = false;
    }
}
