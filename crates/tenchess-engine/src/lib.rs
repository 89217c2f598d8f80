//! Rules engine for 10x10 variant chess.
//!
//! This crate provides:
//! - [`Board`] - 10x10 grid of pieces, each carrying a stable [`PieceId`]
//! - Pseudo-legal move generation for every piece kind ([`movegen`])
//! - [`RuleSet`] - trait for the classic and variant rules, including the
//!   capture-driven transformations of the variant
//! - [`VariantState`] - per-piece (or legacy per-square) ability store
//! - Check, legality and checkmate evaluation ([`legality`])
//! - [`Game`] - session object owning the live board and state
//!
//! # Architecture
//!
//! Every query runs against an explicit board and state snapshot. Legality
//! probes work on scratch copies of the board, so only [`Game`] ever mutates
//! the live position.
//!
//! # Example
//!
//! ```
//! use tenchess_core::Square;
//! use tenchess_engine::Game;
//!
//! let mut game = Game::new();
//! let knight = Square::new(9, 1).unwrap();
//! println!("Knight moves: {}", game.legal_moves(knight).len());
//!
//! let outcome = game
//!     .execute_move(Square::new(8, 4).unwrap(), Square::new(6, 4).unwrap())
//!     .unwrap();
//! assert!(outcome.result.is_none());
//! ```

mod board;
pub mod config;
mod game;
pub mod legality;
pub mod movegen;
pub mod rules;
mod state;

pub use board::{Board, Occupant, PieceId};
pub use config::{ConfigError, GiraffeToggle, Mode, RulesConfig};
pub use game::{Game, GameError, MoveOutcome};
pub use legality::{has_legal_move, is_checkmate, is_in_check, legal_moves};
pub use movegen::{Movement, MoveList};
pub use rules::{AppliedMove, ClassicRules, GameResult, RuleSet, VariantRules, WinReason};
pub use state::{StateKey, StateTracking, VariantState};
