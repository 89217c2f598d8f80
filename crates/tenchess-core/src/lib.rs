//! Core types for 10x10 variant chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] for move representation
//! - Board layout parsing and rendering

mod color;
mod layout;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use layout::{LayoutError, LayoutParser};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{Square, SquareParseError, BOARD_SIZE};
