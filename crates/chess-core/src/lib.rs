//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules authority
//! and the position evaluator:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates and geometry
//! - FEN parsing with field padding for abbreviated notations

mod color;
mod fen;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use piece::Piece;
pub use square::{File, Rank, Square};
