//! Rules authority for single-position analysis.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets
//! - [`Position`] - piece placement, side to move, castling rights, en passant
//! - [`attackers_to`] and the per-piece attack functions
//! - [`RulesAuthority`] - the boundary the evaluator talks to, with
//!   [`StandardChess`] as the default implementation
//!
//! The authority answers three questions: what position a notation
//! describes, which pieces of a color attack a square, and which castling
//! rights a side still holds. It never generates or plays moves.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_rules::{RulesAuthority, StandardChess};
//!
//! let position = StandardChess
//!     .parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
//!     .unwrap();
//! let e3 = Square::from_algebraic("e3").unwrap();
//! assert_eq!(StandardChess.attackers(&position, e3, Color::White).count(), 2);
//! ```

mod attacks;
mod bitboard;
mod position;
mod rules;

pub use attacks::{
    attackers_to, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks,
};
pub use bitboard::Bitboard;
pub use position::{CastlingRights, Position, PositionError};
pub use rules::{RulesAuthority, SideCastling, StandardChess};
