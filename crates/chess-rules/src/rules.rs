//! The rules authority boundary.
//!
//! The evaluator never inspects chess rules directly. It asks a
//! [`RulesAuthority`] to parse a position, to list the attackers of a square
//! and to report castling rights, and trusts the answers.

use chess_core::{Color, Square};

use crate::{attackers_to, Bitboard, Position, PositionError};

/// Castling rights of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideCastling {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideCastling {
    /// Number of rights still held (0, 1 or 2).
    pub const fn count(self) -> u8 {
        self.kingside as u8 + self.queenside as u8
    }
}

/// Answers the rule questions static analysis depends on.
///
/// # Example
///
/// ```
/// use chess_core::Color;
/// use chess_rules::{RulesAuthority, StandardChess};
///
/// let position = StandardChess.parse_position("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
/// let rights = StandardChess.castling_rights(&position, Color::White);
/// assert!(rights.queenside && !rights.kingside);
/// ```
pub trait RulesAuthority {
    /// Parses a position notation into a legal position.
    fn parse_position(&self, notation: &str) -> Result<Position, PositionError>;

    /// Every piece of color `by` attacking `sq`.
    fn attackers(&self, position: &Position, sq: Square, by: Color) -> Bitboard;

    /// The castling rights `color` still holds.
    fn castling_rights(&self, position: &Position, color: Color) -> SideCastling;
}

/// Standard chess rules (FIDE) with FEN as the position notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RulesAuthority for StandardChess {
    fn parse_position(&self, notation: &str) -> Result<Position, PositionError> {
        Position::from_fen(notation)
    }

    fn attackers(&self, position: &Position, sq: Square, by: Color) -> Bitboard {
        attackers_to(position, sq, by)
    }

    fn castling_rights(&self, position: &Position, color: Color) -> SideCastling {
        SideCastling {
            kingside: position.castling.can_castle_kingside(color),
            queenside: position.castling.can_castle_queenside(color),
        }
    }
}
