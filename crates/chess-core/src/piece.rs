//! Piece kinds and their fixed values.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Kind of a piece, independent of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Lowercase FEN letters, in `Piece` order.
const LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

const NAMES: [&str; 6] = ["Pawn", "Knight", "Bishop", "Rook", "Queen", "King"];

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material in pawn units: 1, 3, 3, 5, 9, and 0 for the king.
    #[inline]
    pub const fn material_value(self) -> u32 {
        [1, 3, 3, 5, 9, 0][self.index()]
    }

    /// Non-pawn material, the quantity the game phase is measured in.
    #[inline]
    pub const fn phase_material(self) -> u32 {
        match self {
            Piece::Pawn => 0,
            other => other.material_value(),
        }
    }

    /// FEN letter: uppercase for White.
    pub const fn to_fen_char(self, color: Color) -> char {
        let letter = LETTERS[self.index()];
        match color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let lower = c.to_ascii_lowercase();
        let mut i = 0;
        while i < LETTERS.len() {
            if LETTERS[i] == lower {
                return Some((Self::ALL[i], color));
            }
            i += 1;
        }
        None
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(NAMES[self.index()])
    }
}
