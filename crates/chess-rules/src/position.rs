//! Position representation and legality checks.

use chess_core::{Color, FenError, FenParser, Piece, Square};
use thiserror::Error;

use crate::Bitboard;

/// Errors raised when a notation does not describe a usable position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    TooManyKings(Color),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("en passant square {0} does not match the side to move")]
    EnPassantRank(Square),
}

/// Which castles each side is still entitled to, as declared by the FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    kingside: [bool; 2],
    queenside: [bool; 2],
}

impl CastlingRights {
    /// Reads the castling field of a FEN string ("KQkq", "Kq", "-").
    /// Unknown characters are ignored.
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = CastlingRights::default();
        for c in field.chars() {
            match c {
                'K' => rights.kingside[Color::White.index()] = true,
                'Q' => rights.queenside[Color::White.index()] = true,
                'k' => rights.kingside[Color::Black.index()] = true,
                'q' => rights.queenside[Color::Black.index()] = true,
                _ => {}
            }
        }
        rights
    }

    #[inline]
    pub fn can_castle_kingside(self, color: Color) -> bool {
        self.kingside[color.index()]
    }

    #[inline]
    pub fn can_castle_queenside(self, color: Color) -> bool {
        self.queenside[color.index()]
    }

    /// True when `color` keeps at least one castle.
    #[inline]
    pub fn any(self, color: Color) -> bool {
        self.can_castle_kingside(color) || self.can_castle_queenside(color)
    }
}

/// A parsed and validated position.
///
/// Clocks are accepted by the parser but not kept: nothing downstream reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// One set per piece kind, both colors mixed; index with `Piece::index`.
    pub pieces: [Bitboard; 6],
    /// One set per color; index with `Color::index`.
    pub colors: [Bitboard; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
}

impl Position {
    /// Parses a FEN string and checks that the result is a playable position.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = FenParser::parse(fen)?;

        let mut pieces = [Bitboard::EMPTY; 6];
        let mut colors = [Bitboard::EMPTY; 2];
        for &(sq, piece, color) in &parsed.placement {
            pieces[piece.index()].set(sq);
            colors[color.index()].set(sq);
        }

        let position = Position {
            pieces,
            colors,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen_field(&parsed.castling),
            en_passant: parsed.en_passant,
        };
        position.validate()?;
        Ok(position)
    }

    fn validate(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            match self.pieces_of(Piece::King, color).count() {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::TooManyKings(color)),
            }
        }

        let misplaced = self.pieces[Piece::Pawn.index()] & Bitboard::BACK_RANKS;
        if let Some(sq) = misplaced.into_iter().next() {
            return Err(PositionError::PawnOnBackRank(sq));
        }

        if let Some(ep) = self.en_passant {
            // The target sits behind a pawn the opponent just pushed two squares.
            let mover = self.side_to_move.opposite();
            let expected = mover.pawn_rank().index() as i8 + mover.pawn_direction();
            if ep.rank().index() as i8 != expected {
                return Err(PositionError::EnPassantRank(ep));
            }
        }

        Ok(())
    }

    /// The piece and color standing on `sq`.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = Color::BOTH
            .into_iter()
            .find(|color| self.colors[color.index()].contains(sq))?;
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
            .map(|piece| (piece, color))
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    /// The square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn start_position_layout() {
        let pos = Position::from_fen(FenParser::STARTPOS).unwrap();
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.side_to_move, Color::White);
        for color in Color::BOTH {
            assert!(pos.castling.can_castle_kingside(color));
            assert!(pos.castling.can_castle_queenside(color));
            assert_eq!(pos.pieces_of(Piece::Pawn, color).count(), 8);
        }
    }

    #[test]
    fn abbreviated_fen_gets_default_tail() {
        let short = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap();
        let full = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(short, full);
        assert!(!short.castling.any(Color::White));
    }

    #[test]
    fn piece_at() {
        let pos = Position::from_fen(FenParser::STARTPOS).unwrap();
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(sq("d8")), Some((Piece::Queen, Color::Black)));
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn castling_field() {
        let rights = CastlingRights::from_fen_field("Kq");
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
        assert_eq!(CastlingRights::from_fen_field("-"), CastlingRights::default());
    }

    #[test]
    fn king_count_is_checked() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::MissingKing(Color::Black))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(PositionError::MissingKing(Color::White))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(PositionError::TooManyKings(Color::White))
        );
    }

    #[test]
    fn pawns_on_back_rank_are_rejected() {
        assert_eq!(
            Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank(Square::A8))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2p b - - 0 1"),
            Err(PositionError::PawnOnBackRank(Square::H1))
        );
    }

    #[test]
    fn en_passant_must_match_side_to_move() {
        let ok = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert_eq!(ok.en_passant, Some(sq("d6")));
        assert!(Position::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").is_ok());

        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - d6 0 1"),
            Err(PositionError::EnPassantRank(sq("d6")))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - d3 0 1"),
            Err(PositionError::EnPassantRank(sq("d3")))
        );
    }

    #[test]
    fn structural_errors_are_wrapped() {
        assert!(matches!(
            Position::from_fen("not a fen"),
            Err(PositionError::Fen(FenError::InvalidPiecePlacement(_)))
        ));
    }
}
