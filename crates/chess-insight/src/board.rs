//! The analyzed board: 64 square records, each filled in stage by stage.

use std::ops::{Index, IndexMut};

use chess_core::{Color, Piece, Square};
use chess_rules::Position;
use serde::{Serialize, Serializer};

use crate::evaluation::PieceEvaluation;

/// Version tag written into every square record once analysis completes.
pub const ANALYSIS_VERSION: &str = "1.0";

/// The piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub piece: Piece,
    pub color: Color,
}

/// Pseudo-moves available from a square, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mobility {
    /// Quiet moves onto empty squares.
    pub moves: Vec<Square>,
    /// Captures of enemy pieces other than the king.
    pub captures: Vec<Square>,
    /// Squares holding the enemy king.
    pub checks: Vec<Square>,
    pub total: usize,
}

impl Mobility {
    pub(crate) fn finish(&mut self) {
        self.total = self.moves.len() + self.captures.len() + self.checks.len();
    }
}

/// Static geometry of a square, independent of the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    /// d4, e4, d5, e5.
    pub center: bool,
    /// The 4x4 block c3..f6.
    pub extended_center: bool,
    pub edge: bool,
    pub corner: bool,
    pub dark: bool,
    /// Euclidean distance from the middle of the board.
    pub distance_from_center: f64,
}

impl Geometry {
    pub fn of(sq: Square) -> Self {
        let rank = sq.rank().index();
        let file = sq.file().index();
        let edge_rank = rank == 0 || rank == 7;
        let edge_file = file == 0 || file == 7;
        let dr = rank as f64 - 3.5;
        let df = file as f64 - 3.5;

        Geometry {
            center: (3..=4).contains(&rank) && (3..=4).contains(&file),
            extended_center: (2..=5).contains(&rank) && (2..=5).contains(&file),
            edge: edge_rank || edge_file,
            corner: edge_rank && edge_file,
            dark: sq.is_dark(),
            distance_from_center: (dr * dr + df * df).sqrt(),
        }
    }
}

/// What stands directly in front of a pawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Blocked {
    pub blocked_by: Option<Square>,
    /// The blocker is an enemy pawn, so neither side can ever advance.
    pub permanently: bool,
}

impl Blocked {
    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }
}

/// Pawn-structure flags. All false on squares without a pawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PawnStructure {
    pub is_pawn: bool,
    pub isolated: bool,
    pub doubled: bool,
    pub passed: bool,
    pub backward: bool,
    pub hanging: bool,
    pub blocked: Blocked,
}

/// Tactical threat markers. Reserved: never set by the analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Threats {
    pub hanging: bool,
    pub pinned: bool,
    pub fork: bool,
    pub skewer: bool,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareMetadata {
    pub analysis_version: &'static str,
    pub calculated: bool,
}

impl Default for SquareMetadata {
    fn default() -> Self {
        SquareMetadata {
            analysis_version: ANALYSIS_VERSION,
            calculated: false,
        }
    }
}

/// Everything the analysis knows about one square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedSquare {
    pub square: Square,
    pub rank: u8,
    pub file: u8,
    pub occupant: Option<Occupant>,
    /// Enemy controllers of an occupied square; Black's controllers of an
    /// empty one.
    pub attackers: Vec<Square>,
    /// Friendly controllers of an occupied square; White's controllers of an
    /// empty one.
    pub defenders: Vec<Square>,
    pub mobility: Mobility,
    pub geometry: Geometry,
    pub pawn_structure: PawnStructure,
    pub threats: Threats,
    pub evaluation: Option<PieceEvaluation>,
    pub metadata: SquareMetadata,
}

impl AnalyzedSquare {
    fn new(square: Square) -> Self {
        AnalyzedSquare {
            square,
            rank: square.rank().index(),
            file: square.file().index(),
            occupant: None,
            attackers: Vec::new(),
            defenders: Vec::new(),
            mobility: Mobility::default(),
            geometry: Geometry::of(square),
            pawn_structure: PawnStructure::default(),
            threats: Threats::default(),
            evaluation: None,
            metadata: SquareMetadata::default(),
        }
    }

    /// True when a piece of this kind and color stands here.
    pub fn holds(&self, piece: Piece, color: Color) -> bool {
        self.occupant == Some(Occupant { piece, color })
    }
}

/// The 8x8 grid of analyzed squares, first rank first.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    squares: Vec<AnalyzedSquare>,
}

impl Board {
    /// A board with geometry filled in and no pieces.
    pub fn empty() -> Self {
        Board {
            squares: Square::all().map(AnalyzedSquare::new).collect(),
        }
    }

    /// Seeds a board with the occupants of `position`.
    pub fn from_position(position: &Position) -> Self {
        let mut board = Board::empty();
        for cell in &mut board.squares {
            cell.occupant = position
                .piece_at(cell.square)
                .map(|(piece, color)| Occupant { piece, color });
        }
        board
    }

    /// Puts a piece on a square, replacing whatever was there.
    pub fn place(&mut self, sq: Square, piece: Piece, color: Color) {
        self[sq].occupant = Some(Occupant { piece, color });
    }

    pub fn occupant(&self, sq: Square) -> Option<Occupant> {
        self[sq].occupant
    }

    /// True when a pawn of `color` stands on the given coordinates.
    pub fn has_pawn(&self, rank: i8, file: i8, color: Color) -> bool {
        Square::from_coords(rank, file).is_some_and(|sq| self[sq].holds(Piece::Pawn, color))
    }

    /// Squares of every piece of the given kind and color, a1 first.
    pub fn pieces(&self, piece: Piece, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.squares
            .iter()
            .filter(move |cell| cell.holds(piece, color))
            .map(|cell| cell.square)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalyzedSquare> {
        self.squares.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AnalyzedSquare> {
        self.squares.iter_mut()
    }

    /// The rows of the board, rank 1 first.
    pub fn rows(&self) -> impl Iterator<Item = &[AnalyzedSquare]> {
        self.squares.chunks(8)
    }
}

impl Index<Square> for Board {
    type Output = AnalyzedSquare;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.index() as usize]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.squares[sq.index() as usize]
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenParser;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn geometry_flags() {
        let e4 = Geometry::of(sq("e4"));
        assert!(e4.center && e4.extended_center);
        assert!(!e4.edge && !e4.corner && !e4.dark);
        assert!((e4.distance_from_center - 0.5f64.sqrt()).abs() < 1e-12);

        let c6 = Geometry::of(sq("c6"));
        assert!(!c6.center && c6.extended_center);

        let a1 = Geometry::of(Square::A1);
        assert!(a1.edge && a1.corner && a1.dark);
        assert!((a1.distance_from_center - (2.0 * 3.5f64 * 3.5).sqrt()).abs() < 1e-12);

        let h4 = Geometry::of(sq("h4"));
        assert!(h4.edge && !h4.corner);
    }

    #[test]
    fn center_has_four_squares() {
        let board = Board::empty();
        assert_eq!(board.iter().filter(|s| s.geometry.center).count(), 4);
        assert_eq!(board.iter().filter(|s| s.geometry.extended_center).count(), 16);
        assert_eq!(board.iter().filter(|s| s.geometry.edge).count(), 28);
        assert_eq!(board.iter().filter(|s| s.geometry.dark).count(), 32);
    }

    #[test]
    fn seeded_from_position() {
        let position = Position::from_fen(FenParser::STARTPOS).unwrap();
        let board = Board::from_position(&position);
        assert_eq!(
            board.occupant(Square::E1),
            Some(Occupant {
                piece: Piece::King,
                color: Color::White
            })
        );
        assert_eq!(board.occupant(sq("e4")), None);
        assert_eq!(board.iter().filter(|s| s.occupant.is_some()).count(), 32);
        assert_eq!(board.pieces(Piece::Knight, Color::Black).collect::<Vec<_>>(), vec![sq("b8"), sq("g8")]);
        assert!(board.has_pawn(1, 4, Color::White));
        assert!(!board.has_pawn(1, 8, Color::White));
    }

    #[test]
    fn square_coordinates() {
        let board = Board::empty();
        let cell = &board[sq("c7")];
        assert_eq!((cell.rank, cell.file), (6, 2));
        assert_eq!(cell.metadata.analysis_version, "1.0");
        assert!(!cell.metadata.calculated);
        assert_eq!(board.rows().count(), 8);
    }
}
