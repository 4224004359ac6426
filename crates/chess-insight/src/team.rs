//! Per-side aggregation of an analyzed board.

use chess_core::{Color, Piece, Square};
use chess_rules::SideCastling;
use serde::Serialize;

use crate::board::{AnalyzedSquare, Board};
use crate::config::EvalConfig;
use crate::error::AnalysisError;
use crate::evaluation::{evaluate_piece, EvalContext};
use crate::phase::GamePhase;
use crate::tables::PositionTables;

/// Pawns of one side grouped by structural weakness or strength. A pawn
/// appears in every bucket whose flag it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PawnBuckets {
    pub isolated: Vec<Square>,
    pub doubled: Vec<Square>,
    pub passed: Vec<Square>,
    pub backward: Vec<Square>,
    pub blocked: Vec<Square>,
    pub hanging: Vec<Square>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Material {
    /// Pawn 1, knight 3, bishop 3, rook 5, queen 9, king 0.
    pub total_value: u32,
    /// Every piece including pawns and the king.
    pub piece_count: u32,
    pub pawn_count: u32,
    /// Rooks and queens.
    pub major_pieces: u32,
    /// Bishops and knights.
    pub minor_pieces: u32,
}

/// One side's pieces, referenced by square into the analyzed board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStructure {
    pub color: Color,
    pub phase: GamePhase,
    pub king: Option<Square>,
    pub queens: Vec<Square>,
    pub rooks: Vec<Square>,
    pub bishops: Vec<Square>,
    pub knights: Vec<Square>,
    pub pawns: Vec<Square>,
    pub pawn_structure: PawnBuckets,
    pub material: Material,
    pub total_mobility: usize,
    /// `total_mobility / piece_count`, or 0 with no pieces.
    pub average_mobility: f64,
}

impl TeamStructure {
    fn new(color: Color, phase: GamePhase) -> Self {
        TeamStructure {
            color,
            phase,
            king: None,
            queens: Vec::new(),
            rooks: Vec::new(),
            bishops: Vec::new(),
            knights: Vec::new(),
            pawns: Vec::new(),
            pawn_structure: PawnBuckets::default(),
            material: Material::default(),
            total_mobility: 0,
            average_mobility: 0.0,
        }
    }

    fn record(&mut self, cell: &AnalyzedSquare, piece: Piece) {
        let sq = cell.square;
        match piece {
            Piece::King => self.king = Some(sq),
            Piece::Queen => self.queens.push(sq),
            Piece::Rook => self.rooks.push(sq),
            Piece::Bishop => self.bishops.push(sq),
            Piece::Knight => self.knights.push(sq),
            Piece::Pawn => self.pawns.push(sq),
        }

        self.material.total_value += piece.material_value();
        self.material.piece_count += 1;
        match piece {
            Piece::Pawn => self.material.pawn_count += 1,
            Piece::Rook | Piece::Queen => self.material.major_pieces += 1,
            Piece::Bishop | Piece::Knight => self.material.minor_pieces += 1,
            Piece::King => {}
        }
        self.total_mobility += cell.mobility.total;

        if piece == Piece::Pawn {
            let flags = &cell.pawn_structure;
            let buckets = &mut self.pawn_structure;
            for (flag, bucket) in [
                (flags.isolated, &mut buckets.isolated),
                (flags.doubled, &mut buckets.doubled),
                (flags.passed, &mut buckets.passed),
                (flags.backward, &mut buckets.backward),
                (flags.blocked.is_blocked(), &mut buckets.blocked),
                (flags.hanging, &mut buckets.hanging),
            ] {
                if flag {
                    bucket.push(sq);
                }
            }
        }
    }

    fn finish(&mut self) {
        self.average_mobility = if self.material.piece_count == 0 {
            0.0
        } else {
            self.total_mobility as f64 / f64::from(self.material.piece_count)
        };
    }

    /// Every square holding a piece of this side: king, queens, rooks,
    /// bishops, knights, then pawns.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.king
            .iter()
            .chain(&self.queens)
            .chain(&self.rooks)
            .chain(&self.bishops)
            .chain(&self.knights)
            .chain(&self.pawns)
            .copied()
    }
}

/// Evaluates every piece on `board`, stores each evaluation on its square
/// and returns the white and black team structures.
pub fn build_teams(
    board: &mut Board,
    phase: GamePhase,
    config: &EvalConfig,
    tables: &PositionTables,
    castling: [SideCastling; 2],
) -> Result<[TeamStructure; 2], AnalysisError> {
    let evaluations = {
        let ctx = EvalContext {
            board: &*board,
            phase,
            config,
            tables,
            castling,
        };
        board
            .iter()
            .filter(|cell| cell.occupant.is_some())
            .map(|cell| evaluate_piece(&ctx, cell.square).map(|e| (cell.square, e)))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut teams = Color::BOTH.map(|color| TeamStructure::new(color, phase));
    for (sq, evaluation) in evaluations {
        let cell = &mut board[sq];
        cell.evaluation = Some(evaluation);
        if let Some(occupant) = cell.occupant {
            teams[occupant.color.index()].record(cell, occupant.piece);
        }
    }
    for team in &mut teams {
        team.finish();
    }
    Ok(teams)
}
