use chess_core::{Color, File, Piece, Square};
use chess_rules::SideCastling;
use tracing::trace;

use super::{EvalContext, Metric};
use crate::board::Board;
use crate::phase::GamePhase;
use crate::weights::Criterion;

fn centralization(sq: Square) -> f64 {
    let rank = f64::from(sq.rank().index());
    let file = f64::from(sq.file().index());
    let distance = (rank - 3.5).abs().max((file - 3.5).abs());
    (3.5 - distance) / 3.5
}

fn pawn_proximity(board: &Board, sq: Square, color: Color) -> f64 {
    board
        .pieces(Piece::Pawn, color.opposite())
        .map(|pawn| match sq.chebyshev_distance(pawn) {
            1 => 0.4,
            2 => 0.2,
            3 => 0.1,
            _ => 0.0,
        })
        .sum()
}

/// How much the king takes part in the game: closeness to the centre, room
/// to step, and nearness to enemy pawns (weighted up in the endgame).
pub(super) fn activity_score(board: &Board, sq: Square, color: Color, phase: GamePhase) -> f64 {
    let quiet = board[sq].mobility.moves.len() as f64;
    let mobility = (quiet / 8.0 * 0.8).min(0.8);
    let weight = if phase.is_endgame() { 1.0 } else { 0.3 };
    let proximity = (pawn_proximity(board, sq, color) * weight).min(0.7);

    (centralization(sq) + mobility + proximity).min(Criterion::Activity.max())
}

fn pawn_shield(board: &Board, sq: Square, color: Color) -> f64 {
    let rank = sq.rank().index() as i8 + color.pawn_direction();
    let file = sq.file().index() as i8;
    let pawns = (file - 1..=file + 1)
        .filter(|&f| board.has_pawn(rank, f, color))
        .count();
    (pawns as f64 * 0.15).min(0.5)
}

/// Castling progress: castled with a pawn shield is best, an unmoved king
/// keeping its rights next, a wandering king without rights worst.
pub(super) fn castling_score(
    board: &Board,
    sq: Square,
    color: Color,
    phase: GamePhase,
    rights: SideCastling,
) -> f64 {
    if phase.is_endgame() {
        return 0.0;
    }

    let on_back_rank = sq.rank() == color.back_rank();
    let file = sq.file();
    let score = if on_back_rank && file == File::E {
        match rights.count() {
            2 => 1.8,
            1 => 1.2,
            _ => 0.3,
        }
    } else if on_back_rank && (file == File::G || file == File::C) {
        2.0 + pawn_shield(board, sq, color)
    } else if rights.count() == 0 {
        0.2
    } else {
        0.8
    };

    trace!(
        square = %sq,
        color = %color,
        kingside = rights.kingside,
        queenside = rights.queenside,
        score,
        "king castling"
    );
    score.clamp(0.0, Criterion::Castling.max())
}

pub(super) fn metrics(ctx: &EvalContext<'_>, sq: Square, color: Color) -> Vec<Metric> {
    let rights = ctx.castling[color.index()];
    vec![
        Metric::computed(
            Criterion::Activity,
            activity_score(ctx.board, sq, color, ctx.phase),
        ),
        Metric::computed(
            Criterion::Castling,
            castling_score(ctx.board, sq, color, ctx.phase, rights),
        ),
    ]
}
