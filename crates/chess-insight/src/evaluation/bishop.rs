use chess_core::{Color, Square};

use super::{EvalContext, Metric};
use crate::board::Board;
use crate::weights::Criterion;

const RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn on_long_diagonal(sq: Square) -> bool {
    let (rank, file) = (sq.rank().index(), sq.file().index());
    rank == file || rank + file == 7
}

/// Long-diagonal bonus plus reach along all four diagonals. A ray counts
/// every square up to and including its first piece, and half a point more
/// when that piece is an enemy.
pub(super) fn diagonal_score(board: &Board, sq: Square, color: Color) -> f64 {
    let mut score: f64 = if on_long_diagonal(sq) { 1.0 } else { 0.0 };

    let mut reach: f64 = 0.0;
    for (dr, df) in RAYS {
        let mut current = sq.offset(dr, df);
        while let Some(target) = current {
            reach += 1.0;
            if let Some(occupant) = board.occupant(target) {
                if occupant.color != color {
                    reach += 0.5;
                }
                break;
            }
            current = target.offset(dr, df);
        }
    }

    score += (reach / 15.0).min(1.5);
    score.min(Criterion::Diagonals.max())
}

pub(super) fn metrics(ctx: &EvalContext<'_>, sq: Square, color: Color) -> Vec<Metric> {
    vec![
        Metric::computed(Criterion::Diagonals, diagonal_score(ctx.board, sq, color)),
        Metric::placeholder(Criterion::Tactics),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::MetricSource;
    use super::*;

    #[test]
    fn long_diagonals() {
        assert!(on_long_diagonal(Square::A1));
        assert!(on_long_diagonal(Square::H8));
        assert!(on_long_diagonal(Square::H1));
        assert!(on_long_diagonal(sq("d5")));
        assert!(!on_long_diagonal(Square::C1));
    }

    #[test]
    fn home_bishop_is_boxed_in() {
        let fixture = Fixture::new(chess_core::FenParser::STARTPOS);
        // b2 and d2 are its only reach.
        let score = diagonal_score(&fixture.board, Square::C1, Color::White);
        assert!((score - 2.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn open_long_diagonal_caps() {
        // Bishop on d4 of an otherwise empty long diagonal: 13 squares of
        // reach, plus the long-diagonal bonus.
        let fixture = Fixture::new("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1");
        let score = diagonal_score(&fixture.board, sq("d4"), Color::White);
        assert!((score - (1.0 + 13.0 / 15.0)).abs() < 1e-12);
    }

    #[test]
    fn enemy_blockers_add_half_a_square() {
        // c1 bishop sees d2 and stops on an enemy pawn at e3; b2 then a3.
        let fixture = Fixture::new("4k3/8/8/8/8/4p3/8/2B1K3 w - - 0 1");
        let score = diagonal_score(&fixture.board, Square::C1, Color::White);
        assert!((score - 4.5 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn tactics_is_a_placeholder() {
        let fixture = Fixture::new("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1");
        let metrics = metrics(&fixture.ctx(), sq("d4"), Color::White);
        let tactics = metrics.iter().find(|m| m.criterion == Criterion::Tactics).unwrap();
        assert_eq!(tactics.source, MetricSource::Placeholder);
        assert_eq!(tactics.raw, Metric::PLACEHOLDER_VALUE);
    }
}
