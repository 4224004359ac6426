use chess_core::{Color, Square};

use super::{EvalContext, Metric};
use crate::board::Board;
use crate::weights::Criterion;

fn in_enemy_half(sq: Square, color: Color) -> bool {
    let rank = sq.rank().index();
    match color {
        Color::White => rank >= 3,
        Color::Black => rank <= 4,
    }
}

/// Outpost quality: how far forward the knight stands and whether enemy
/// pawns can ever chase it away.
pub(super) fn outpost_score(board: &Board, sq: Square, color: Color) -> f64 {
    if !in_enemy_half(sq, color) {
        return 0.0;
    }

    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    let dir = color.pawn_direction();
    let protected = [file - 1, file + 1]
        .into_iter()
        .any(|f| board.has_pawn(rank - dir, f, color));
    let attackable = [file - 1, file + 1]
        .into_iter()
        .any(|f| board.has_pawn(rank + dir, f, color.opposite()));

    match (protected, attackable) {
        (true, false) => 2.5,
        (true, true) | (false, false) => 1.5,
        (false, true) => 0.5,
    }
}

pub(super) fn metrics(ctx: &EvalContext<'_>, sq: Square, color: Color) -> Vec<Metric> {
    vec![Metric::computed(
        Criterion::Tactics,
        outpost_score(ctx.board, sq, color),
    )]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn outpost(fen: &str, square: &str, color: Color) -> f64 {
        let fixture = Fixture::new(fen);
        outpost_score(&fixture.board, sq(square), color)
    }

    #[test]
    fn home_knight_has_no_outpost() {
        assert_eq!(outpost("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", "b1", Color::White), 0.0);
    }

    #[test]
    fn protected_and_safe_outpost() {
        assert_eq!(outpost("4k3/8/8/3N4/4P3/8/8/4K3 w - - 0 1", "d5", Color::White), 2.5);
    }

    #[test]
    fn attackable_outpost_scores_lower() {
        // Protected by e4, hit by c6.
        assert_eq!(outpost("4k3/8/2p5/3N4/4P3/8/8/4K3 w - - 0 1", "d5", Color::White), 1.5);
        // Unprotected and unchallenged.
        assert_eq!(outpost("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1", "d5", Color::White), 1.5);
        // Unprotected and challenged.
        assert_eq!(outpost("4k3/8/4p3/3N4/8/8/8/4K3 w - - 0 1", "d5", Color::White), 0.5);
    }

    #[test]
    fn black_outpost_mirrors() {
        // Knight on e4 protected by d5, no white pawn on d3 or f3.
        assert_eq!(outpost("4k3/8/8/3p4/4n3/8/8/4K3 b - - 0 1", "e4", Color::Black), 2.5);
        assert_eq!(outpost("4k3/8/8/3p4/4n3/5P2/8/4K3 b - - 0 1", "e4", Color::Black), 1.5);
        // Rank six is still Black's own half.
        assert_eq!(outpost("4k3/8/4n3/8/8/8/8/4K3 b - - 0 1", "e6", Color::Black), 0.0);
    }
}
