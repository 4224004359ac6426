//! Structural predicates for individual pawns.
//!
//! Every predicate reads the board only. Ranks and files are 0-based with
//! rank 0 being the first rank.

use chess_core::{Color, Piece, Square};

use crate::board::{Blocked, Board, PawnStructure};

fn file_has_pawn(board: &Board, file: i8, color: Color) -> bool {
    (0..8).any(|rank| board.has_pawn(rank, file, color))
}

/// No friendly pawn on either adjacent file.
pub fn is_isolated(board: &Board, sq: Square, color: Color) -> bool {
    let file = sq.file().index() as i8;
    !file_has_pawn(board, file - 1, color) && !file_has_pawn(board, file + 1, color)
}

/// At least two friendly pawns share the file.
pub fn is_doubled(board: &Board, sq: Square, color: Color) -> bool {
    let file = sq.file().index() as i8;
    (0..8).filter(|&rank| board.has_pawn(rank, file, color)).count() >= 2
}

/// No enemy pawn ahead on this file or an adjacent one.
pub fn is_passed(board: &Board, sq: Square, color: Color) -> bool {
    let dir = color.pawn_direction();
    let file = sq.file().index() as i8;
    let enemy = color.opposite();

    let mut rank = sq.rank().index() as i8 + dir;
    while (0..8).contains(&rank) {
        if (file - 1..=file + 1).any(|f| board.has_pawn(rank, f, enemy)) {
            return false;
        }
        rank += dir;
    }
    true
}

/// A neighbouring-file pawn has moved past this one and none is left level
/// with or behind it to offer protection.
pub fn is_backward(board: &Board, sq: Square, color: Color) -> bool {
    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    let relative = |r: i8| match color {
        Color::White => r,
        Color::Black => 7 - r,
    };

    let own = relative(rank);
    let neighbours: Vec<i8> = [file - 1, file + 1]
        .into_iter()
        .flat_map(|f| (0..8).filter(move |&r| board.has_pawn(r, f, color)))
        .map(relative)
        .collect();

    let ahead = neighbours.iter().any(|&r| r > own);
    let can_protect = neighbours.iter().any(|&r| r <= own);
    ahead && !can_protect
}

/// What occupies the square directly in front of the pawn.
pub fn blocked(board: &Board, sq: Square, color: Color) -> Blocked {
    let Some(front) = sq.offset(color.pawn_direction(), 0) else {
        return Blocked::default();
    };
    match board.occupant(front) {
        Some(occupant) => Blocked {
            blocked_by: Some(front),
            permanently: occupant.piece == Piece::Pawn && occupant.color != color,
        },
        None => Blocked::default(),
    }
}

/// Hanging pawns: a side-by-side pair on central files with no friendly
/// pawns on the files either side of the pair and no enemy pawns on the
/// pair's files.
pub fn is_hanging(board: &Board, sq: Square, color: Color) -> bool {
    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    if !(2..=5).contains(&file) {
        return false;
    }

    let partner = if board.has_pawn(rank, file - 1, color) {
        file - 1
    } else if board.has_pawn(rank, file + 1, color) {
        file + 1
    } else {
        return false;
    };

    let (left, right) = (file.min(partner), file.max(partner));
    if file_has_pawn(board, left - 1, color) || file_has_pawn(board, right + 1, color) {
        return false;
    }

    let enemy = color.opposite();
    ![left, right].into_iter().any(|f| {
        (0..8)
            .filter(|&r| r != rank)
            .any(|r| board.has_pawn(r, f, enemy))
    })
}

/// All flags for the pawn of `color` on `sq`.
pub fn analyze_pawn(board: &Board, sq: Square, color: Color) -> PawnStructure {
    PawnStructure {
        is_pawn: true,
        isolated: is_isolated(board, sq, color),
        doubled: is_doubled(board, sq, color),
        passed: is_passed(board, sq, color),
        backward: is_backward(board, sq, color),
        hanging: is_hanging(board, sq, color),
        blocked: blocked(board, sq, color),
    }
}

/// Fills the pawn-structure record of every pawn on the board.
pub fn resolve_pawn_structure(board: &mut Board) {
    let pawns: Vec<(Square, Color)> = board
        .iter()
        .filter_map(|cell| match cell.occupant {
            Some(o) if o.piece == Piece::Pawn => Some((cell.square, o.color)),
            _ => None,
        })
        .collect();

    for (sq, color) in pawns {
        let structure = analyze_pawn(board, sq, color);
        board[sq].pawn_structure = structure;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::Position;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn resolved(fen: &str) -> Board {
        let mut board = Board::from_position(&Position::from_fen(fen).unwrap());
        resolve_pawn_structure(&mut board);
        board
    }

    #[test]
    fn lone_pawn_is_isolated() {
        let board = resolved("4k3/8/8/8/3P4/8/PP6/4K3 w - - 0 1");
        assert!(board[sq("d4")].pawn_structure.isolated);
        assert!(!board[sq("a2")].pawn_structure.isolated);
        assert!(!board[sq("b2")].pawn_structure.isolated);
    }

    #[test]
    fn doubled_pawns_flag_both() {
        let board = resolved("4k3/8/8/8/2P5/2P5/3P4/4K3 w - - 0 1");
        assert!(board[sq("c4")].pawn_structure.doubled);
        assert!(board[sq("c3")].pawn_structure.doubled);
        assert!(!board[sq("d2")].pawn_structure.doubled);
    }

    #[test]
    fn passed_pawn_ignores_pawns_behind() {
        // b5 and c6 stop each other; h3 is already behind g4.
        let board = resolved("4k3/8/2p5/1P6/6P1/7p/8/4K3 w - - 0 1");
        assert!(!board[sq("b5")].pawn_structure.passed);
        assert!(!board[sq("c6")].pawn_structure.passed);
        assert!(board[sq("g4")].pawn_structure.passed);
        assert!(board[sq("h3")].pawn_structure.passed);
    }

    #[test]
    fn backward_pawn() {
        // d3 trails c4 and e4 with no friendly pawn level or behind.
        let board = resolved("4k3/8/8/8/2P1P3/3P4/8/4K3 w - - 0 1");
        assert!(board[sq("d3")].pawn_structure.backward);
        assert!(!board[sq("c4")].pawn_structure.backward);
        assert!(!board[sq("e4")].pawn_structure.backward);

        // A pawn on c2 can still come up to protect d3.
        let board = resolved("4k3/8/8/8/4P3/3P4/2P5/4K3 w - - 0 1");
        assert!(!board[sq("d3")].pawn_structure.backward);
    }

    #[test]
    fn backward_for_black_mirrors_direction() {
        let board = resolved("4k3/8/3p4/2p1p3/8/8/8/4K3 b - - 0 1");
        assert!(board[sq("d6")].pawn_structure.backward);
        assert!(!board[sq("c5")].pawn_structure.backward);
    }

    #[test]
    fn blocked_by_pawn_is_permanent() {
        let board = resolved("4k3/8/8/4p3/4P3/8/3P4/3NK3 w - - 0 1");
        let e4 = board[sq("e4")].pawn_structure.blocked;
        assert_eq!(e4.blocked_by, Some(sq("e5")));
        assert!(e4.permanently);
        let e5 = board[sq("e5")].pawn_structure.blocked;
        assert_eq!(e5.blocked_by, Some(sq("e4")));
        assert!(e5.permanently);
        assert!(!board[sq("d2")].pawn_structure.blocked.is_blocked());

        let board = resolved("4k3/8/8/8/8/3N4/3P4/4K3 w - - 0 1");
        let d2 = board[sq("d2")].pawn_structure.blocked;
        assert_eq!(d2.blocked_by, Some(sq("d3")));
        assert!(!d2.permanently);
    }

    #[test]
    fn hanging_pair() {
        let board = resolved("4k3/pp4pp/8/8/2PP4/8/6PP/4K3 w - - 0 1");
        assert!(board[sq("c4")].pawn_structure.hanging);
        assert!(board[sq("d4")].pawn_structure.hanging);
        assert!(!board[sq("g2")].pawn_structure.hanging);

        // A friendly pawn on the e-file supports the pair.
        let board = resolved("4k3/8/8/8/2PP4/4P3/8/4K3 w - - 0 1");
        assert!(!board[sq("c4")].pawn_structure.hanging);

        // An enemy pawn on the d-file breaks it.
        let board = resolved("4k3/3p4/8/8/2PP4/8/8/4K3 w - - 0 1");
        assert!(!board[sq("c4")].pawn_structure.hanging);
    }

    #[test]
    fn non_pawns_carry_no_flags() {
        let board = resolved("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(board.iter().all(|cell| cell.pawn_structure == PawnStructure::default()));
    }
}
