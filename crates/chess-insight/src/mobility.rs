//! Pseudo-move generation per occupied square.
//!
//! Moves are not filtered for legality: a piece pinned to its king still
//! counts every square it could reach. En passant and promotion are not
//! modelled.

use chess_core::{Color, Piece, Square};

use crate::board::{Board, Mobility};

/// How a piece kind moves.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Each offset tried once.
    Single(&'static [(i8, i8)]),
    /// Each direction walked until the edge or a piece.
    Sliding(&'static [(i8, i8)]),
    /// Advances and diagonal captures.
    Pawn,
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl Pattern {
    pub const fn for_piece(piece: Piece) -> Pattern {
        match piece {
            Piece::Pawn => Pattern::Pawn,
            Piece::Knight => Pattern::Single(&KNIGHT_OFFSETS),
            Piece::Bishop => Pattern::Sliding(&DIAGONALS),
            Piece::Rook => Pattern::Sliding(&ORTHOGONALS),
            Piece::Queen => Pattern::Sliding(&ALL_DIRECTIONS),
            Piece::King => Pattern::Single(&KING_OFFSETS),
        }
    }
}

/// Records `target` in the right list. Returns true when a slide must stop.
fn categorize(board: &Board, target: Square, color: Color, mobility: &mut Mobility) -> bool {
    match board.occupant(target) {
        None => {
            mobility.moves.push(target);
            false
        }
        Some(occupant) if occupant.color != color => {
            if occupant.piece == Piece::King {
                mobility.checks.push(target);
            } else {
                mobility.captures.push(target);
            }
            true
        }
        Some(_) => true,
    }
}

fn pawn_mobility(board: &Board, from: Square, color: Color, mobility: &mut Mobility) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|sq| board.occupant(*sq).is_none()) {
        mobility.moves.push(one);
        if from.rank() == color.pawn_rank() {
            if let Some(two) = from.offset(2 * dir, 0).filter(|sq| board.occupant(*sq).is_none()) {
                mobility.moves.push(two);
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = from.offset(dir, df) else {
            continue;
        };
        match board.occupant(target) {
            Some(occupant) if occupant.color != color => {
                if occupant.piece == Piece::King {
                    mobility.checks.push(target);
                } else {
                    mobility.captures.push(target);
                }
            }
            _ => {}
        }
    }
}

/// Pseudo-moves for a `piece` of `color` standing on `from`.
pub fn piece_mobility(board: &Board, from: Square, piece: Piece, color: Color) -> Mobility {
    let mut mobility = Mobility::default();

    match Pattern::for_piece(piece) {
        Pattern::Pawn => pawn_mobility(board, from, color, &mut mobility),
        Pattern::Single(offsets) => {
            for &(dr, df) in offsets {
                if let Some(target) = from.offset(dr, df) {
                    categorize(board, target, color, &mut mobility);
                }
            }
        }
        Pattern::Sliding(directions) => {
            for &(dr, df) in directions {
                let mut current = from.offset(dr, df);
                while let Some(target) = current {
                    if categorize(board, target, color, &mut mobility) {
                        break;
                    }
                    current = target.offset(dr, df);
                }
            }
        }
    }

    mobility.finish();
    mobility
}

/// Fills the mobility record of every occupied square.
pub fn resolve_mobility(board: &mut Board) {
    let occupied: Vec<_> = board
        .iter()
        .filter_map(|cell| cell.occupant.map(|o| (cell.square, o)))
        .collect();

    for (sq, occupant) in occupied {
        let mobility = piece_mobility(board, sq, occupant.piece, occupant.color);
        board[sq].mobility = mobility;
    }
}
