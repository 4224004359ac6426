//! Attack sets for every piece kind and per-square attacker enumeration.
//!
//! Leapers (knight, king, pawn) use tables built at compile time. Sliders
//! walk their rays against the current occupancy, so a blocker is attacked
//! but nothing behind it is.

use chess_core::{Color, Piece, Square};

use crate::{Bitboard, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const WHITE_PAWN_OFFSETS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_OFFSETS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_OFFSETS);
const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_OFFSETS);
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_OFFSETS),
    leaper_table(&BLACK_PAWN_OFFSETS),
];

/// Builds a per-square table of every on-board `(rank, file)` offset.
const fn leaper_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut index = 0u8;
    while index < 64 {
        let rank = (index / 8) as i8;
        let file = (index % 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            if let Some(target) = Square::from_coords(rank + offsets[i].0, file + offsets[i].1) {
                bits |= 1u64 << target.index();
            }
            i += 1;
        }
        table[index as usize] = Bitboard(bits);
        index += 1;
    }
    table
}

fn ray_attacks(sq: Square, occupied: Bitboard, rays: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in rays {
        let mut current = sq.offset(dr, df);
        while let Some(target) = current {
            attacks.set(target);
            if occupied.contains(target) {
                break;
            }
            current = target.offset(dr, df);
        }
    }
    attacks
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the squares a pawn of `color` standing on `sq` attacks.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Returns bishop attacks for a square given occupied squares.
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &DIAGONAL_RAYS)
}

/// Returns rook attacks for a square given occupied squares.
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &ORTHOGONAL_RAYS)
}

/// Returns queen attacks (bishop + rook).
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Every piece of color `by` that attacks `sq`, whatever stands on `sq`.
pub fn attackers_to(position: &Position, sq: Square, by: Color) -> Bitboard {
    let occupied = position.occupied();
    let queens = position.pieces_of(Piece::Queen, by);

    // A pawn of `by` attacks sq exactly when a pawn of the other color on
    // sq would attack the pawn's square.
    (pawn_attacks(sq, by.opposite()) & position.pieces_of(Piece::Pawn, by))
        | (knight_attacks(sq) & position.pieces_of(Piece::Knight, by))
        | (king_attacks(sq) & position.pieces_of(Piece::King, by))
        | (bishop_attacks(sq, occupied) & (position.pieces_of(Piece::Bishop, by) | queens))
        | (rook_attacks(sq, occupied) & (position.pieces_of(Piece::Rook, by) | queens))
}
