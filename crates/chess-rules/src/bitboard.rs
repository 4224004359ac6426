//! 64-bit square sets.
//!
//! Attack queries answer with a [`Bitboard`] so callers can count or walk the
//! attackers without allocating.

use chess_core::Square;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of squares, one bit per square with a1 as bit 0 and h8 as bit 63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Ranks 1 and 8.
    pub const BACK_RANKS: Bitboard = Bitboard(0xFF00_0000_0000_00FF);

    #[inline]
    const fn bit(sq: Square) -> u64 {
        1u64 << sq.index()
    }

    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(Self::bit(sq))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Population count.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & Self::bit(sq) != 0
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= Self::bit(sq);
    }

    /// Removes the lowest member and returns it.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let bits = self.0;
        if bits == 0 {
            return None;
        }
        self.0 = bits & (bits - 1);
        Square::from_index(bits.trailing_zeros() as u8)
    }

    /// Members in ascending square order.
    pub fn squares(self) -> Vec<Square> {
        self.into_iter().collect()
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Walks a [`Bitboard`] from a1 towards h8.
pub struct Members(Bitboard);

impl Iterator for Members {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Members {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Members;

    #[inline]
    fn into_iter(self) -> Members {
        Members(self)
    }
}
