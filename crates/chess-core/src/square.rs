//! Board coordinates.

use std::fmt;

use serde::{Serialize, Serializer};

/// Column, a through h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

/// Row, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Reads `a`..`h`, either case.
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Some(Self::ALL[(c as u8 - b'a') as usize]),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.index()) as char
    }
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::ALL[(c as u8 - b'1') as usize]),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self.index()) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One of the 64 squares, numbered rank by rank from a1 (0) to h8 (63).
///
/// Ordering follows that numbering, so sorted square lists read a1, b1, ..., h8.
/// Serializes as its algebraic name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const E1: Square = Square(4);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const E8: Square = Square(60);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Signed coordinates, `None` off the board.
    #[inline]
    pub const fn from_coords(rank: i8, file: i8) -> Option<Self> {
        match (rank, file) {
            (0..=7, 0..=7) => Some(Square((rank * 8 + file) as u8)),
            _ => None,
        }
    }

    /// a1, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parses a name such as `e4`.
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [f, r] => match (File::from_char(*f as char), Rank::from_char(*r as char)) {
                (Some(file), Some(rank)) => Some(Square::new(file, rank)),
                _ => None,
            },
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    /// The square `rank_delta` ranks and `file_delta` files away, if on the board.
    #[inline]
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        Self::from_coords(
            self.rank().index() as i8 + rank_delta,
            self.file().index() as i8 + file_delta,
        )
    }

    /// a1 is dark.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.rank().index() + self.file().index()) % 2 == 0
    }

    /// Number of king steps between two squares.
    pub fn chebyshev_distance(self, other: Square) -> u8 {
        let ranks = self.rank().index().abs_diff(other.rank().index());
        let files = self.file().index().abs_diff(other.file().index());
        ranks.max(files)
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn file_and_rank_of_e4() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_algebraic(), "e4");
    }

    #[test]
    fn algebraic_names() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn offsets_stop_at_the_edge() {
        assert_eq!(Square::A1.offset(1, 1), Square::from_algebraic("b2"));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::E1.offset(2, -1), Square::from_algebraic("d3"));
    }

    #[test]
    fn square_colors() {
        assert!(Square::A1.is_dark());
        assert!(!Square::H1.is_dark());
        assert!(Square::H8.is_dark());
        assert!(!Square::from_algebraic("e4").unwrap().is_dark());
    }

    #[test]
    fn chebyshev() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.chebyshev_distance(e4), 0);
        assert_eq!(e4.chebyshev_distance(Square::H8), 4);
        assert_eq!(Square::A1.chebyshev_distance(Square::H8), 7);
    }

    #[test]
    fn all_squares_in_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[63], Square::H8);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn offset_distance_matches_step(index in 0u8..64, dr in -7i8..=7, df in -7i8..=7) {
            let from = Square::from_index(index).unwrap();
            if let Some(to) = from.offset(dr, df) {
                prop_assert_eq!(from.chebyshev_distance(to), dr.unsigned_abs().max(df.unsigned_abs()));
            }
        }
    }
}
