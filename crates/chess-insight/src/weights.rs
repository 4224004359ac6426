//! Evaluation criteria and their phase-dependent weights.
//!
//! Every piece kind carries three weight vectors, one per phase anchor.
//! Between the anchors the vectors are blended linearly, so a piece's
//! weights change continuously as material comes off the board even though
//! the phase label changes in steps.

use std::collections::BTreeMap;

use chess_core::Piece;
use serde::{Deserialize, Serialize};

/// A single scored aspect of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Mobility,
    Position,
    Tactics,
    Support,
    Safety,
    Structure,
    Advancement,
    Diagonals,
    OpenFiles,
    Centralization,
    Activity,
    Castling,
}

const PAWN_CRITERIA: [Criterion; 6] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::Structure,
    Criterion::Advancement,
    Criterion::Support,
    Criterion::Safety,
];

const KNIGHT_CRITERIA: [Criterion; 5] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::Tactics,
    Criterion::Support,
    Criterion::Safety,
];

const BISHOP_CRITERIA: [Criterion; 6] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::Diagonals,
    Criterion::Tactics,
    Criterion::Support,
    Criterion::Safety,
];

const ROOK_CRITERIA: [Criterion; 6] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::OpenFiles,
    Criterion::Tactics,
    Criterion::Support,
    Criterion::Safety,
];

const QUEEN_CRITERIA: [Criterion; 6] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::Centralization,
    Criterion::Tactics,
    Criterion::Support,
    Criterion::Safety,
];

const KING_CRITERIA: [Criterion; 6] = [
    Criterion::Mobility,
    Criterion::Position,
    Criterion::Activity,
    Criterion::Castling,
    Criterion::Support,
    Criterion::Safety,
];

impl Criterion {
    /// Standardized ceiling of the raw score.
    pub const fn max(self) -> f64 {
        match self {
            Criterion::Support => 1.5,
            Criterion::Safety => 0.5,
            _ => 2.5,
        }
    }

    /// The criteria a piece kind is scored on, in reporting order.
    pub const fn for_piece(piece: Piece) -> &'static [Criterion] {
        match piece {
            Piece::Pawn => &PAWN_CRITERIA,
            Piece::Knight => &KNIGHT_CRITERIA,
            Piece::Bishop => &BISHOP_CRITERIA,
            Piece::Rook => &ROOK_CRITERIA,
            Piece::Queen => &QUEEN_CRITERIA,
            Piece::King => &KING_CRITERIA,
        }
    }
}

/// Per-criterion weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<Criterion, f64>);

impl WeightVector {
    pub fn new(entries: &[(Criterion, f64)]) -> Self {
        WeightVector(entries.iter().copied().collect())
    }

    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        self.0.get(&criterion).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }

    /// `self + t * (to - self)` per criterion. Criteria missing from `to`
    /// keep their weight.
    pub fn lerp(&self, to: &WeightVector, t: f64) -> WeightVector {
        WeightVector(
            self.0
                .iter()
                .map(|(c, from)| (*c, from + t * (to.get(*c).unwrap_or(*from) - from)))
                .collect(),
        )
    }
}

/// The three anchor vectors of one piece kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub opening: WeightVector,
    pub middlegame: WeightVector,
    pub endgame: WeightVector,
}

impl PhaseWeights {
    /// Weights for a continuous phase value in `[0, 1]`.
    ///
    /// Above 0.75 the opening vector is used as is, at or below 0.25 the
    /// endgame vector. In between, 0.5..0.75 blends middlegame towards
    /// opening and 0.25..0.5 blends endgame towards middlegame.
    pub fn for_phase(&self, value: f64) -> WeightVector {
        if value > 0.75 {
            self.opening.clone()
        } else if value > 0.5 {
            self.middlegame.lerp(&self.opening, (value - 0.5) / 0.25)
        } else if value > 0.25 {
            self.endgame.lerp(&self.middlegame, (value - 0.25) / 0.25)
        } else {
            self.endgame.clone()
        }
    }

    pub fn anchors(&self) -> [(&'static str, &WeightVector); 3] {
        [
            ("opening", &self.opening),
            ("middlegame", &self.middlegame),
            ("endgame", &self.endgame),
        ]
    }

    /// Built-in calibration for a piece kind.
    ///
    /// The pawn and queen vectors are this crate's own calibration, shaped
    /// like the others: pawns gain advancement weight towards the endgame,
    /// queens gain mobility.
    pub fn standard(piece: Piece) -> PhaseWeights {
        use Criterion::*;

        let (opening, middlegame, endgame): (&[(Criterion, f64)], &[(Criterion, f64)], &[(Criterion, f64)]) =
            match piece {
                Piece::Pawn => (
                    &[
                        (Mobility, 0.8),
                        (Position, 1.2),
                        (Structure, 1.4),
                        (Advancement, 0.6),
                        (Support, 1.2),
                        (Safety, 1.0),
                    ],
                    &[
                        (Mobility, 1.0),
                        (Position, 1.0),
                        (Structure, 1.3),
                        (Advancement, 1.0),
                        (Support, 1.0),
                        (Safety, 0.9),
                    ],
                    &[
                        (Mobility, 1.2),
                        (Position, 0.7),
                        (Structure, 1.0),
                        (Advancement, 1.8),
                        (Support, 0.6),
                        (Safety, 0.7),
                    ],
                ),
                Piece::Knight => (
                    &[
                        (Mobility, 0.8),
                        (Position, 1.3),
                        (Tactics, 0.8),
                        (Support, 1.1),
                        (Safety, 1.4),
                    ],
                    &[
                        (Mobility, 1.2),
                        (Position, 0.9),
                        (Tactics, 1.6),
                        (Support, 1.0),
                        (Safety, 0.9),
                    ],
                    &[
                        (Mobility, 1.6),
                        (Position, 0.6),
                        (Tactics, 1.0),
                        (Support, 0.5),
                        (Safety, 0.7),
                    ],
                ),
                Piece::Bishop => (
                    &[
                        (Mobility, 0.8),
                        (Position, 1.2),
                        (Diagonals, 1.4),
                        (Tactics, 1.0),
                        (Support, 1.1),
                        (Safety, 1.3),
                    ],
                    &[
                        (Mobility, 1.3),
                        (Position, 1.0),
                        (Diagonals, 1.2),
                        (Tactics, 1.6),
                        (Support, 1.0),
                        (Safety, 0.9),
                    ],
                    &[
                        (Mobility, 1.5),
                        (Position, 0.8),
                        (Diagonals, 1.1),
                        (Tactics, 0.7),
                        (Support, 0.7),
                        (Safety, 0.8),
                    ],
                ),
                Piece::Rook => (
                    &[
                        (Mobility, 0.6),
                        (Position, 1.0),
                        (OpenFiles, 1.6),
                        (Tactics, 0.7),
                        (Support, 1.3),
                        (Safety, 1.5),
                    ],
                    &[
                        (Mobility, 1.4),
                        (Position, 0.8),
                        (OpenFiles, 1.5),
                        (Tactics, 1.4),
                        (Support, 1.0),
                        (Safety, 0.8),
                    ],
                    &[
                        (Mobility, 1.8),
                        (Position, 0.5),
                        (OpenFiles, 1.2),
                        (Tactics, 1.1),
                        (Support, 0.4),
                        (Safety, 0.6),
                    ],
                ),
                Piece::Queen => (
                    &[
                        (Mobility, 0.6),
                        (Position, 1.0),
                        (Centralization, 0.5),
                        (Tactics, 0.8),
                        (Support, 1.0),
                        (Safety, 1.8),
                    ],
                    &[
                        (Mobility, 1.4),
                        (Position, 0.9),
                        (Centralization, 1.2),
                        (Tactics, 1.5),
                        (Support, 0.9),
                        (Safety, 1.2),
                    ],
                    &[
                        (Mobility, 1.6),
                        (Position, 0.7),
                        (Centralization, 1.4),
                        (Tactics, 1.2),
                        (Support, 0.5),
                        (Safety, 0.8),
                    ],
                ),
                Piece::King => (
                    &[
                        (Mobility, 0.3),
                        (Position, 1.4),
                        (Activity, 0.2),
                        (Castling, 1.8),
                        (Support, 1.1),
                        (Safety, 2.2),
                    ],
                    &[
                        (Mobility, 0.4),
                        (Position, 1.2),
                        (Activity, 0.5),
                        (Castling, 0.8),
                        (Support, 1.3),
                        (Safety, 1.8),
                    ],
                    &[
                        (Mobility, 1.6),
                        (Position, 0.9),
                        (Activity, 1.8),
                        (Castling, 0.0),
                        (Support, 0.4),
                        (Safety, 0.7),
                    ],
                ),
            };

        PhaseWeights {
            opening: WeightVector::new(opening),
            middlegame: WeightVector::new(middlegame),
            endgame: WeightVector::new(endgame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_vectors_cover_their_criteria() {
        for piece in Piece::ALL {
            let weights = PhaseWeights::standard(piece);
            for (_, vector) in weights.anchors() {
                let keys: Vec<Criterion> = vector.iter().map(|(c, _)| c).collect();
                let mut expected = Criterion::for_piece(piece).to_vec();
                expected.sort();
                assert_eq!(keys, expected, "{piece:?}");
            }
        }
    }

    #[test]
    fn anchors_are_returned_unchanged() {
        let weights = PhaseWeights::standard(Piece::Rook);
        assert_eq!(weights.for_phase(1.0), weights.opening);
        assert_eq!(weights.for_phase(0.76), weights.opening);
        assert_eq!(weights.for_phase(0.0), weights.endgame);
        assert_eq!(weights.for_phase(0.25), weights.endgame);
    }

    #[test]
    fn blend_at_the_anchors_meets_the_neighbours() {
        let weights = PhaseWeights::standard(Piece::King);
        let at_half = weights.for_phase(0.5);
        let at_three_quarters = weights.for_phase(0.75);
        for (criterion, w) in weights.middlegame.iter() {
            assert!((at_half.get(criterion).unwrap() - w).abs() < 1e-12);
        }
        for (criterion, w) in weights.opening.iter() {
            assert!((at_three_quarters.get(criterion).unwrap() - w).abs() < 1e-12);
        }
    }

    #[test]
    fn halfway_blend() {
        let weights = PhaseWeights::standard(Piece::Knight);
        // 0.375 is halfway from endgame (1.6) to middlegame (1.2).
        let blended = weights.for_phase(0.375);
        assert!((blended.get(Criterion::Mobility).unwrap() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn interior_blends_lie_between_their_anchors() {
        // Phase 0.5 sits exactly on the middlegame anchor, so the interior
        // points checked are the midpoints of each blend segment.
        fn between(w: f64, a: f64, b: f64) -> bool {
            w >= a.min(b) - 1e-12 && w <= a.max(b) + 1e-12
        }
        for piece in Piece::ALL {
            let weights = PhaseWeights::standard(piece);
            let late = weights.for_phase(0.375);
            let early = weights.for_phase(0.625);
            for (criterion, mid) in weights.middlegame.iter() {
                let end = weights.endgame.get(criterion).unwrap();
                let open = weights.opening.get(criterion).unwrap();
                let l = late.get(criterion).unwrap();
                let e = early.get(criterion).unwrap();
                assert!(between(l, end, mid), "{piece:?} {criterion:?} at 0.375: {l}");
                assert!(between(e, mid, open), "{piece:?} {criterion:?} at 0.625: {e}");
                assert!((l - (end + mid) / 2.0).abs() < 1e-12, "{piece:?} {criterion:?}");
                assert!((e - (mid + open) / 2.0).abs() < 1e-12, "{piece:?} {criterion:?}");
            }
        }
    }

    #[test]
    fn lerp_keeps_criteria_missing_from_target() {
        let from = WeightVector::new(&[(Criterion::Mobility, 1.0), (Criterion::Safety, 2.0)]);
        let to = WeightVector::new(&[(Criterion::Mobility, 3.0)]);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.get(Criterion::Mobility), Some(2.0));
        assert_eq!(mid.get(Criterion::Safety), Some(2.0));
        assert_eq!(mid.get(Criterion::Tactics), None);
    }

    #[test]
    fn criterion_ceilings() {
        assert_eq!(Criterion::Support.max(), 1.5);
        assert_eq!(Criterion::Safety.max(), 0.5);
        assert_eq!(Criterion::OpenFiles.max(), 2.5);
        assert!(!Criterion::for_piece(Piece::King).contains(&Criterion::Tactics));
    }
}
