//! Phase-weighted piece evaluation.
//!
//! Each piece kind is scored on a fixed list of criteria (see
//! [`Criterion::for_piece`]). Four are shared by every kind: mobility,
//! position, support and safety. The rest come from the per-kind modules.
//! Raw scores are capped at their criterion's ceiling, weighted by the
//! phase-blended weight vector and normalized against the weighted
//! ceiling, so a total is always in `[0, 10]`.

mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

use std::fmt;

use chess_core::{Color, Piece, Square};
use chess_rules::SideCastling;
use serde::Serialize;
use tracing::trace;

use crate::board::{AnalyzedSquare, Board};
use crate::config::EvalConfig;
use crate::error::AnalysisError;
use crate::phase::GamePhase;
use crate::tables::PositionTables;
use crate::weights::{Criterion, WeightVector};

/// Where a raw score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSource {
    /// Derived from the position.
    Computed,
    /// A fixed stand-in value: the metric has no algorithm yet.
    Placeholder,
}

/// A raw score before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub criterion: Criterion,
    pub raw: f64,
    pub source: MetricSource,
}

impl Metric {
    /// A computed score, clamped to `[0, criterion.max()]`.
    pub fn computed(criterion: Criterion, raw: f64) -> Self {
        Metric {
            criterion,
            raw: raw.clamp(0.0, criterion.max()),
            source: MetricSource::Computed,
        }
    }

    /// Value used where no algorithm exists for the criterion.
    pub const PLACEHOLDER_VALUE: f64 = 1.0;

    pub fn placeholder(criterion: Criterion) -> Self {
        Metric {
            criterion,
            raw: Self::PLACEHOLDER_VALUE,
            source: MetricSource::Placeholder,
        }
    }
}

/// One criterion's contribution to a piece evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    pub criterion: Criterion,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
    pub source: MetricSource,
}

/// Letter bucket of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Grade {
        if score >= 8.5 {
            Grade::A
        } else if score >= 7.0 {
            Grade::B
        } else if score >= 5.0 {
            Grade::C
        } else if score >= 3.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The graded evaluation of one piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceEvaluation {
    pub piece: Piece,
    pub components: Vec<ComponentScore>,
    /// Normalized to `[0, 10]` and rounded to one decimal.
    pub total_score: f64,
    /// Derived from the rounded total.
    pub grade: Grade,
}

impl PieceEvaluation {
    pub fn component(&self, criterion: Criterion) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.criterion == criterion)
    }

    /// Criteria scored with a placeholder instead of a computed value.
    pub fn placeholders(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.components
            .iter()
            .filter(|c| c.source == MetricSource::Placeholder)
            .map(|c| c.criterion)
    }
}

/// Weights `metrics` and normalizes the sum against the weighted ceiling.
pub fn normalize(
    piece: Piece,
    metrics: &[Metric],
    weights: &WeightVector,
) -> Result<PieceEvaluation, AnalysisError> {
    let mut components = Vec::with_capacity(metrics.len());
    let mut weighted_total = 0.0_f64;
    let mut ceiling = 0.0_f64;

    for metric in metrics {
        let weight = weights.get(metric.criterion).ok_or_else(|| {
            AnalysisError::InternalInvariant(format!(
                "no {:?} weight configured for {}",
                metric.criterion, piece
            ))
        })?;
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(AnalysisError::InternalInvariant(format!(
                "{piece} {:?} weight is {weight}",
                metric.criterion
            )));
        }
        if !metric.raw.is_finite() {
            return Err(AnalysisError::InternalInvariant(format!(
                "{piece} {:?} raw score is {}",
                metric.criterion, metric.raw
            )));
        }
        let raw = metric.raw.clamp(0.0, metric.criterion.max());
        let weighted = raw * weight;
        weighted_total += weighted;
        ceiling += metric.criterion.max() * weight;
        components.push(ComponentScore {
            criterion: metric.criterion,
            raw,
            weight,
            weighted,
            source: metric.source,
        });
    }

    if !(ceiling.is_finite() && ceiling > 0.0) {
        return Err(AnalysisError::InternalInvariant(format!(
            "weighted ceiling for {piece} is {ceiling}"
        )));
    }

    let score = (10.0 * weighted_total / ceiling).clamp(0.0, 10.0);
    let total_score = (score * 10.0).round() / 10.0;

    Ok(PieceEvaluation {
        piece,
        components,
        total_score,
        grade: Grade::from_score(total_score),
    })
}

/// Read-only inputs shared by every piece evaluation of one analysis.
pub struct EvalContext<'a> {
    pub board: &'a Board,
    pub phase: GamePhase,
    pub config: &'a EvalConfig,
    pub tables: &'a PositionTables,
    /// Castling rights, indexed by color.
    pub castling: [SideCastling; 2],
}

/// `min(2.5, total / ceiling * 2.5)`. The ceiling must be positive.
pub fn mobility_score(cell: &AnalyzedSquare, ceiling: f64) -> Result<f64, AnalysisError> {
    if !(ceiling.is_finite() && ceiling > 0.0) {
        return Err(AnalysisError::InternalInvariant(format!(
            "mobility ceiling on {} is {ceiling}",
            cell.square
        )));
    }
    let max = Criterion::Mobility.max();
    Ok((cell.mobility.total as f64 / ceiling * max).min(max))
}

/// 0.5 per defender, up to 1.5.
pub fn support_score(cell: &AnalyzedSquare) -> f64 {
    (cell.defenders.len() as f64 * 0.5).min(Criterion::Support.max())
}

/// 0.5 less 0.1 per attacker, never negative.
pub fn safety_score(cell: &AnalyzedSquare) -> f64 {
    (Criterion::Safety.max() - cell.attackers.len() as f64 * 0.1).max(0.0)
}

fn specific_metrics(ctx: &EvalContext<'_>, sq: Square, piece: Piece, color: Color) -> Vec<Metric> {
    match piece {
        Piece::Pawn => pawn::metrics(ctx, sq, color),
        Piece::Knight => knight::metrics(ctx, sq, color),
        Piece::Bishop => bishop::metrics(ctx, sq, color),
        Piece::Rook => rook::metrics(),
        Piece::Queen => queen::metrics(),
        Piece::King => king::metrics(ctx, sq, color),
    }
}

/// Evaluates the piece standing on `sq`.
pub fn evaluate_piece(ctx: &EvalContext<'_>, sq: Square) -> Result<PieceEvaluation, AnalysisError> {
    let cell = &ctx.board[sq];
    let occupant = cell
        .occupant
        .ok_or_else(|| AnalysisError::InternalInvariant(format!("no piece to evaluate on {sq}")))?;
    let (piece, color) = (occupant.piece, occupant.color);

    let specific = specific_metrics(ctx, sq, piece, color);
    let metrics = Criterion::for_piece(piece)
        .iter()
        .map(|&criterion| match criterion {
            Criterion::Mobility => Ok(Metric::computed(
                criterion,
                mobility_score(cell, ctx.config.mobility.for_piece(piece))?,
            )),
            Criterion::Position => Ok(Metric::computed(
                criterion,
                ctx.tables.position_score(piece, sq, color, ctx.phase.label),
            )),
            Criterion::Support => Ok(Metric::computed(criterion, support_score(cell))),
            Criterion::Safety => Ok(Metric::computed(criterion, safety_score(cell))),
            other => specific
                .iter()
                .find(|m| m.criterion == other)
                .copied()
                .ok_or_else(|| {
                    AnalysisError::InternalInvariant(format!("{piece} has no {other:?} metric"))
                }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let weights = ctx
        .config
        .weights
        .for_piece(piece)
        .for_phase(ctx.phase.value);
    let evaluation = normalize(piece, &metrics, &weights)?;
    trace!(
        square = %sq,
        piece = %piece,
        color = %color,
        score = evaluation.total_score,
        grade = %evaluation.grade,
        "evaluated piece"
    );
    Ok(evaluation)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::control::resolve_control;
    use crate::mobility::resolve_mobility;
    use crate::pawn_structure::resolve_pawn_structure;
    use chess_rules::{Position, RulesAuthority, StandardChess};

    /// A fully resolved board with the inputs an evaluation needs.
    pub struct Fixture {
        pub board: Board,
        pub phase: GamePhase,
        pub castling: [SideCastling; 2],
        pub config: EvalConfig,
    }

    impl Fixture {
        pub fn new(fen: &str) -> Self {
            let position = Position::from_fen(fen).unwrap();
            let mut board = Board::from_position(&position);
            resolve_control(&StandardChess, &position, &mut board);
            resolve_mobility(&mut board);
            resolve_pawn_structure(&mut board);
            let phase = GamePhase::classify(&board);
            let castling = Color::BOTH.map(|c| StandardChess.castling_rights(&position, c));
            Fixture {
                board,
                phase,
                castling,
                config: EvalConfig::default(),
            }
        }

        pub fn with_phase(mut self, phase: GamePhase) -> Self {
            self.phase = phase;
            self
        }

        pub fn ctx(&self) -> EvalContext<'_> {
            EvalContext {
                board: &self.board,
                phase: self.phase,
                config: &self.config,
                tables: PositionTables::standard(),
                castling: self.castling,
            }
        }
    }

    pub fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    pub fn raw(metrics: &[Metric], criterion: Criterion) -> f64 {
        metrics.iter().find(|m| m.criterion == criterion).unwrap().raw
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::phase::PhaseLabel;
    use chess_core::FenParser;

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_score(10.0), Grade::A);
        assert_eq!(Grade::from_score(8.5), Grade::A);
        assert_eq!(Grade::from_score(8.49), Grade::B);
        assert_eq!(Grade::from_score(7.0), Grade::B);
        assert_eq!(Grade::from_score(6.99), Grade::C);
        assert_eq!(Grade::from_score(5.0), Grade::C);
        assert_eq!(Grade::from_score(4.99), Grade::D);
        assert_eq!(Grade::from_score(3.0), Grade::D);
        assert_eq!(Grade::from_score(2.99), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn normalize_maxed_and_empty() {
        let weights = WeightVector::new(&[(Criterion::Mobility, 2.0), (Criterion::Safety, 1.0)]);
        let maxed = [
            Metric::computed(Criterion::Mobility, 9.0),
            Metric::computed(Criterion::Safety, 0.5),
        ];
        let evaluation = normalize(Piece::Knight, &maxed, &weights).unwrap();
        assert_eq!(evaluation.total_score, 10.0);
        assert_eq!(evaluation.grade, Grade::A);
        assert_eq!(evaluation.components[0].raw, 2.5);
        assert_eq!(evaluation.components[0].weighted, 5.0);

        let zero = [
            Metric::computed(Criterion::Mobility, 0.0),
            Metric::computed(Criterion::Safety, 0.0),
        ];
        let evaluation = normalize(Piece::Knight, &zero, &weights).unwrap();
        assert_eq!(evaluation.total_score, 0.0);
        assert_eq!(evaluation.grade, Grade::F);
    }

    #[test]
    fn normalize_is_weighted_not_summed() {
        // 2.5 of 2.5 at weight 3, 0 of 0.5 at weight 1: 7.5 / 8.0.
        let weights = WeightVector::new(&[(Criterion::Mobility, 3.0), (Criterion::Safety, 1.0)]);
        let metrics = [
            Metric::computed(Criterion::Mobility, 2.5),
            Metric::computed(Criterion::Safety, 0.0),
        ];
        let evaluation = normalize(Piece::Rook, &metrics, &weights).unwrap();
        assert_eq!(evaluation.total_score, 9.4);
    }

    #[test]
    fn grade_uses_rounded_score() {
        // 8.46 rounds up to 8.5.
        let weights = WeightVector::new(&[(Criterion::Mobility, 1.0)]);
        let metrics = [Metric::computed(Criterion::Mobility, 2.115)];
        let evaluation = normalize(Piece::Pawn, &metrics, &weights).unwrap();
        assert_eq!(evaluation.total_score, 8.5);
        assert_eq!(evaluation.grade, Grade::A);
    }

    #[test]
    fn missing_weight_is_an_invariant_error() {
        let weights = WeightVector::new(&[(Criterion::Mobility, 1.0)]);
        let metrics = [Metric::computed(Criterion::Tactics, 1.0)];
        assert!(matches!(
            normalize(Piece::Knight, &metrics, &weights),
            Err(AnalysisError::InternalInvariant(_))
        ));
    }

    #[test]
    fn zero_ceiling_is_an_invariant_error() {
        let weights = WeightVector::new(&[(Criterion::Mobility, 0.0)]);
        let metrics = [Metric::computed(Criterion::Mobility, 1.0)];
        assert!(matches!(
            normalize(Piece::King, &metrics, &weights),
            Err(AnalysisError::InternalInvariant(_))
        ));
    }

    #[test]
    fn non_finite_weights_and_scores_are_invariant_errors() {
        let metrics = [Metric::computed(Criterion::Mobility, 1.0)];
        for weight in [f64::NAN, f64::INFINITY, -1.0] {
            let weights = WeightVector::new(&[(Criterion::Mobility, weight)]);
            assert!(
                matches!(
                    normalize(Piece::Knight, &metrics, &weights),
                    Err(AnalysisError::InternalInvariant(_))
                ),
                "{weight}"
            );
        }

        let weights = WeightVector::new(&[(Criterion::Mobility, 1.0)]);
        let nan = [Metric::computed(Criterion::Mobility, f64::NAN)];
        assert!(matches!(
            normalize(Piece::Knight, &nan, &weights),
            Err(AnalysisError::InternalInvariant(_))
        ));
    }

    #[test]
    fn unusable_mobility_ceiling_is_an_invariant_error() {
        let fixture = Fixture::new(FenParser::STARTPOS);
        let a1 = &fixture.board[Square::A1];
        for ceiling in [0.0, -3.0, f64::NAN] {
            assert!(
                matches!(mobility_score(a1, ceiling), Err(AnalysisError::InternalInvariant(_))),
                "{ceiling}"
            );
        }
    }

    #[test]
    fn unvalidated_config_fails_instead_of_scoring() {
        // A boxed-in rook must never be lifted to full mobility by a zero ceiling.
        let mut fixture = Fixture::new(FenParser::STARTPOS);
        fixture.config.mobility.rook = 0.0;
        assert!(matches!(
            evaluate_piece(&fixture.ctx(), Square::A1),
            Err(AnalysisError::InternalInvariant(_))
        ));

        let mut fixture = Fixture::new(FenParser::STARTPOS);
        let entries: Vec<(Criterion, f64)> = Criterion::for_piece(Piece::Knight)
            .iter()
            .map(|&c| (c, if c == Criterion::Mobility { f64::NAN } else { 1.0 }))
            .collect();
        fixture.config.weights.knight.opening = WeightVector::new(&entries);
        assert!(matches!(
            evaluate_piece(&fixture.ctx(), Square::G1),
            Err(AnalysisError::InternalInvariant(_))
        ));
    }

    #[test]
    fn shared_metrics() {
        let fixture = Fixture::new(FenParser::STARTPOS);
        let d1 = &fixture.board[sq("d1")];
        assert_eq!(support_score(d1), 0.5);
        assert_eq!(safety_score(d1), 0.5);
        assert_eq!(mobility_score(d1, 27.0).unwrap(), 0.0);

        let g1 = &fixture.board[Square::G1];
        assert!((mobility_score(g1, 8.0).unwrap() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn every_start_piece_evaluates() {
        let fixture = Fixture::new(FenParser::STARTPOS);
        assert_eq!(fixture.phase.label, PhaseLabel::Opening);
        let ctx = fixture.ctx();
        for cell in fixture.board.iter().filter(|c| c.occupant.is_some()) {
            let evaluation = evaluate_piece(&ctx, cell.square).unwrap();
            let criteria: Vec<Criterion> = evaluation.components.iter().map(|c| c.criterion).collect();
            assert_eq!(criteria, Criterion::for_piece(evaluation.piece));
            assert!((0.0..=10.0).contains(&evaluation.total_score));
        }
    }

    #[test]
    fn empty_square_cannot_be_evaluated() {
        let fixture = Fixture::new(FenParser::STARTPOS);
        assert!(matches!(
            evaluate_piece(&fixture.ctx(), sq("e4")),
            Err(AnalysisError::InternalInvariant(_))
        ));
    }
}
