//! Static chess position evaluation.
//!
//! Given a single position, this crate computes, without search:
//! - per-square control: which pieces attack and defend every square
//! - per-piece pseudo-mobility split into quiet moves, captures and checks
//! - pawn-structure flags (isolated, doubled, passed, backward, blocked,
//!   hanging)
//! - a continuous game phase, and from it phase-weighted 0-10 scores with
//!   A-F grades for every piece
//! - per-side team summaries: material, mobility, pawn buckets
//!
//! # Overview
//!
//! - [`analyze`] - one-call analysis of a FEN with the built-in calibration
//! - [`Analyzer`] - the same pipeline with an injected [`EvalConfig`] or
//!   rules authority
//! - [`AnalysisResult`] - the analyzed [`Board`] plus two [`TeamStructure`]s
//!
//! # Example
//!
//! ```
//! use chess_insight::{analyze, Grade};
//! use chess_core::Square;
//!
//! let result = analyze("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
//! let knight = result.square(Square::G1);
//! assert_eq!(knight.mobility.total, 2);
//! let evaluation = knight.evaluation.as_ref().unwrap();
//! assert!(evaluation.total_score <= 10.0);
//! assert_eq!(evaluation.grade, Grade::from_score(evaluation.total_score));
//! # Ok::<(), chess_insight::AnalysisError>(())
//! ```

mod analyzer;
mod board;
mod config;
mod control;
mod error;
mod evaluation;
mod mobility;
mod pawn_structure;
mod phase;
mod tables;
mod team;
mod weights;

pub use analyzer::{analyze, AnalysisResult, Analyzer};
pub use board::{
    AnalyzedSquare, Blocked, Board, Geometry, Mobility, Occupant, PawnStructure, SquareMetadata,
    Threats, ANALYSIS_VERSION,
};
pub use config::{EvalConfig, MobilityCeilings, WeightTable};
pub use error::{AnalysisError, ConfigError};
pub use evaluation::{normalize, ComponentScore, Grade, Metric, MetricSource, PieceEvaluation};
pub use mobility::piece_mobility;
pub use pawn_structure::analyze_pawn;
pub use phase::{GamePhase, PhaseLabel, ENDGAME_MATERIAL, FULL_MATERIAL};
pub use tables::PositionTables;
pub use team::{Material, PawnBuckets, TeamStructure};
pub use weights::{Criterion, PhaseWeights, WeightVector};
