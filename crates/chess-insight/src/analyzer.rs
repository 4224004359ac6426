//! The analysis pipeline and its result.

use std::time::Instant;

use chess_core::{Color, Square};
use chess_rules::{RulesAuthority, StandardChess};
use serde::Serialize;

use crate::board::{AnalyzedSquare, Board};
use crate::config::EvalConfig;
use crate::control::resolve_control;
use crate::error::{AnalysisError, ConfigError};
use crate::mobility::resolve_mobility;
use crate::pawn_structure::resolve_pawn_structure;
use crate::phase::GamePhase;
use crate::tables::PositionTables;
use crate::team::{build_teams, TeamStructure};

/// The complete output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub board: Board,
    pub white: TeamStructure,
    pub black: TeamStructure,
}

impl AnalysisResult {
    pub fn team(&self, color: Color) -> &TeamStructure {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn square(&self, sq: Square) -> &AnalyzedSquare {
        &self.board[sq]
    }

    /// Resolves team references back to their square records.
    pub fn resolve<'a>(
        &'a self,
        squares: &'a [Square],
    ) -> impl Iterator<Item = &'a AnalyzedSquare> + 'a {
        squares.iter().map(move |&sq| &self.board[sq])
    }

    pub fn phase(&self) -> GamePhase {
        self.white.phase
    }
}

/// Static position evaluator.
///
/// Holds the rules authority and the evaluation config; an `Analyzer` can
/// be reused for any number of positions and shared across threads.
///
/// # Examples
///
/// ```
/// use chess_insight::{Analyzer, PhaseLabel};
///
/// let analyzer = Analyzer::default();
/// let result = analyzer
///     .analyze("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
///     .unwrap();
/// assert_eq!(result.phase().label, PhaseLabel::Opening);
/// assert_eq!(result.white.material.total_value, 39);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<R = StandardChess> {
    rules: R,
    config: EvalConfig,
    tables: &'static PositionTables,
}

impl Default for Analyzer<StandardChess> {
    fn default() -> Self {
        Analyzer {
            rules: StandardChess,
            config: EvalConfig::default(),
            tables: PositionTables::standard(),
        }
    }
}

impl Analyzer<StandardChess> {
    /// Standard chess with the given config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the config fails
    /// [`EvalConfig::validate`].
    pub fn new(config: EvalConfig) -> Result<Self, ConfigError> {
        Analyzer::with_rules(StandardChess, config)
    }
}

impl<R: RulesAuthority> Analyzer<R> {
    /// A custom rules authority with the given config.
    ///
    /// # Errors
    ///
    /// Same as [`Analyzer::new`].
    pub fn with_rules(rules: R, config: EvalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Analyzer {
            rules,
            config,
            tables: PositionTables::standard(),
        })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Analyzes one position given in the rules authority's notation.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPosition`] if the notation cannot be
    /// parsed or describes an illegal position, and
    /// [`AnalysisError::InternalInvariant`] if the config cannot score a
    /// piece. No partial result is returned.
    pub fn analyze(&self, notation: &str) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();

        let position = self.rules.parse_position(notation)?;
        let mut board = Board::from_position(&position);
        resolve_control(&self.rules, &position, &mut board);
        resolve_mobility(&mut board);
        resolve_pawn_structure(&mut board);

        let phase = GamePhase::classify(&board);
        let castling = Color::BOTH.map(|color| self.rules.castling_rights(&position, color));
        let [white, black] = build_teams(&mut board, phase, &self.config, self.tables, castling)?;

        for cell in board.iter_mut() {
            cell.metadata.calculated = true;
        }

        tracing::debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            phase = %phase.label,
            "analyzed position"
        );

        Ok(AnalysisResult { board, white, black })
    }
}

/// Analyzes a FEN with standard rules and the built-in calibration.
///
/// # Errors
///
/// See [`Analyzer::analyze`].
pub fn analyze(fen: &str) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::default().analyze(fen)
}
