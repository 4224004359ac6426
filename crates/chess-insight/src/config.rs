//! Evaluation configuration.
//!
//! The built-in calibration is [`EvalConfig::default`]. A TOML file can
//! override any part of it; sections left out keep their defaults:
//!
//! ```toml
//! [mobility]
//! queen = 21
//!
//! [weights.knight.opening]
//! mobility = 1.0
//! position = 1.2
//! tactics = 0.9
//! support = 1.0
//! safety = 1.2
//! ```
//!
//! A piece's weights are replaced per phase anchor, so an overridden
//! anchor must list every criterion of that piece.

use std::collections::BTreeSet;
use std::path::Path;

use chess_core::Piece;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::weights::{Criterion, PhaseWeights};

/// Move count at which a piece's mobility score saturates.
///
/// The pawn (3) and knight (8) defaults are the established calibration.
/// Bishop 13, rook 14, queen 27 and king 8 are this crate's own choice:
/// the most squares each piece can reach on an empty board.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MobilityCeilings {
    pub pawn: f64,
    pub knight: f64,
    pub bishop: f64,
    pub rook: f64,
    pub queen: f64,
    pub king: f64,
}

impl Default for MobilityCeilings {
    fn default() -> Self {
        MobilityCeilings {
            pawn: 3.0,
            knight: 8.0,
            bishop: 13.0,
            rook: 14.0,
            queen: 27.0,
            king: 8.0,
        }
    }
}

impl MobilityCeilings {
    pub fn for_piece(&self, piece: Piece) -> f64 {
        match piece {
            Piece::Pawn => self.pawn,
            Piece::Knight => self.knight,
            Piece::Bishop => self.bishop,
            Piece::Rook => self.rook,
            Piece::Queen => self.queen,
            Piece::King => self.king,
        }
    }
}

/// Phase weights for every piece kind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightTable {
    pub pawn: PhaseWeights,
    pub knight: PhaseWeights,
    pub bishop: PhaseWeights,
    pub rook: PhaseWeights,
    pub queen: PhaseWeights,
    pub king: PhaseWeights,
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable {
            pawn: PhaseWeights::standard(Piece::Pawn),
            knight: PhaseWeights::standard(Piece::Knight),
            bishop: PhaseWeights::standard(Piece::Bishop),
            rook: PhaseWeights::standard(Piece::Rook),
            queen: PhaseWeights::standard(Piece::Queen),
            king: PhaseWeights::standard(Piece::King),
        }
    }
}

impl WeightTable {
    pub fn for_piece(&self, piece: Piece) -> &PhaseWeights {
        match piece {
            Piece::Pawn => &self.pawn,
            Piece::Knight => &self.knight,
            Piece::Bishop => &self.bishop,
            Piece::Rook => &self.rook,
            Piece::Queen => &self.queen,
            Piece::King => &self.king,
        }
    }
}

/// Tunable inputs of the evaluation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    pub mobility: MobilityCeilings,
    pub weights: WeightTable,
}

impl EvalConfig {
    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML for this shape,
    /// or [`ConfigError::InvalidValue`] if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EvalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value the evaluation relies on.
    ///
    /// Ceilings must be positive. Each weight vector must name exactly the
    /// criteria of its piece, with finite non-negative weights and at least
    /// one criterion weighted above zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for piece in Piece::ALL {
            let ceiling = self.mobility.for_piece(piece);
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "mobility ceiling for {piece} must be positive, got {ceiling}"
                )));
            }

            let expected: BTreeSet<Criterion> = Criterion::for_piece(piece).iter().copied().collect();
            for (anchor, vector) in self.weights.for_piece(piece).anchors() {
                let keys: BTreeSet<Criterion> = vector.iter().map(|(c, _)| c).collect();
                if keys != expected {
                    return Err(ConfigError::InvalidValue(format!(
                        "{piece} {anchor} weights must cover exactly {expected:?}, got {keys:?}"
                    )));
                }
                if let Some((criterion, weight)) =
                    vector.iter().find(|(_, w)| !(w.is_finite() && *w >= 0.0))
                {
                    return Err(ConfigError::InvalidValue(format!(
                        "{piece} {anchor} {criterion:?} weight must be finite and non-negative, got {weight}"
                    )));
                }
                let ceiling: f64 = vector.iter().map(|(c, w)| c.max() * w).sum();
                if ceiling <= 0.0 {
                    return Err(ConfigError::InvalidValue(format!(
                        "{piece} {anchor} weights are all zero"
                    )));
                }
            }
        }
        Ok(())
    }
}
