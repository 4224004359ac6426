//! Game phase from remaining non-pawn material.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::board::Board;

/// Non-pawn material at or below which the phase value is zero.
pub const ENDGAME_MATERIAL: u32 = 15;

/// Non-pawn material of the starting position, both sides together.
pub const FULL_MATERIAL: u32 = 62;

/// Discrete phase bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseLabel {
    Opening,
    Middlegame,
    Endgame,
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseLabel::Opening => "Opening",
            PhaseLabel::Middlegame => "Middlegame",
            PhaseLabel::Endgame => "Endgame",
        };
        f.write_str(name)
    }
}

/// The phase of one position, shared by both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GamePhase {
    pub label: PhaseLabel,
    /// 1.0 with all pieces on the board, 0.0 once material is at or below
    /// [`ENDGAME_MATERIAL`].
    pub value: f64,
}

impl GamePhase {
    /// Phase for a given non-pawn, non-king material total.
    pub fn from_material(material: u32) -> Self {
        let span = f64::from(FULL_MATERIAL - ENDGAME_MATERIAL);
        let value = ((f64::from(material) - f64::from(ENDGAME_MATERIAL)) / span).clamp(0.0, 1.0);

        let label = if value > 0.85 {
            PhaseLabel::Opening
        } else if value > 0.25 {
            PhaseLabel::Middlegame
        } else {
            PhaseLabel::Endgame
        };

        GamePhase { label, value }
    }

    /// Classifies the position on `board`.
    pub fn classify(board: &Board) -> Self {
        let material: u32 = board
            .iter()
            .filter_map(|cell| cell.occupant)
            .map(|occupant| occupant.piece.phase_material())
            .sum();
        let phase = Self::from_material(material);
        debug!(material, label = %phase.label, value = phase.value, "classified game phase");
        phase
    }

    pub fn is_endgame(&self) -> bool {
        self.label == PhaseLabel::Endgame
    }
}
