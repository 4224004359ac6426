use chess_core::{Color, Square};

use super::{EvalContext, Metric};
use crate::board::PawnStructure;
use crate::weights::Criterion;

/// Ranks a pawn can advance from its start rank before promoting.
const ADVANCE_SPAN: f64 = 5.0;

const STRUCTURE_BASE: f64 = 1.5;
const PASSED_BONUS: f64 = 1.0;
const ISOLATED_PENALTY: f64 = 0.8;
const DOUBLED_PENALTY: f64 = 0.6;
const BACKWARD_PENALTY: f64 = 0.6;
const RAMMED_PENALTY: f64 = 0.5;
const OBSTRUCTED_PENALTY: f64 = 0.2;
const HANGING_PENALTY: f64 = 0.3;

/// Base score adjusted by each pawn-structure flag, clamped to the
/// criterion range. A pawn blocked by an enemy pawn loses more than one
/// blocked by a piece.
pub(super) fn structure_score(structure: &PawnStructure) -> f64 {
    let mut score: f64 = STRUCTURE_BASE;
    if structure.passed {
        score += PASSED_BONUS;
    }
    if structure.isolated {
        score -= ISOLATED_PENALTY;
    }
    if structure.doubled {
        score -= DOUBLED_PENALTY;
    }
    if structure.backward {
        score -= BACKWARD_PENALTY;
    }
    if structure.blocked.permanently {
        score -= RAMMED_PENALTY;
    } else if structure.blocked.is_blocked() {
        score -= OBSTRUCTED_PENALTY;
    }
    if structure.hanging {
        score -= HANGING_PENALTY;
    }
    score.clamp(0.0, Criterion::Structure.max())
}

pub(super) fn advancement_score(sq: Square, color: Color) -> f64 {
    let start = color.relative_rank(color.pawn_rank());
    let steps = f64::from(color.relative_rank(sq.rank())) - f64::from(start);
    (steps / ADVANCE_SPAN * Criterion::Advancement.max()).clamp(0.0, Criterion::Advancement.max())
}

pub(super) fn metrics(ctx: &EvalContext<'_>, sq: Square, color: Color) -> Vec<Metric> {
    let structure = &ctx.board[sq].pawn_structure;
    vec![
        Metric::computed(Criterion::Structure, structure_score(structure)),
        Metric::computed(Criterion::Advancement, advancement_score(sq, color)),
    ]
}
