//! Attacker and defender sets for every square.

use chess_core::Color;
use chess_rules::{Position, RulesAuthority};

use crate::board::Board;

/// Fills `attackers` and `defenders` on every square of `board`.
///
/// On an occupied square attackers are the enemy's controllers and
/// defenders the occupant's own. On an empty square attackers are Black's
/// controllers and defenders are White's.
pub fn resolve_control<R>(rules: &R, position: &Position, board: &mut Board)
where
    R: RulesAuthority + ?Sized,
{
    for cell in board.iter_mut() {
        let (attacking, defending) = match cell.occupant {
            Some(occupant) => (occupant.color.opposite(), occupant.color),
            None => (Color::Black, Color::White),
        };
        cell.attackers = rules.attackers(position, cell.square, attacking).squares();
        cell.defenders = rules.attackers(position, cell.square, defending).squares();
    }
}
