//! Pure predicate over `(player, action, status)`. Never mutates; never
//! errors — an out-of-domain coordinate is simply invalid, not a fault.

use crate::action::GameAction;
use crate::player::PlayerId;
use crate::status::GameStatus;
use crate::troop::TroopKind;

/// Whether `player` may legally apply `action` against `status`.
pub fn is_valid(player: PlayerId, action: GameAction, status: &GameStatus) -> bool {
    match action {
        GameAction::March { from, to, .. } => {
            let board = &status.board;
            if !board.contains_coordinate(from) || !board.contains_coordinate(to) {
                return false;
            }
            matches!(board.occupant(from), Ok(Some(troop)) if troop.owner == player)
        }
        GameAction::Spawn {
            coord, troop_kind, ..
        } => {
            if !matches!(
                troop_kind,
                TroopKind::Triangle | TroopKind::Square | TroopKind::Pentagon
            ) {
                return false;
            }
            let board = &status.board;
            if !board.contains_coordinate(coord) {
                return false;
            }
            if !matches!(board.occupant(coord), Ok(None)) {
                return false;
            }
            match board.home_base_of(player) {
                Some(base) => base.is_adjacent(coord),
                None => false,
            }
        }
    }
}
