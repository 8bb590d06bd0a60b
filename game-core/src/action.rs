//! Player-submitted actions and requests.

use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;
use crate::troop::TroopKind;

/// A single game action a player wants applied. `cost` is carried on the
/// action itself (rather than looked up by variant) so the accountant and
/// updater stay agnostic of the current action-point configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    March {
        from: HexCoord,
        to: HexCoord,
        cost: u32,
    },
    Spawn {
        coord: HexCoord,
        troop_kind: TroopKind,
        cost: u32,
    },
}

impl GameAction {
    pub fn march(from: HexCoord, to: HexCoord, cost: u32) -> Self {
        GameAction::March { from, to, cost }
    }

    pub fn spawn(coord: HexCoord, troop_kind: TroopKind, cost: u32) -> Self {
        GameAction::Spawn {
            coord,
            troop_kind,
            cost,
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            GameAction::March { cost, .. } => *cost,
            GameAction::Spawn { cost, .. } => *cost,
        }
    }
}

/// A request a player sends during the planning phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRequest {
    PerformAction(GameAction),
    ClearActions,
}
