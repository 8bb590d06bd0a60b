//! Events emitted by the updater while resolving a turn.

use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::hex::HexCoord;
use crate::player::PlayerId;
use crate::troop::Troop;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A troop moved onto an empty tile.
    TroopMoved {
        troop: Troop,
        from: HexCoord,
        to: HexCoord,
    },
    /// An attacker defeated a defender and occupies its tile.
    AttackWon {
        attacker: Troop,
        defender: Troop,
        from: HexCoord,
        to: HexCoord,
    },
    /// An attacker was defeated and removed from the board.
    AttackLost {
        attacker: Troop,
        defender: Troop,
        at: HexCoord,
    },
    /// A new troop was placed on the board.
    TroopSpawned { troop: Troop, coord: HexCoord },
    /// A player's home base was captured; they are eliminated.
    PlayerRemoved { player: PlayerId },
    /// The action was re-validated and found invalid, or resolved to a tie
    /// (equal-strength march), leaving the board unchanged.
    NoChanges { action: GameAction },
}
