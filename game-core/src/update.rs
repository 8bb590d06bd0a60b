//! The `Update` variants a session publishes to players. Broadcast variants
//! go to every player in the match; private variants are addressed to a
//! single player in response to their own request.

use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::event::Event;
use crate::player::PlayerId;
use crate::status::GameStatus;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Update {
    // --- broadcast ---
    GameStatusUpdate(GameStatus),
    GameEventUpdate(Event),
    GameOverUpdate { winner: Option<PlayerId> },
    PlanningPhaseTimeUpdate { remaining_seconds: f64 },

    // --- private ---
    RemainingActionPointsUpdate { remaining: i64 },
    ApprovedActionUpdate { action: GameAction },
    InsufficientActionPointsUpdate,
    IllegalActionUpdate { action: GameAction },
}

impl Update {
    /// True for the variants the controller sends to every player in the
    /// match, as opposed to a single requester.
    pub fn is_broadcast(&self) -> bool {
        matches!(
            self,
            Update::GameStatusUpdate(_)
                | Update::GameEventUpdate(_)
                | Update::GameOverUpdate { .. }
                | Update::PlanningPhaseTimeUpdate { .. }
        )
    }
}
