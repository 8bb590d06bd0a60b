//! Consecutive-turn core-occupancy tracking.

use serde::{Deserialize, Serialize};

use crate::troop::Troop;

/// Tracks how many consecutive turn-ends a single troop has occupied the
/// core tile. Monotone: re-observing the same occupant increments
/// `turns_held`; any other occupant (including none) resets the counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreControlScore {
    occupant: Option<Troop>,
    turns_held: u32,
}

impl CoreControlScore {
    pub fn new() -> Self {
        CoreControlScore::default()
    }

    pub fn occupant(&self) -> Option<Troop> {
        self.occupant
    }

    pub fn turns_held(&self) -> u32 {
        self.turns_held
    }

    /// Folds in the troop currently observed on the core tile (`None` if the
    /// core is empty), returning the updated score.
    pub fn observe(self, current_core_occupant: Option<Troop>) -> CoreControlScore {
        match current_core_occupant {
            None => CoreControlScore {
                occupant: None,
                turns_held: 0,
            },
            Some(troop) if self.occupant == Some(troop) => CoreControlScore {
                occupant: Some(troop),
                turns_held: self.turns_held + 1,
            },
            Some(troop) => CoreControlScore {
                occupant: Some(troop),
                turns_held: 1,
            },
        }
    }
}
