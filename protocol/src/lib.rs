//! The wire schema for messages exchanged between a player's connection and
//! the server. JSON in both directions; tagged unions discriminated by
//! `action_type` (inbound) and `update_type` (outbound).

use serde::{Deserialize, Serialize};

use game_core::{
    Event, GameAction, GameStatus, HexCoord, PlayerId, PlayerRequest as CorePlayerRequest,
    TroopKind, Update,
};

/// A hex coordinate as it crosses the wire. Identical shape to
/// [`game_core::HexCoord`]; kept separate so the wire format doesn't change
/// silently if the domain type grows fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCoord {
    pub q: i32,
    pub r: i32,
}

impl From<HexCoord> for WireCoord {
    fn from(c: HexCoord) -> Self {
        WireCoord { q: c.q, r: c.r }
    }
}

impl From<WireCoord> for HexCoord {
    fn from(c: WireCoord) -> Self {
        HexCoord::new(c.q, c.r)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireTroopKind {
    TriangleTroop,
    SquareTroop,
    PentagonTroop,
}

impl From<WireTroopKind> for TroopKind {
    fn from(k: WireTroopKind) -> Self {
        match k {
            WireTroopKind::TriangleTroop => TroopKind::Triangle,
            WireTroopKind::SquareTroop => TroopKind::Square,
            WireTroopKind::PentagonTroop => TroopKind::Pentagon,
        }
    }
}

/// The `owner` sub-object a spawn request carries. The server never trusts
/// this for authorization — the owner of a spawn is always the connection
/// that sent it — but the field is part of the wire shape, so it is parsed
/// and discarded rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOwner {
    pub id: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTroop {
    pub troop_type: WireTroopKind,
    pub owner: WireOwner,
}

/// Inbound request, tagged by `action_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum WirePlayerRequest {
    MarchTroopAction {
        starting_coordinates: WireCoord,
        destination_coordinates: WireCoord,
    },
    SpawnTroopAction {
        coordinates: WireCoord,
        troop: WireTroop,
    },
    ClearActionsRequest,
}

/// Per-variant default costs, per spec §3: March defaults to 1, Spawn to 2.
/// Overridable via [`game_core::GameConfig`].
pub struct ActionCosts {
    pub march: u32,
    pub spawn: u32,
}

impl WirePlayerRequest {
    /// Converts an inbound request into the domain type, attaching the
    /// configured action costs. The request's own `owner` sub-field is
    /// never consulted — ownership comes from the authenticated connection.
    pub fn into_domain(self, costs: &ActionCosts) -> CorePlayerRequest {
        match self {
            WirePlayerRequest::MarchTroopAction {
                starting_coordinates,
                destination_coordinates,
            } => CorePlayerRequest::PerformAction(GameAction::march(
                starting_coordinates.into(),
                destination_coordinates.into(),
                costs.march,
            )),
            WirePlayerRequest::SpawnTroopAction { coordinates, troop } => {
                CorePlayerRequest::PerformAction(GameAction::spawn(
                    coordinates.into(),
                    troop.troop_type.into(),
                    costs.spawn,
                ))
            }
            WirePlayerRequest::ClearActionsRequest => CorePlayerRequest::ClearActions,
        }
    }
}

/// Error reply sent for a frame that could not be decoded at all. The
/// connection is kept open; only the frame is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRequestReply {
    pub error: String,
}

impl Default for InvalidRequestReply {
    fn default() -> Self {
        InvalidRequestReply {
            error: "invalid_request".to_string(),
        }
    }
}

/// Outbound message, tagged by `update_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "update_type", rename_all = "snake_case")]
pub enum WireUpdate {
    GameStatusUpdate { status: GameStatus },
    GameEventUpdate { event: Event },
    GameOverUpdate { winner: Option<PlayerId> },
    PlanningPhaseTimeUpdate { remaining_seconds: f64 },
    RemainingActionPointsUpdate { remaining: i64 },
    ApprovedActionUpdate { action: GameAction },
    InsufficientActionPointsUpdate,
    IllegalActionUpdate { action: GameAction },
}

impl From<Update> for WireUpdate {
    fn from(update: Update) -> Self {
        match update {
            Update::GameStatusUpdate(status) => WireUpdate::GameStatusUpdate { status },
            Update::GameEventUpdate(event) => WireUpdate::GameEventUpdate { event },
            Update::GameOverUpdate { winner } => WireUpdate::GameOverUpdate { winner },
            Update::PlanningPhaseTimeUpdate { remaining_seconds } => {
                WireUpdate::PlanningPhaseTimeUpdate { remaining_seconds }
            }
            Update::RemainingActionPointsUpdate { remaining } => {
                WireUpdate::RemainingActionPointsUpdate { remaining }
            }
            Update::ApprovedActionUpdate { action } => WireUpdate::ApprovedActionUpdate { action },
            Update::InsufficientActionPointsUpdate => WireUpdate::InsufficientActionPointsUpdate,
            Update::IllegalActionUpdate { action } => WireUpdate::IllegalActionUpdate { action },
        }
    }
}

/// Connect-time query parameters, validated before the websocket upgrade
/// completes. An invalid value here closes with HTTP 400 rather than
/// producing a protocol error frame.
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectParams {
    pub username: String,
    #[serde(default = "default_lobby_size")]
    pub lobby_size: usize,
}

fn default_lobby_size() -> usize {
    5
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectBounds {
    pub username_len: std::ops::RangeInclusive<usize>,
    pub lobby_size: std::ops::RangeInclusive<usize>,
}

impl ConnectParams {
    pub fn validate(&self, bounds: &ConnectBounds) -> Result<(), &'static str> {
        if !bounds.username_len.contains(&self.username.len()) {
            return Err("username length out of range");
        }
        if !bounds.lobby_size.contains(&self.lobby_size) {
            return Err("lobby_size out of range");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn march_request_attaches_configured_cost() {
        let wire = WirePlayerRequest::MarchTroopAction {
            starting_coordinates: WireCoord { q: 0, r: 0 },
            destination_coordinates: WireCoord { q: 1, r: 0 },
        };
        let costs = ActionCosts { march: 1, spawn: 2 };
        let domain = wire.into_domain(&costs);
        match domain {
            CorePlayerRequest::PerformAction(GameAction::March { cost, .. }) => {
                assert_eq!(cost, 1)
            }
            _ => panic!("expected a march action"),
        }
    }

    #[test]
    fn connect_params_reject_out_of_range_username() {
        let params = ConnectParams {
            username: "a".to_string(),
            lobby_size: 5,
        };
        let bounds = ConnectBounds {
            username_len: 3..=8,
            lobby_size: 3..=8,
        };
        assert!(params.validate(&bounds).is_err());
    }

    #[test]
    fn connect_params_default_lobby_size_when_omitted() {
        let params: ConnectParams = serde_json::from_str(r#"{"username": "carl"}"#).unwrap();
        assert_eq!(params.lobby_size, 5);
    }

    #[test]
    fn connect_params_accept_in_range_values() {
        let params = ConnectParams {
            username: "carl".to_string(),
            lobby_size: 5,
        };
        let bounds = ConnectBounds {
            username_len: 3..=8,
            lobby_size: 3..=8,
        };
        assert!(params.validate(&bounds).is_ok());
    }
}
