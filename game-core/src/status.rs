//! The immutable per-turn snapshot the updater transitions between.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::control_score::CoreControlScore;
use crate::hex::HexCoord;
use crate::player::{PlayerId, PlayerOrder};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub turn_number: u32,
    pub player_order: PlayerOrder,
    pub board: Board,
    pub control_score: CoreControlScore,
    pub winner: Option<PlayerId>,
    /// The distinguished tile the core-control win condition watches. Fixed
    /// for the life of the match; chosen once at session setup (see
    /// `levelgen::core_coordinate_for`).
    pub core_coordinate: HexCoord,
}

impl GameStatus {
    pub fn new(player_order: PlayerOrder, board: Board, core_coordinate: HexCoord) -> Self {
        GameStatus {
            turn_number: 0,
            player_order,
            board,
            control_score: CoreControlScore::new(),
            winner: None,
            core_coordinate,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;

    #[test]
    fn fresh_status_has_no_winner_and_turn_zero() {
        let board = Board::new([HexCoord::ORIGIN]);
        let order = PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]);
        let status = GameStatus::new(order, board, HexCoord::ORIGIN);
        assert_eq!(status.turn_number, 0);
        assert!(!status.is_over());
    }
}
