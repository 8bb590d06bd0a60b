//! The hex board: a fixed set of addressable coordinates, each either empty
//! or occupied by a single troop.
//!
//! A `Board` is treated as an immutable snapshot: every mutating operation
//! takes `&self` and returns a new `Board`, leaving the receiver untouched.
//! The coordinate domain (the set of addressable tiles) is fixed at
//! construction and preserved across every operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GameCoreError;
use crate::hex::HexCoord;
use crate::player::PlayerId;
use crate::troop::Troop;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: HashMap<HexCoord, Option<Troop>>,
}

impl Board {
    /// Builds a board whose domain is exactly the given coordinates, all
    /// initially empty.
    pub fn new(coordinates: impl IntoIterator<Item = HexCoord>) -> Self {
        Board {
            tiles: coordinates.into_iter().map(|c| (c, None)).collect(),
        }
    }

    pub fn contains_coordinate(&self, coordinate: HexCoord) -> bool {
        self.tiles.contains_key(&coordinate)
    }

    pub fn domain(&self) -> impl Iterator<Item = HexCoord> {
        self.tiles.keys().copied().collect::<Vec<_>>().into_iter()
    }

    /// The troop at `coordinate`, or `None` if the tile is empty.
    ///
    /// Errors if `coordinate` is outside the board's domain — addressing an
    /// off-board coordinate is always a caller bug (the validator is
    /// supposed to reject it first).
    pub fn occupant(&self, coordinate: HexCoord) -> Result<Option<Troop>, GameCoreError> {
        self.tiles
            .get(&coordinate)
            .copied()
            .ok_or(GameCoreError::CoordinateNotOnBoard(coordinate))
    }

    pub fn is_empty_at(&self, coordinate: HexCoord) -> Result<bool, GameCoreError> {
        Ok(self.occupant(coordinate)?.is_none())
    }

    /// Places `troop` at `coordinate`, overwriting whatever was there.
    pub fn place(&self, coordinate: HexCoord, troop: Troop) -> Result<Board, GameCoreError> {
        if !self.contains_coordinate(coordinate) {
            return Err(GameCoreError::CoordinateNotOnBoard(coordinate));
        }
        let mut tiles = self.tiles.clone();
        tiles.insert(coordinate, Some(troop));
        Ok(Board { tiles })
    }

    /// Moves whatever occupies `from` to `to`. The source tile becomes
    /// empty; the destination is overwritten.
    pub fn move_troop(&self, from: HexCoord, to: HexCoord) -> Result<Board, GameCoreError> {
        let moving = self.occupant(from)?;
        if !self.contains_coordinate(to) {
            return Err(GameCoreError::CoordinateNotOnBoard(to));
        }
        let mut tiles = self.tiles.clone();
        tiles.insert(from, None);
        tiles.insert(to, moving);
        Ok(Board { tiles })
    }

    pub fn remove_at(&self, coordinate: HexCoord) -> Result<Board, GameCoreError> {
        if !self.contains_coordinate(coordinate) {
            return Err(GameCoreError::CoordinateNotOnBoard(coordinate));
        }
        let mut tiles = self.tiles.clone();
        tiles.insert(coordinate, None);
        Ok(Board { tiles })
    }

    /// Removes every troop owned by `player`, leaving those tiles empty.
    pub fn remove_all_owned_by(&self, player: PlayerId) -> Board {
        let tiles = self
            .tiles
            .iter()
            .map(|(coord, occupant)| {
                let occupant = match occupant {
                    Some(troop) if troop.owner == player => None,
                    other => *other,
                };
                (*coord, occupant)
            })
            .collect();
        Board { tiles }
    }

    /// Count of troops currently on the board for each player that has at
    /// least one.
    pub fn troop_counts(&self) -> HashMap<PlayerId, usize> {
        let mut counts = HashMap::new();
        for troop in self.tiles.values().flatten() {
            *counts.entry(troop.owner).or_insert(0) += 1;
        }
        counts
    }

    /// The coordinate of `player`'s home base, if it is still on the board.
    pub fn home_base_of(&self, player: PlayerId) -> Option<HexCoord> {
        self.tiles
            .iter()
            .find(|(_, occupant)| {
                matches!(occupant, Some(t) if t.is_home_base() && t.owner == player)
            })
            .map(|(coord, _)| *coord)
    }
}
