//! Players and the turn-order sequence.

use serde::{Deserialize, Serialize};

/// Opaque, session-local player identifier. Assigned by the lobby scheduler
/// at match start and never reused within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// A connected player. Identity is [`PlayerId`] alone; `username` is
/// display-only and never compared for equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Player {}

/// Ordered, duplicate-free sequence of players, rotated once per turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOrder(Vec<PlayerId>);

impl PlayerOrder {
    pub fn new(players: Vec<PlayerId>) -> Self {
        debug_assert!(
            {
                let mut sorted = players.clone();
                sorted.sort();
                sorted.dedup();
                sorted.len() == players.len()
            },
            "player order must not contain duplicates"
        );
        PlayerOrder(players)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.0.contains(&player)
    }

    pub fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.0.iter().position(|p| *p == player)
    }

    /// Removes a player, preserving the relative order of the rest.
    pub fn remove(&mut self, player: PlayerId) {
        self.0.retain(|p| *p != player);
    }

    /// Rotates the first player to the last position. No-op on an empty or
    /// single-player order.
    pub fn rotate(&mut self) {
        if self.0.len() > 1 {
            self.0.rotate_left(1);
        }
    }

    pub fn first(&self) -> Option<PlayerId> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[u32]) -> PlayerOrder {
        PlayerOrder::new(ids.iter().copied().map(PlayerId).collect())
    }

    #[test]
    fn rotate_moves_first_to_last() {
        let mut o = order(&[1, 2, 3]);
        o.rotate();
        assert_eq!(o.as_slice(), &[PlayerId(2), PlayerId(3), PlayerId(1)]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut o = order(&[1, 2, 3, 4]);
        o.remove(PlayerId(2));
        assert_eq!(
            o.as_slice(),
            &[PlayerId(1), PlayerId(3), PlayerId(4)]
        );
    }

    #[test]
    fn remove_unknown_player_is_noop() {
        let mut o = order(&[1, 2]);
        o.remove(PlayerId(99));
        assert_eq!(o.len(), 2);
    }
}
