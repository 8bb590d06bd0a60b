//! Admission queueing: buckets players by requested lobby size and starts a
//! match once a bucket fills. All mutation goes through a single `Mutex`,
//! mirroring the reference crate's `AppState.rooms: Mutex<HashMap<...>>` —
//! the lock is held only across the synchronous bookkeeping, dropped before
//! any `.await` (session/controller startup happens after the guard drops).

use std::collections::HashMap;
use std::sync::Mutex;

use game_core::{Player, PlayerId};

/// FIFO queues of waiting players, keyed by the lobby size they asked for,
/// plus the indices needed for O(1) removal by player id.
#[derive(Default)]
struct LobbyState {
    queues: HashMap<usize, Vec<PlayerId>>,
    bucket_of: HashMap<PlayerId, usize>,
    players: HashMap<PlayerId, Player>,
}

#[derive(Default)]
pub struct LobbyScheduler {
    state: Mutex<LobbyState>,
}

impl LobbyScheduler {
    pub fn new() -> Self {
        LobbyScheduler::default()
    }

    /// Enrolls `player` into the `lobby_size` bucket, then checks whether
    /// any bucket is ready to start. Returns the groups of players ready to
    /// start a match (usually at most one, but `check_lobbies` scans every
    /// bucket so it's a `Vec` in general).
    pub fn add_player(&self, lobby_size: usize, player: Player) -> Vec<Vec<Player>> {
        let mut state = self.state.lock().expect("lobby lock poisoned");
        if !state.bucket_of.contains_key(&player.id) {
            state.bucket_of.insert(player.id, lobby_size);
            state.players.insert(player.id, player.clone());
            state.queues.entry(lobby_size).or_default().push(player.id);
        }
        check_lobbies(&mut state)
    }

    /// Removes `player_id` from whichever bucket it is in. A no-op for an
    /// unknown player.
    pub fn remove_player(&self, player_id: PlayerId) {
        let mut state = self.state.lock().expect("lobby lock poisoned");
        if let Some(bucket) = state.bucket_of.remove(&player_id) {
            if let Some(queue) = state.queues.get_mut(&bucket) {
                queue.retain(|p| *p != player_id);
            }
        }
        state.players.remove(&player_id);
    }
}

/// Pops every bucket whose queue has reached its own size, clearing the
/// popped players from the indices and resolving them to full `Player`
/// records.
fn check_lobbies(state: &mut LobbyState) -> Vec<Vec<Player>> {
    let mut ready = Vec::new();
    let sizes: Vec<usize> = state.queues.keys().copied().collect();
    for size in sizes {
        while state.queues.get(&size).map(Vec::len).unwrap_or(0) >= size && size > 0 {
            let queue = state.queues.get_mut(&size).unwrap();
            let group: Vec<PlayerId> = queue.drain(..size).collect();
            let players = group
                .iter()
                .map(|id| {
                    state.bucket_of.remove(id);
                    state.players.remove(id).expect("indexed player missing")
                })
                .collect();
            ready.push(players);
        }
    }
    ready
}
