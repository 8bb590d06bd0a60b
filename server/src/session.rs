//! The routing facade between a match's game controller and its players'
//! connections. A session owns topic subscriptions, never connections
//! themselves — that indirection is what lets the controller (and this
//! module) stay ignorant of transport.

use std::sync::Arc;

use game_core::{GameConfig, GameStatus, Player, PlayerId, PlayerRequest, Update};

use crate::controller::{ControllerHandle, spawn_controller};
use crate::pubsub::{PubSub, SubscriptionId};

pub fn request_topic(player: PlayerId) -> String {
    format!("req:{}", player.0)
}

pub fn update_topic(player: PlayerId) -> String {
    format!("upd:{}", player.0)
}

/// Publishes [`Update`]s to per-player topics. Shared between the session
/// (which hands it to the controller at spawn time) and the endpoint (which
/// subscribes a connection's write path to its own topic).
#[derive(Clone)]
pub struct UpdateSink {
    updates: Arc<PubSub<Update>>,
    players: Arc<Vec<PlayerId>>,
}

impl UpdateSink {
    pub fn new(updates: Arc<PubSub<Update>>, players: Vec<PlayerId>) -> Self {
        UpdateSink {
            updates,
            players: Arc::new(players),
        }
    }

    pub fn broadcast(&self, update: Update) {
        for player in self.players.iter() {
            self.updates.publish(&update_topic(*player), update.clone());
        }
    }

    pub fn send_private(&self, player: PlayerId, update: Update) {
        self.updates.publish(&update_topic(player), update);
    }
}

/// A running match: the controller plus the bookkeeping needed to tear its
/// request subscriptions down when the game ends.
pub struct Session {
    controller: ControllerHandle,
    request_subscriptions: Vec<(String, SubscriptionId)>,
}

impl Session {
    /// Starts a match for `players`: subscribes a forwarding handler per
    /// player on their request topic, spawns the controller, and returns
    /// the running session plus a future that resolves once the match ends.
    pub fn start(
        players: Vec<Player>,
        status: GameStatus,
        config: GameConfig,
        updates: Arc<PubSub<Update>>,
        requests: Arc<PubSub<PlayerRequest>>,
    ) -> (Session, tokio::task::JoinHandle<()>) {
        let player_ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let sink = UpdateSink::new(updates, player_ids.clone());
        let (controller, done) = spawn_controller(player_ids.clone(), status, config, sink);

        let mut request_subscriptions = Vec::new();
        for player_id in player_ids {
            let topic = request_topic(player_id);
            let forward_to = controller.clone();
            let id = requests.subscribe(topic.clone(), move |request| {
                forward_to.submit(player_id, request);
            });
            request_subscriptions.push((topic, id));
        }

        (
            Session {
                controller,
                request_subscriptions,
            },
            done,
        )
    }

    /// Tears down per-player request routing. Called once the controller's
    /// completion future resolves.
    pub fn game_is_over(&self, requests: &PubSub<PlayerRequest>) {
        for (topic, id) in &self.request_subscriptions {
            requests.unsubscribe(topic, *id);
        }
    }

    pub fn controller(&self) -> &ControllerHandle {
        &self.controller
    }

    pub fn player_count(&self) -> usize {
        self.request_subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use game_core::{Board, GameAction, HexCoord, PlayerOrder, Troop, TroopKind};

    fn player(id: u32) -> Player {
        Player {
            id: PlayerId(id),
            username: format!("player-{id}"),
        }
    }

    fn fast_config() -> GameConfig {
        GameConfig {
            turn_preparation_time: Duration::from_millis(30),
            default_action_points: 3,
            max_turns: 0,
            winning_core_control_turns: 3,
            march_action_points: 1,
            spawn_action_points: 2,
            random_seed: 1,
            event_broadcast_delay: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn starting_a_session_broadcasts_status_to_every_player() {
        let board = Board::new([HexCoord::ORIGIN, HexCoord::new(1, 0)])
            .place(HexCoord::ORIGIN, Troop::new(TroopKind::HomeBase, PlayerId(0)))
            .unwrap()
            .place(HexCoord::new(1, 0), Troop::new(TroopKind::HomeBase, PlayerId(1)))
            .unwrap();
        let status = GameStatus::new(
            PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]),
            board,
            HexCoord::new(99, 99),
        );

        let updates: Arc<PubSub<Update>> = Arc::new(PubSub::new());
        let requests: Arc<PubSub<PlayerRequest>> = Arc::new(PubSub::new());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        updates.subscribe(update_topic(PlayerId(0)), move |update| {
            let _ = tx.send(update);
        });

        let (session, done) = Session::start(
            vec![player(0), player(1)],
            status,
            fast_config(),
            updates.clone(),
            requests.clone(),
        );

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for the initial status broadcast")
            .expect("channel closed before a status arrived");
        assert!(matches!(first, Update::GameStatusUpdate(_)));

        tokio::time::timeout(Duration::from_secs(2), done)
            .await
            .expect("controller never finished")
            .expect("controller task panicked");
        session.game_is_over(&requests);
    }

    #[tokio::test]
    async fn an_approved_action_triggers_a_private_acknowledgement() {
        let board = Board::new([HexCoord::ORIGIN, HexCoord::new(1, 0), HexCoord::new(2, 0)])
            .place(HexCoord::ORIGIN, Troop::new(TroopKind::HomeBase, PlayerId(0)))
            .unwrap()
            .place(HexCoord::new(2, 0), Troop::new(TroopKind::HomeBase, PlayerId(1)))
            .unwrap();
        let status = GameStatus::new(
            PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]),
            board,
            HexCoord::new(99, 99),
        );

        let updates: Arc<PubSub<Update>> = Arc::new(PubSub::new());
        let requests: Arc<PubSub<PlayerRequest>> = Arc::new(PubSub::new());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        updates.subscribe(update_topic(PlayerId(0)), move |update| {
            let _ = tx.send(update);
        });

        let mut config = fast_config();
        config.turn_preparation_time = Duration::from_millis(500);
        let (session, done) = Session::start(
            vec![player(0), player(1)],
            status,
            config,
            updates.clone(),
            requests.clone(),
        );

        // Drain the initial status/remaining-points broadcast before acting.
        let _ = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        let _ = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;

        requests.publish(
            &request_topic(PlayerId(0)),
            PlayerRequest::PerformAction(GameAction::spawn(
                HexCoord::new(1, 0),
                TroopKind::Triangle,
                2,
            )),
        );

        let mut saw_approval = false;
        for _ in 0..5 {
            let Ok(Some(update)) = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await
            else {
                break;
            };
            if matches!(update, Update::ApprovedActionUpdate { .. }) {
                saw_approval = true;
                break;
            }
        }
        assert!(saw_approval, "expected an approved-action acknowledgement");

        session.game_is_over(&requests);
        let _ = tokio::time::timeout(Duration::from_secs(2), done).await;
    }
}
