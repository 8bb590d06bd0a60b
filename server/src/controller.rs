//! The per-match game controller: a single task owning `status` and the
//! pending-actions map exclusively, driving the planning/resolution cycle
//! and serializing player requests against it. Realized as a `tokio::select!`
//! loop over a mailbox and internal timers — the single-goroutine-plus-channel
//! alternative the design allows, in place of a fully generic message enum
//! (`PlayerRequest`/`ClearActions` are still mailbox messages; phase timing
//! is driven by direct `tokio::time` awaits in the same loop, so the two
//! sources of work are still mutually exclusive on one task).

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{
    GameAction, GameConfig, GameStatus, PlayerId, PlayerRequest as CorePlayerRequest, Update,
    accountant, is_valid, update,
};

use crate::session::UpdateSink;

enum ControllerMessage {
    PlayerRequest { player: PlayerId, action: GameAction },
    ClearActions { player: PlayerId },
}

#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::UnboundedSender<ControllerMessage>,
}

impl ControllerHandle {
    /// Forwards an inbound player request to the controller's mailbox.
    /// Dropped silently if the controller has already shut down — the
    /// session will be tearing down its subscriptions around the same time.
    pub fn submit(&self, player: PlayerId, request: CorePlayerRequest) {
        let message = match request {
            CorePlayerRequest::PerformAction(action) => {
                ControllerMessage::PlayerRequest { player, action }
            }
            CorePlayerRequest::ClearActions => ControllerMessage::ClearActions { player },
        };
        let _ = self.sender.send(message);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    BroadcastStatus,
    Planning,
    Resolution,
    CheckEnd,
}

struct ControllerState {
    status: GameStatus,
    pending: HashMap<PlayerId, Vec<GameAction>>,
    config: GameConfig,
    sink: UpdateSink,
}

/// Spawns the controller task, returning a handle for submitting requests
/// and a join handle that resolves once the match ends (winner decided).
pub fn spawn_controller(
    players: Vec<PlayerId>,
    status: GameStatus,
    config: GameConfig,
    sink: UpdateSink,
) -> (ControllerHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = ControllerHandle { sender: tx };
    let state = ControllerState {
        status,
        pending: players.into_iter().map(|p| (p, Vec::new())).collect(),
        config,
        sink,
    };
    let join = tokio::spawn(run(state, rx));
    (handle, join)
}

async fn run(mut state: ControllerState, mut rx: mpsc::UnboundedReceiver<ControllerMessage>) {
    let mut phase = Phase::BroadcastStatus;
    loop {
        phase = match phase {
            Phase::BroadcastStatus => broadcast_status(&mut state, &mut rx),
            Phase::Planning => planning(&mut state, &mut rx).await,
            Phase::Resolution => resolution(&mut state).await,
            Phase::CheckEnd => {
                if state.status.winner.is_some() {
                    state.sink.broadcast(Update::GameOverUpdate {
                        winner: state.status.winner,
                    });
                    tracing::info!(winner = ?state.status.winner, "match ended");
                    return;
                }
                Phase::BroadcastStatus
            }
        };
    }
}

fn broadcast_status(
    state: &mut ControllerState,
    rx: &mut mpsc::UnboundedReceiver<ControllerMessage>,
) -> Phase {
    // No requests are meaningful outside Planning; drain and discard
    // anything that arrived while we were resolving the previous turn.
    while rx.try_recv().is_ok() {}

    state
        .sink
        .broadcast(Update::GameStatusUpdate(state.status.clone()));
    for player in state.pending.keys() {
        state.sink.send_private(
            *player,
            Update::RemainingActionPointsUpdate {
                remaining: state.config.default_action_points,
            },
        );
    }
    for actions in state.pending.values_mut() {
        actions.clear();
    }
    Phase::Planning
}

async fn planning(
    state: &mut ControllerState,
    rx: &mut mpsc::UnboundedReceiver<ControllerMessage>,
) -> Phase {
    let deadline = tokio::time::Instant::now() + state.config.turn_preparation_time;
    let mut countdown = tokio::time::interval(Duration::from_millis(200));
    countdown.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => return Phase::Resolution,
            _ = countdown.tick() => {
                let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
                let remaining_seconds = (remaining.as_secs_f64() * 100.0).round() / 100.0;
                state.sink.broadcast(Update::PlanningPhaseTimeUpdate {
                    remaining_seconds: remaining_seconds.max(0.0),
                });
            }
            Some(message) = rx.recv() => handle_request(state, message),
        }
    }
}

fn handle_request(state: &mut ControllerState, message: ControllerMessage) {
    match message {
        ControllerMessage::ClearActions { player } => {
            if let Some(actions) = state.pending.get_mut(&player) {
                actions.clear();
            }
            state.sink.send_private(
                player,
                Update::RemainingActionPointsUpdate {
                    remaining: state.config.default_action_points,
                },
            );
        }
        ControllerMessage::PlayerRequest { player, action } => {
            let Some(accepted) = state.pending.get(&player) else {
                return;
            };
            let mut candidate = accepted.clone();
            candidate.push(action);
            let remaining =
                accountant::remaining_action_points(state.config.default_action_points, candidate);
            if remaining < 0 {
                state
                    .sink
                    .send_private(player, Update::InsufficientActionPointsUpdate);
                return;
            }
            if !is_valid(player, action, &state.status) {
                state
                    .sink
                    .send_private(player, Update::IllegalActionUpdate { action });
                return;
            }
            state.pending.get_mut(&player).unwrap().push(action);
            state
                .sink
                .send_private(player, Update::ApprovedActionUpdate { action });
            state
                .sink
                .send_private(player, Update::RemainingActionPointsUpdate { remaining });
        }
    }
}

async fn resolution(state: &mut ControllerState) -> Phase {
    let actions = state.pending.clone();
    let (events, new_status) = update(&state.status, &actions, is_valid, &state.config);
    state.status = new_status;

    for event in events {
        state.sink.broadcast(Update::GameEventUpdate(event));
        tokio::time::sleep(state.config.event_broadcast_delay).await;
    }
    tokio::time::sleep(state.config.event_broadcast_delay).await;
    Phase::CheckEnd
}
