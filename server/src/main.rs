mod config;
mod controller;
mod endpoint;
mod error;
mod level;
mod lobby;
mod pubsub;
mod session;

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::get;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_core::{Player, PlayerRequest, Update};

use crate::config::ServerConfig;
use crate::lobby::LobbyScheduler;
use crate::pubsub::PubSub;
use crate::session::Session;

pub struct AppState {
    config: ServerConfig,
    lobby: LobbyScheduler,
    requests: Arc<PubSub<PlayerRequest>>,
    updates: Arc<PubSub<Update>>,
    sessions: Mutex<HashMap<u64, Session>>,
    next_session_id: AtomicU64,
    next_player_id: AtomicU32,
}

impl AppState {
    fn new(config: ServerConfig) -> Self {
        AppState {
            config,
            lobby: LobbyScheduler::new(),
            requests: Arc::new(PubSub::new()),
            updates: Arc::new(PubSub::new()),
            sessions: Mutex::new(HashMap::new()),
            next_session_id: AtomicU64::new(0),
            next_player_id: AtomicU32::new(0),
        }
    }

    fn next_player_id(&self) -> u32 {
        self.next_player_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Builds the match's initial board, starts its controller, and
    /// registers the session so `/rooms` can report on it. Spawns a
    /// watcher that tears the session's request routing down once the
    /// controller's run loop finishes.
    async fn start_session(self: &Arc<Self>, players: Vec<Player>) {
        let status = level::build_initial_status(
            Path::new(&self.config.level_directory),
            &players,
            self.config.game.random_seed,
        )
        .await;

        let (session, done) = Session::start(
            players,
            status,
            self.config.game,
            self.updates.clone(),
            self.requests.clone(),
        );
        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        self.sessions
            .lock()
            .expect("session registry lock poisoned")
            .insert(session_id, session);

        let state = self.clone();
        tokio::spawn(async move {
            let _ = done.await;
            let session = state
                .sessions
                .lock()
                .expect("session registry lock poisoned")
                .remove(&session_id);
            if let Some(session) = session {
                session.game_is_over(&state.requests);
            }
        });
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .init();

    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/ws", get(endpoint::handler))
        .route("/healthz", get(healthz_handler))
        .route("/rooms", get(rooms_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|error| panic!("failed to bind {bind_addr}: {error}"));

    tracing::info!(%bind_addr, "listening");
    axum::serve(listener, app).await.unwrap();
}

async fn healthz_handler() -> &'static str {
    "ok"
}

/// Lists active matches and their player counts, the analogue of the
/// reference crate's room-enlisting endpoint.
async fn rooms_handler(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> String {
    let sessions = state.sessions.lock().expect("session registry lock poisoned");
    if sessions.is_empty() {
        return "No active matches.".to_string();
    }
    sessions
        .iter()
        .map(|(id, session)| format!("Match {:<6} Players: {:02}", id, session.player_count()))
        .collect::<Vec<_>>()
        .join("\n")
}
