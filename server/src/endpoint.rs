//! Per-connection lifecycle: validate connect params, upgrade to a
//! websocket, bridge the connection to its player's pub/sub topics, and
//! clean up on disconnect.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use game_core::{Player, PlayerId};
use protocol::{ActionCosts, ConnectParams, InvalidRequestReply, WirePlayerRequest, WireUpdate};

use crate::AppState;
use crate::session::{request_topic, update_topic};

pub async fn handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if let Err(reason) = params.validate(&state.config.connect_bounds()) {
        return (StatusCode::BAD_REQUEST, reason).into_response();
    }
    ws.on_upgrade(move |socket| handle_connection(socket, state, params))
}

/// Serializes `update` and forwards it on `tx`, dropping it silently if the
/// writer task has already exited.
fn forward_update(tx: &tokio::sync::mpsc::UnboundedSender<String>, update: game_core::Update) {
    let wire: WireUpdate = update.into();
    if let Ok(text) = serde_json::to_string(&wire) {
        let _ = tx.send(text);
    }
}

async fn handle_connection(socket: WebSocket, state: Arc<AppState>, params: ConnectParams) {
    let player_id = PlayerId(state.next_player_id());
    let player = Player {
        id: player_id,
        username: params.username,
    };
    tracing::info!(?player_id, username = %player.username, "player connected");

    let (mut sink, mut stream) = socket.split();
    let (outbound_tx, mut outbound_rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let update_topic = update_topic(player_id);
    let forward_tx = outbound_tx.clone();
    let subscription = state
        .updates
        .subscribe(update_topic.clone(), move |update| {
            forward_update(&forward_tx, update);
        });

    let writer = tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let costs = ActionCosts {
        march: state.config.game.march_action_points,
        spawn: state.config.game.spawn_action_points,
    };
    let request_topic = request_topic(player_id);

    for group in state.lobby.add_player(params.lobby_size, player) {
        state.start_session(group).await;
    }

    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(?player_id, %error, "websocket read error");
                break;
            }
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        match serde_json::from_str::<WirePlayerRequest>(&text) {
            Ok(request) => {
                state
                    .requests
                    .publish(&request_topic, request.into_domain(&costs));
            }
            Err(error) => {
                tracing::debug!(?player_id, %error, "failed to decode player request");
                if let Ok(reply) = serde_json::to_string(&InvalidRequestReply::default()) {
                    let _ = outbound_tx.send(reply);
                }
            }
        }
    }

    tracing::info!(?player_id, "player disconnected");
    state.lobby.remove_player(player_id);
    state.updates.unsubscribe(&update_topic, subscription);
    writer.abort();
}
