//! WebSocket surface: one route, one task per connection, bridging the
//! socket to the coordinator. Inbound frames parse into commands;
//! outbound messages flow through the session's bounded queue. Malformed
//! frames earn the sender an ERROR and the connection stays open.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ServerConfig;
use crate::coordinator::{CommandError, Coordinator, SessionId};
use crate::protocol::{ClientCommand, ServerMessage};

/// Whether the connection task keeps reading after a command.
enum Flow {
    Continue,
    Close,
}

/// Builds the application router: a single `/ws` route.
pub fn router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/ws", get(ws_upgrade))
        .with_state(coordinator)
}

/// Binds and serves until the process is stopped.
pub async fn serve(config: &ServerConfig, coordinator: Arc<Coordinator>) -> std::io::Result<()> {
    let app = router(coordinator);
    let listener =
        tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(host = %config.host(), port = config.port(), "listening for connections");
    axum::serve(listener, app).await
}

async fn ws_upgrade(
    State(coordinator): State<Arc<Coordinator>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, coordinator))
}

/// Runs one connection: an outbound pump draining the session queue into
/// the socket, and an inbound loop dispatching parsed commands. On any
/// exit the disconnect path runs unless the session already left.
#[instrument(skip_all)]
async fn handle_socket(socket: WebSocket, coordinator: Arc<Coordinator>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(coordinator.channel_capacity());

    let pump = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(err) => {
                    error!(error = %err, "failed to encode server message");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    let mut connected: Option<(SessionId, i64)> = None;

    while let Some(frame) = stream.next().await {
        let message = match frame {
            Ok(message) => message,
            Err(err) => {
                debug!(error = %err, "socket read failed");
                break;
            }
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by the protocol layer; binary frames
            // are not part of this protocol.
            _ => continue,
        };

        let command = match serde_json::from_str::<ClientCommand>(text.as_str()) {
            Ok(command) => command,
            Err(err) => {
                let rejection = CommandError::Malformed {
                    reason: err.to_string(),
                };
                warn!(error = %rejection, "rejecting unparseable frame");
                reply(&coordinator, &tx, ServerMessage::error(rejection.to_string())).await;
                continue;
            }
        };

        match dispatch(command, &coordinator, &tx, &mut connected).await {
            Flow::Continue => {}
            Flow::Close => break,
        }
    }

    if let Some((session_id, match_id)) = connected {
        coordinator.disconnect(session_id, match_id).await;
    }
    drop(tx);
    let _ = pump.await;
}

/// Routes one command to the coordinator. Rejections go back to this
/// session only.
async fn dispatch(
    command: ClientCommand,
    coordinator: &Coordinator,
    tx: &mpsc::Sender<ServerMessage>,
    connected: &mut Option<(SessionId, i64)>,
) -> Flow {
    debug!(game_id = command.game_id(), "dispatching command");
    match command {
        ClientCommand::Connect {
            auth_token,
            game_id,
        } => {
            if connected.is_some() {
                reply(coordinator, tx, ServerMessage::error("already connected to a game")).await;
                return Flow::Continue;
            }
            match coordinator.connect(&auth_token, game_id, tx.clone()).await {
                Ok(session) => *connected = Some((session.session_id, game_id)),
                Err(err) => reply(coordinator, tx, ServerMessage::error(err.to_string())).await,
            }
            Flow::Continue
        }
        ClientCommand::MakeMove {
            auth_token,
            game_id,
            mv,
        } => {
            let Some((session_id, _)) = *connected else {
                reply(coordinator, tx, ServerMessage::error("connect to a game first")).await;
                return Flow::Continue;
            };
            if let Err(err) = coordinator
                .make_move(session_id, &auth_token, game_id, mv)
                .await
            {
                reply(coordinator, tx, ServerMessage::error(err.to_string())).await;
            }
            Flow::Continue
        }
        ClientCommand::Leave {
            auth_token,
            game_id,
        } => {
            let Some((session_id, _)) = *connected else {
                reply(coordinator, tx, ServerMessage::error("connect to a game first")).await;
                return Flow::Continue;
            };
            match coordinator.leave(session_id, &auth_token, game_id).await {
                Ok(()) => {
                    // LEAVE closes the connection; the session is gone,
                    // so skip the disconnect path.
                    *connected = None;
                    Flow::Close
                }
                Err(err) => {
                    reply(coordinator, tx, ServerMessage::error(err.to_string())).await;
                    Flow::Continue
                }
            }
        }
        ClientCommand::Resign {
            auth_token,
            game_id,
        } => {
            let Some((session_id, _)) = *connected else {
                reply(coordinator, tx, ServerMessage::error("connect to a game first")).await;
                return Flow::Continue;
            };
            if let Err(err) = coordinator.resign(session_id, &auth_token, game_id).await {
                reply(coordinator, tx, ServerMessage::error(err.to_string())).await;
            }
            Flow::Continue
        }
    }
}

/// Queues a message for this connection's own socket, bounded like any
/// other send. A failure here only affects this session.
async fn reply(coordinator: &Coordinator, tx: &mpsc::Sender<ServerMessage>, message: ServerMessage) {
    if let Err(err) = tx.send_timeout(message, coordinator.send_timeout()).await {
        debug!(error = %err, "failed to queue reply");
    }
}
