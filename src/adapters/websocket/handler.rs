//! WebSocket upgrade handler for real-time session subscriptions.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection
//! lifecycle:
//! 1. Parse the session ID from the path
//! 2. Upgrade to WebSocket
//! 3. Join the session room
//! 4. Forward room broadcasts until disconnect
//! 5. Clean up room membership

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::foundation::{SessionId, Timestamp};

use super::{
    messages::{ClientMessage, ConnectedMessage, PongMessage, ServerMessage},
    rooms::{ClientId, RoomManager},
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Room manager for session-based routing.
    pub room_manager: Arc<RoomManager>,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }
}

/// Handle WebSocket upgrade requests for session subscriptions.
///
/// Route: `GET /estimation/v1/session/:id/ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<WebSocketState>,
) -> Response {
    let session_id: SessionId = match session_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, "Invalid session ID").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

/// Drive an established WebSocket connection until disconnect.
///
/// Room broadcasts are forwarded to the client; client JSON pings get
/// a pong back. A lagged receiver (slow client) drops the missed
/// messages and keeps going - clients recover by re-fetching over HTTP.
async fn handle_socket(socket: WebSocket, session_id: SessionId, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();
    let mut room_rx = state.room_manager.join(&session_id, client_id.clone()).await;

    let connected = ServerMessage::Connected(ConnectedMessage {
        session_id: session_id.to_string(),
        client_id: client_id.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });

    if send_message(&mut sender, &connected).await.is_err() {
        // Client disconnected immediately
        state.room_manager.leave(&client_id).await;
        return;
    }

    tracing::debug!(
        session_id = %session_id,
        client_id = %client_id,
        "WebSocket client joined session room"
    );

    loop {
        tokio::select! {
            update = room_rx.recv() => match update {
                Ok(update) => {
                    let msg = update.to_server_message();
                    if send_message(&mut sender, &msg).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(
                        client_id = %client_id,
                        missed,
                        "Slow WebSocket client missed broadcasts"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(ClientMessage::Ping) = serde_json::from_str::<ClientMessage>(&text) {
                        let pong = ServerMessage::Pong(PongMessage {
                            timestamp: Timestamp::now().to_rfc3339(),
                        });
                        if send_message(&mut sender, &pong).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Binary and protocol-level ping/pong frames need no reply
                }
                Some(Err(e)) => {
                    tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                    break;
                }
            },
        }
    }

    state.room_manager.leave(&client_id).await;
    tracing::debug!(
        session_id = %session_id,
        client_id = %client_id,
        "WebSocket client left session room"
    );
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).expect("ServerMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}
