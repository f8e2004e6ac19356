//! WebSocket message types for real-time session updates.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: Connection status, session updates, errors, pings
//! - Client → Server: Pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established successfully.
    Connected(ConnectedMessage),

    /// Something changed in the session the client is watching.
    #[serde(rename = "session.update")]
    SessionUpdate(SessionUpdateMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent when client successfully connects and joins a session room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub session_id: String,
    pub client_id: String,
    pub timestamp: String,
}

/// Session update notification with typed payload.
///
/// Clients use `kind` to decide whether to re-fetch; the payload is a
/// hint, not the source of truth.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdateMessage {
    pub kind: SessionEventKind,
    pub data: serde_json::Value,
    pub timestamp: String,
}

/// Kinds of session updates that fan out to clients.
///
/// Variant names serialize as-is, mirroring the message type names the
/// web client already switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A task was added.
    TaskCreated,
    /// A task moved to a new status.
    TaskStatusChanged,
    /// A task was removed.
    TaskDeleted,
    /// A member joined.
    UserJoined,
    /// A member left.
    UserLeft,
    /// A vote was cast.
    EstimationAdded,
    /// The session was invalidated.
    SessionInvalidated,
}

impl SessionEventKind {
    /// Maps a published event type string to a client-facing kind.
    ///
    /// Returns `None` for event types that never fan out (for example
    /// `session.created.v1`, which fires before any client can be in
    /// the room).
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "task.created.v1" => Some(Self::TaskCreated),
            "task.status_changed.v1" => Some(Self::TaskStatusChanged),
            "task.deleted.v1" => Some(Self::TaskDeleted),
            "user.joined.v1" => Some(Self::UserJoined),
            "user.left.v1" => Some(Self::UserLeft),
            "estimation.added.v1" => Some(Self::EstimationAdded),
            "session.invalidated.v1" => Some(Self::SessionInvalidated),
            _ => None,
        }
    }
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,
}

// ============================================
// Internal Types
// ============================================

/// Internal representation of a session update for broadcasting.
///
/// This is what the event bridge creates and sends to rooms.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub kind: SessionEventKind,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl SessionUpdate {
    /// Convert to a server message for sending to clients.
    pub fn to_server_message(self) -> ServerMessage {
        ServerMessage::SessionUpdate(SessionUpdateMessage {
            kind: self.kind,
            data: self.data,
            timestamp: self.timestamp.to_rfc3339(),
        })
    }
}
