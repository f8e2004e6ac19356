//! WebSocket room management for session-based message routing.
//!
//! Rooms are organized by session ID, so a session update reaches only
//! the clients currently subscribed to that session.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::SessionId;

use super::messages::SessionUpdate;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages WebSocket connection rooms organized by session.
///
/// Provides:
/// - Client join/leave operations
/// - Broadcast to all clients in a session room
/// - Automatic cleanup of empty rooms
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since broadcasts (reads) vastly
/// outnumber joins/leaves (writes).
pub struct RoomManager {
    /// Map of session_id → broadcast sender for that room.
    rooms: RwLock<HashMap<SessionId, broadcast::Sender<SessionUpdate>>>,

    /// Map of client_id → session_id for O(1) cleanup on disconnect.
    client_sessions: RwLock<HashMap<ClientId, SessionId>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with the given per-room buffer size.
    ///
    /// Slow receivers start dropping messages once the buffer fills;
    /// clients recover by re-fetching the session over HTTP.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_sessions: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a session room.
    ///
    /// If the room doesn't exist, it's created automatically.
    /// Returns a receiver for session updates in that room.
    ///
    /// The two registries are locked one at a time, never nested, so a
    /// concurrent `leave` can not wait on this task while it waits on
    /// the other lock.
    pub async fn join(
        &self,
        session_id: &SessionId,
        client_id: ClientId,
    ) -> broadcast::Receiver<SessionUpdate> {
        let receiver = {
            let mut rooms = self.rooms.write().await;
            rooms
                .entry(*session_id)
                .or_insert_with(|| {
                    let (tx, _) = broadcast::channel(self.channel_capacity);
                    tx
                })
                .subscribe()
        };

        self.client_sessions
            .write()
            .await
            .insert(client_id, *session_id);

        receiver
    }

    /// Remove a client from their session room.
    ///
    /// If the room becomes empty, it's cleaned up.
    pub async fn leave(&self, client_id: &ClientId) {
        let session_id = self.client_sessions.write().await.remove(client_id);

        if let Some(session_id) = session_id {
            let mut rooms = self.rooms.write().await;
            if let Some(sender) = rooms.get(&session_id) {
                if sender.receiver_count() == 0 {
                    rooms.remove(&session_id);
                }
            }
        }
    }

    /// Broadcast an update to all clients in a session room.
    ///
    /// If no clients are in the room, this is a no-op. Send errors are
    /// ignored: delivery is best-effort by contract.
    pub async fn broadcast_to_session(&self, session_id: &SessionId, update: SessionUpdate) {
        let rooms = self.rooms.read().await;

        if let Some(sender) = rooms.get(session_id) {
            let _ = sender.send(update);
        }
    }

    /// Get count of connected clients in a specific room.
    pub async fn client_count(&self, session_id: &SessionId) -> usize {
        let rooms = self.rooms.read().await;
        rooms
            .get(session_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Get all active room IDs (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<SessionId> {
        self.rooms.read().await.keys().cloned().collect()
    }

    /// Get total count of connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_sessions.read().await.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::messages::SessionEventKind;
    use crate::domain::foundation::Timestamp;
    use std::sync::Arc;
    use tokio::sync::broadcast;

    fn test_update() -> SessionUpdate {
        SessionUpdate {
            kind: SessionEventKind::TaskCreated,
            data: serde_json::json!({"title": "A task"}),
            timestamp: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn join_creates_room_if_not_exists() {
        let manager = RoomManager::with_default_capacity();
        let session_id = SessionId::new();

        let _rx = manager.join(&session_id, ClientId::new()).await;

        assert_eq!(manager.active_rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn join_returns_receiver_for_broadcasts() {
        let manager = Arc::new(RoomManager::with_default_capacity());
        let session_id = SessionId::new();

        let mut rx: broadcast::Receiver<SessionUpdate> =
            manager.join(&session_id, ClientId::new()).await;

        manager
            .broadcast_to_session(&session_id, test_update())
            .await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, SessionEventKind::TaskCreated);
    }

    #[tokio::test]
    async fn multiple_clients_in_same_room_all_receive_broadcast() {
        let manager = Arc::new(RoomManager::with_default_capacity());
        let session_id = SessionId::new();

        let mut rx1 = manager.join(&session_id, ClientId::new()).await;
        let mut rx2 = manager.join(&session_id, ClientId::new()).await;

        manager
            .broadcast_to_session(&session_id, test_update())
            .await;

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let manager = Arc::new(RoomManager::with_default_capacity());
        let session_1 = SessionId::new();
        let session_2 = SessionId::new();

        let mut rx1 = manager.join(&session_1, ClientId::new()).await;
        let mut rx2 = manager.join(&session_2, ClientId::new()).await;

        manager
            .broadcast_to_session(&session_1, test_update())
            .await;

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_removes_client_from_room() {
        let manager = RoomManager::with_default_capacity();
        let session_id = SessionId::new();
        let client_id = ClientId::new();

        let _rx = manager.join(&session_id, client_id.clone()).await;
        assert_eq!(manager.total_client_count().await, 1);

        manager.leave(&client_id).await;
        assert_eq!(manager.total_client_count().await, 0);
    }

    #[tokio::test]
    async fn leave_cleans_up_empty_room() {
        let manager = RoomManager::with_default_capacity();
        let session_id = SessionId::new();
        let client_id = ClientId::new();

        {
            // Receiver dropped here, simulating disconnect
            let _rx = manager.join(&session_id, client_id.clone()).await;
        }

        manager.leave(&client_id).await;

        assert!(manager.active_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn client_count_tracks_receivers() {
        let manager = RoomManager::with_default_capacity();
        let session_id = SessionId::new();

        assert_eq!(manager.client_count(&session_id).await, 0);

        let _rx1 = manager.join(&session_id, ClientId::new()).await;
        assert_eq!(manager.client_count(&session_id).await, 1);

        let _rx2 = manager.join(&session_id, ClientId::new()).await;
        assert_eq!(manager.client_count(&session_id).await, 2);
    }

    #[tokio::test]
    async fn broadcast_to_nonexistent_room_is_noop() {
        let manager = RoomManager::with_default_capacity();
        manager
            .broadcast_to_session(&SessionId::new(), test_update())
            .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_and_leaves_complete() {
        let manager = Arc::new(RoomManager::with_default_capacity());
        let session_id = SessionId::new();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    let client_id = ClientId::new();
                    let rx = manager.join(&session_id, client_id.clone()).await;
                    drop(rx);
                    manager.leave(&client_id).await;
                }
            }));
        }

        let all_done = futures::future::join_all(handles);
        tokio::time::timeout(std::time::Duration::from_secs(10), all_done)
            .await
            .expect("join/leave churn did not finish");

        assert_eq!(manager.total_client_count().await, 0);
    }
}
