//! Event bridge connecting domain events to WebSocket clients.
//!
//! Subscribes to session domain events and broadcasts them to
//! connected clients in the appropriate session rooms. Which event
//! types fan out is decided by a `BroadcastPolicy`; `task.created.v1`
//! is always included so task boards update live.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope, SessionId};
use crate::ports::{EventHandler, EventSubscriber};

use super::messages::{SessionEventKind, SessionUpdate};
use super::rooms::RoomManager;

/// Event types the bridge can subscribe to.
pub const BROADCASTABLE_EVENT_TYPES: &[&str] = &[
    "task.created.v1",
    "task.status_changed.v1",
    "task.deleted.v1",
    "user.joined.v1",
    "user.left.v1",
    "estimation.added.v1",
    "session.invalidated.v1",
];

/// Decides which event types fan out to connected clients.
///
/// `task.created.v1` is always broadcast regardless of configuration;
/// everything else is opt-in (and on by default).
#[derive(Debug, Clone)]
pub struct BroadcastPolicy {
    event_types: HashSet<String>,
}

impl BroadcastPolicy {
    /// Policy from an explicit set of event types.
    ///
    /// `task.created.v1` is added if missing.
    pub fn new(event_types: impl IntoIterator<Item = String>) -> Self {
        let mut event_types: HashSet<String> = event_types.into_iter().collect();
        event_types.insert("task.created.v1".to_string());
        Self { event_types }
    }

    /// Policy that broadcasts every known event type.
    pub fn all() -> Self {
        Self::new(BROADCASTABLE_EVENT_TYPES.iter().map(|s| s.to_string()))
    }

    /// Policy that broadcasts only task creation.
    pub fn task_created_only() -> Self {
        Self::new(std::iter::empty())
    }

    /// Returns true if the given event type should fan out.
    pub fn allows(&self, event_type: &str) -> bool {
        self.event_types.contains(event_type)
    }
}

impl Default for BroadcastPolicy {
    fn default() -> Self {
        Self::all()
    }
}

/// Bridge between the event bus and WebSocket connections.
///
/// Implements `EventHandler` to receive domain events and broadcast
/// them to connected clients in the appropriate session rooms.
pub struct SessionEventBridge {
    room_manager: Arc<RoomManager>,
    policy: BroadcastPolicy,
}

impl SessionEventBridge {
    /// Create a new event bridge with the given room manager and policy.
    pub fn new(room_manager: Arc<RoomManager>, policy: BroadcastPolicy) -> Self {
        Self {
            room_manager,
            policy,
        }
    }

    /// Create as an Arc (for sharing with event subscriber).
    pub fn new_shared(room_manager: Arc<RoomManager>, policy: BroadcastPolicy) -> Arc<Self> {
        Arc::new(Self::new(room_manager, policy))
    }

    /// Register this bridge with an event subscriber.
    pub fn register(self: &Arc<Self>, subscriber: &impl EventSubscriber) {
        subscriber.subscribe_all(BROADCASTABLE_EVENT_TYPES, self.clone());
    }

    /// Transform a domain event envelope into a session update.
    ///
    /// Returns `None` if the event type never fans out or the policy
    /// excludes it.
    fn transform(&self, event: &EventEnvelope) -> Option<SessionUpdate> {
        if !self.policy.allows(&event.event_type) {
            return None;
        }

        let kind = SessionEventKind::from_event_type(&event.event_type)?;

        Some(SessionUpdate {
            kind,
            data: event.payload.clone(),
            timestamp: event.occurred_at,
        })
    }

    /// Resolve the session ID from an event envelope.
    ///
    /// Session events carry the session ID as the aggregate_id.
    fn resolve_session_id(&self, event: &EventEnvelope) -> Option<SessionId> {
        if event.aggregate_type == "Session" {
            return event.aggregate_id.parse().ok();
        }

        event
            .payload
            .get("session_id")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}

#[async_trait]
impl EventHandler for SessionEventBridge {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(update) = self.transform(&event) else {
            return Ok(()); // Filtered by policy or not broadcastable
        };

        let Some(session_id) = self.resolve_session_id(&event) else {
            tracing::debug!(
                event_type = %event.event_type,
                aggregate_id = %event.aggregate_id,
                "Cannot resolve session ID for event, skipping broadcast"
            );
            return Ok(());
        };

        self.room_manager
            .broadcast_to_session(&session_id, update)
            .await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "SessionEventBridge"
    }
}
