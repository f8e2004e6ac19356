//! WebSocket adapters for real-time session updates.
//!
//! Infrastructure for pushing domain events to connected clients.
//!
//! # Architecture
//!
//! ```text
//! Event Bus ──subscribes──▶ SessionEventBridge
//!                                │ (BroadcastPolicy filter)
//!                                ▼
//!                           RoomManager
//!        Room: session-123          Room: session-456
//!        ├── client-a               └── client-c
//!        └── client-b
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Room management for session-based routing
//! - [`handler`] - Axum WebSocket upgrade handler
//! - [`event_bridge`] - Bridge between event bus and WebSocket rooms

pub mod event_bridge;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use event_bridge::{BroadcastPolicy, SessionEventBridge, BROADCASTABLE_EVENT_TYPES};
pub use handler::{ws_handler, WebSocketState};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, PongMessage, ServerMessage, SessionEventKind,
    SessionUpdate, SessionUpdateMessage,
};
pub use rooms::{ClientId, RoomManager};
