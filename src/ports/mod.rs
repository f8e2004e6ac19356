//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionRepository` - Session aggregate persistence with
//!   version-checked updates
//! - `EventPublisher` / `EventSubscriber` / `EventHandler` - domain
//!   event transport
//! - `TokenVerifier` - bearer token validation

mod event_publisher;
mod event_subscriber;
mod session_repository;
mod token_verifier;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use session_repository::SessionRepository;
pub use token_verifier::TokenVerifier;
