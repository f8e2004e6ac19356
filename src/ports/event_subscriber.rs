//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! This port defines how handlers register interest in domain events
//! without knowing about the underlying transport mechanism.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - Safe to call multiple times with same event
/// - **Quick** - Long operations should be queued for async processing
/// - **Isolated** - Errors don't affect other handlers
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    ///
    /// This method should be idempotent. The bus may redeliver.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// Handlers register interest in specific event types and are invoked
/// when matching events are published.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    ///
    /// The same handler instance is invoked for any matching event type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
///
/// An EventBus provides both publishing and subscribing capabilities.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

// Blanket implementation - any type that implements both traits is an EventBus
impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
