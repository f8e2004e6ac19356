//! WebSocket channel configuration

use serde::Deserialize;

use crate::adapters::websocket::{BroadcastPolicy, BROADCASTABLE_EVENT_TYPES};

use super::error::ValidationError;

/// WebSocket fan-out configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Per-room broadcast channel capacity
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Event types to fan out (comma-separated); all when unset
    pub broadcast_events: Option<String>,
}

impl ChannelConfig {
    /// Event types as a list.
    pub fn broadcast_events_list(&self) -> Vec<String> {
        self.broadcast_events
            .as_ref()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Build the broadcast policy this configuration describes.
    pub fn broadcast_policy(&self) -> BroadcastPolicy {
        match &self.broadcast_events {
            Some(_) => BroadcastPolicy::new(self.broadcast_events_list()),
            None => BroadcastPolicy::all(),
        }
    }

    /// Validate channel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        for event_type in self.broadcast_events_list() {
            if !BROADCASTABLE_EVENT_TYPES.contains(&event_type.as_str()) {
                return Err(ValidationError::UnknownBroadcastEventType(event_type));
            }
        }
        Ok(())
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            broadcast_events: None,
        }
    }
}

fn default_capacity() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_allows_everything_broadcastable() {
        let config = ChannelConfig::default();
        assert!(config.validate().is_ok());
        let policy = config.broadcast_policy();
        for event_type in BROADCASTABLE_EVENT_TYPES {
            assert!(policy.allows(event_type));
        }
    }

    #[test]
    fn explicit_list_narrows_the_policy() {
        let config = ChannelConfig {
            broadcast_events: Some("task.created.v1, user.joined.v1".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let policy = config.broadcast_policy();
        assert!(policy.allows("user.joined.v1"));
        assert!(!policy.allows("user.left.v1"));
    }

    #[test]
    fn unknown_event_type_fails_validation() {
        let config = ChannelConfig {
            broadcast_events: Some("task.exploded.v1".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let config = ChannelConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
