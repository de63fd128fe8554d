//! Asset lifecycle events.
//!
//! The dispatcher publishes an event after every successful mutation so
//! observers (REPL monitors, future persistence hooks) can react without
//! coupling to the ledger itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::asset::{AssetId, TeamId};

/// Everything the ledger can be observed doing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AssetEvent {
    /// An asset entered the ledger
    AssetAdded {
        asset_id: AssetId,
        name: String,
        quantity: u32,
        timestamp: DateTime<Utc>,
    },

    /// An asset field was updated
    AssetUpdated {
        asset_id: AssetId,
        field: String,
        timestamp: DateTime<Utc>,
    },

    /// An asset was erased from the ledger
    AssetRemoved {
        asset_id: AssetId,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// Units were checked out to a team
    UnitsAllocated {
        asset_id: AssetId,
        team_id: TeamId,
        quantity: u32,
        remaining: u32,
        timestamp: DateTime<Utc>,
    },

    /// Units came back from a team
    UnitsReturned {
        asset_id: AssetId,
        team_id: TeamId,
        quantity: u32,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for asset events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Subscribers
/// receive every event and filter for what they care about.
pub struct EventBus {
    sender: broadcast::Sender<Arc<AssetEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: AssetEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AssetEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(AssetEvent::UnitsAllocated {
            asset_id: AssetId::new("G003"),
            team_id: TeamId::new("GroundTroop1"),
            quantity: 2,
            remaining: 4,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            AssetEvent::UnitsAllocated { asset_id, quantity, remaining, .. } => {
                assert_eq!(asset_id.as_str(), "G003");
                assert_eq!(*quantity, 2);
                assert_eq!(*remaining, 4);
            }
            _ => panic!("Expected UnitsAllocated event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        // Publishing with no subscribers should not panic
        bus.publish(AssetEvent::AssetRemoved {
            asset_id: AssetId::new("G002"),
            name: "Binoculars".into(),
            timestamp: Utc::now(),
        });
    }

    #[tokio::test]
    async fn multiple_subscribers_see_the_same_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(AssetEvent::AssetAdded {
            asset_id: AssetId::new("G001"),
            name: "Flashlight".into(),
            quantity: 2,
            timestamp: Utc::now(),
        });

        for rx in [&mut rx1, &mut rx2] {
            let event = rx.recv().await.unwrap();
            assert!(matches!(event.as_ref(), AssetEvent::AssetAdded { .. }));
        }
    }
}
