//! Client notifications.
//!
//! Each [`Client`](crate::Client) owns its own bus; nothing here is global.
//! Subscribers receive every event published after they subscribed.

use tokio::sync::broadcast;

/// Something observable happened on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A definition was fetched from the server (cache hits are silent).
    DefinitionLoaded { obj_type: String },
    /// A collection finished loading a page.
    CollectionLoaded {
        obj_type: String,
        total_num: i64,
        num: usize,
    },
    /// A single entity was loaded by id.
    EntityLoaded { obj_type: String, id: String },
    /// An entity was saved; `created` is true on its first save.
    EntitySaved {
        obj_type: String,
        id: String,
        created: bool,
    },
}

/// Broadcast channel for [`ClientEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ClientEvent>,
}

impl EventBus {
    /// Creates a bus. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Returns how many subscribers will see it;
    /// publishing with nobody listening is not an error.
    pub fn publish(&self, event: ClientEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
