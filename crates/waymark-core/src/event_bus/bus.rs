//! Editor event bus.
//!
//! Listeners added with [`EventBus::subscribe`] run inline on the thread
//! that published the event. Async hosts take a broadcast receiver instead.
//! When a journal size is configured, the most recent events are kept so a
//! host that attaches late can replay what it missed.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "Sub({})", &simple[..8])
    }
}

/// Which events a listener sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => {
                let category = event.category();
                categories.iter().any(|c| *c == category)
            }
        }
    }
}

/// Bus sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Events buffered per async receiver before it lags.
    pub channel_capacity: usize,
    /// Recent events kept for replay. Zero disables the journal.
    pub journal_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            journal_size: 0,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    #[error("No active subscribers")]
    NoSubscribers,
}

type Callback = Box<dyn Fn(&EditorEvent) + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    filter: EventFilter,
    callback: Callback,
}

pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
    listeners: RwLock<Vec<Listener>>,
    journal: Mutex<VecDeque<EditorEvent>>,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            listeners: RwLock::new(Vec::new()),
            journal: Mutex::new(VecDeque::with_capacity(config.journal_size)),
            config,
        }
    }

    pub fn config(&self) -> EventBusConfig {
        self.config
    }

    /// Journals `event`, runs matching listeners, then forwards it to async
    /// receivers. Returns how many listeners and receivers got it.
    ///
    /// Fails with `NoSubscribers` when nothing is attached; the event is
    /// still journaled.
    pub fn publish(&self, event: EditorEvent) -> Result<usize, EventBusError> {
        self.record(&event);

        let listeners = self.listeners.read();
        if listeners.is_empty() && self.sender.receiver_count() == 0 {
            return Err(EventBusError::NoSubscribers);
        }

        let mut delivered = 0;
        for listener in listeners.iter().filter(|l| l.filter.matches(&event)) {
            (listener.callback)(&event);
            delivered += 1;
        }
        drop(listeners);

        delivered += self.sender.send(event).unwrap_or(0);
        Ok(delivered)
    }

    /// Adds a listener. It must not call back into the bus or the editor
    /// that owns it.
    pub fn subscribe<F>(&self, filter: EventFilter, callback: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.write().push(Listener {
            id,
            filter,
            callback: Box::new(callback),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = listeners.len() < before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Receiver for events published from now on.
    pub fn receiver(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    /// Journaled events, oldest first.
    pub fn journal(&self) -> Vec<EditorEvent> {
        self.journal.lock().iter().cloned().collect()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().clear();
    }

    fn record(&self, event: &EditorEvent) {
        if self.config.journal_size == 0 {
            return;
        }
        let mut journal = self.journal.lock();
        if journal.len() == self.config.journal_size {
            journal.pop_front();
        }
        journal.push_back(event.clone());
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.sender.receiver_count())
            .field("config", &self.config)
            .finish()
    }
}
