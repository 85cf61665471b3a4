use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

use recheck_types::RunId;

use crate::event::{ProgressEvent, ProgressState};

/// Default capacity of per-subscriber broadcast channels.
const DEFAULT_CAPACITY: usize = 1024;

/// Filter for subscribing to a subset of progress events.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// If set, only events for these runs are delivered.
    pub runs: Option<Vec<RunId>>,
    /// If set, only events in these states are delivered.
    pub states: Option<Vec<ProgressState>>,
}

impl EventFilter {
    /// Filter that delivers only events for the given run.
    pub fn for_run(run: RunId) -> Self {
        Self {
            runs: Some(vec![run]),
            ..Default::default()
        }
    }

    /// Returns `true` if the given event matches this filter.
    pub fn matches(&self, event: &ProgressEvent) -> bool {
        if let Some(ref runs) = self.runs {
            if !runs.contains(&event.run) {
                return false;
            }
        }
        if let Some(ref states) = self.states {
            if !states.contains(&event.state) {
                return false;
            }
        }
        true
    }
}

/// A broadcast channel receiver for progress events.
pub type EventStream = broadcast::Receiver<ProgressEvent>;

/// Internal subscriber: a filter paired with a broadcast sender.
struct Subscriber {
    filter: EventFilter,
    sender: broadcast::Sender<ProgressEvent>,
}

/// Fan-out bus that delivers progress events to matching subscribers.
///
/// Unlike a detached channel, the bus owns every subscriber sender, so
/// [`shutdown`](EventBus::shutdown) can close all streams at once and give
/// listeners a definite end-of-stream to terminate on.
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
    capacity: usize,
}

impl EventBus {
    /// Create a bus with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus with the given per-subscriber channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Register a new subscriber with the given filter.
    ///
    /// Returns a broadcast receiver carrying the matching events.
    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        let (tx, rx) = broadcast::channel(self.capacity);
        let sub = Subscriber { filter, sender: tx };
        self.subscribers
            .write()
            .expect("bus lock poisoned")
            .push(sub);
        rx
    }

    /// Deliver an event to all matching subscribers.
    ///
    /// Returns the number of subscribers that received it. Subscribers whose
    /// channels are closed are pruned.
    pub fn emit(&self, event: &ProgressEvent) -> usize {
        let mut delivered = 0;
        let mut subs = self.subscribers.write().expect("bus lock poisoned");
        subs.retain(|sub| {
            if sub.filter.matches(event) {
                // If send fails (no receivers), the subscriber is stale.
                match sub.sender.send(event.clone()) {
                    Ok(_) => {
                        delivered += 1;
                        true
                    }
                    Err(_) => false,
                }
            } else {
                // Keep non-matching subscribers; they may match future events.
                // Only prune if the channel itself is closed.
                sub.sender.receiver_count() > 0
            }
        });
        delivered
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().expect("bus lock poisoned").len()
    }

    /// Close the bus: drop every subscriber sender.
    ///
    /// Each stream drains whatever was already buffered and then observes
    /// channel-close, so listeners terminate without losing events.
    pub fn shutdown(&self) {
        let mut subs = self.subscribers.write().expect("bus lock poisoned");
        let dropped = subs.len();
        subs.clear();
        debug!(subscribers = dropped, "event bus shut down");
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
