//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{BattleEvent, LogTone, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Narration lines for the battle log
    Log,
    /// Named sound cues
    Audio,
    /// Named visual effects anchored to a combatant
    Visual,
    /// Phase and turn lifecycle
    Turn,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event(pub BattleEvent);

impl Event {
    pub fn topic(&self) -> Topic {
        match &self.0 {
            BattleEvent::Log { .. } => Topic::Log,
            BattleEvent::Cue(_) => Topic::Audio,
            BattleEvent::Effect { .. } => Topic::Visual,
            BattleEvent::Turn(_) => Topic::Turn,
        }
    }

    pub fn into_inner(self) -> BattleEvent {
        self.0
    }
}

impl From<BattleEvent> for Event {
    fn from(event: BattleEvent) -> Self {
        Self(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    log: broadcast::Sender<Event>,
    audio: broadcast::Sender<Event>,
    visual: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            log: broadcast::channel(capacity).0,
            audio: broadcast::channel(capacity).0,
            visual: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Log => &self.log,
            Topic::Audio => &self.audio,
            Topic::Visual => &self.visual,
            Topic::Turn => &self.turn,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn log(&self, text: impl Into<String>, tone: LogTone) {
        self.publish(BattleEvent::Log {
            text: text.into(),
            tone,
            emphasis: false,
        });
    }

    /// Log line the presentation layer should highlight.
    pub fn announce(&self, text: impl Into<String>, tone: LogTone) {
        self.publish(BattleEvent::Log {
            text: text.into(),
            tone,
            emphasis: true,
        });
    }

    pub fn turn(&self, event: TurnEvent) {
        self.publish(BattleEvent::Turn(event));
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
