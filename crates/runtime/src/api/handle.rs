//! Cloneable façade for feeding input to a running battle.
//!
//! [`BattleHandle`] hides channel plumbing: a UI submits actions and retry
//! choices through it and streams events from specific topics.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use tokio::sync::broadcast;

use battle_core::{Action, CombatantId};

use super::errors::{Result, RuntimeError};
use super::providers::ActionSender;
use crate::battle::RetryChoice;
use crate::events::{Event, EventBus, Topic};

/// Input state shared between a battle and its handles.
#[derive(Debug, Default)]
pub(crate) struct InputGate {
    /// Held from action resolution until the acting turn wraps up.
    processing: AtomicBool,
    /// Raw id of the actor waiting on input, zero when nobody is.
    awaiting: AtomicU32,
    /// Up while a defeat's retry prompt is open.
    retry_offered: AtomicBool,
}

impl InputGate {
    pub(crate) fn set_processing(&self, value: bool) {
        self.processing.store(value, Ordering::SeqCst);
    }

    pub(crate) fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    pub(crate) fn await_input(&self, actor: CombatantId) {
        self.awaiting.store(actor.0, Ordering::SeqCst);
    }

    pub(crate) fn clear_awaiting(&self) {
        self.awaiting.store(0, Ordering::SeqCst);
    }

    pub(crate) fn awaiting(&self) -> Option<CombatantId> {
        match self.awaiting.load(Ordering::SeqCst) {
            0 => None,
            raw => Some(CombatantId(raw)),
        }
    }

    pub(crate) fn offer_retry(&self) {
        self.retry_offered.store(true, Ordering::SeqCst);
    }

    pub(crate) fn clear_retry(&self) {
        self.retry_offered.store(false, Ordering::SeqCst);
    }

    pub(crate) fn retry_offered(&self) -> bool {
        self.retry_offered.load(Ordering::SeqCst)
    }
}

/// Client-facing handle to interact with a battle
#[derive(Clone)]
pub struct BattleHandle {
    gate: Arc<InputGate>,
    input: Option<ActionSender>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(
        gate: Arc<InputGate>,
        input: Option<ActionSender>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            gate,
            input,
            event_bus,
        }
    }

    /// Whether a turn is still resolving its action.
    pub fn is_processing(&self) -> bool {
        self.gate.is_processing()
    }

    /// The human-controlled actor the battle is waiting on, if any.
    pub fn awaiting_actor(&self) -> Option<CombatantId> {
        self.gate.awaiting()
    }

    /// Whether a defeat is waiting on a retry choice.
    pub fn retry_offered(&self) -> bool {
        self.gate.retry_offered()
    }

    /// Submit the action for the actor that is currently awaiting input.
    ///
    /// Rejected while a previous action is still resolving, when nobody is
    /// waiting, or when the action names a different actor.
    pub fn submit_action(&self, action: Action) -> Result<()> {
        if self.gate.is_processing() {
            return Err(RuntimeError::TurnInProgress);
        }
        let expected = self.gate.awaiting().ok_or(RuntimeError::NotAwaitingInput)?;
        if action.actor != expected {
            return Err(RuntimeError::InvalidActionActor {
                expected,
                provided: action.actor,
            });
        }
        self.sender()?.try_send_action(action)
    }

    /// Answer the retry prompt published after a defeat.
    ///
    /// Rejected unless a prompt is open, so a stray choice can never answer
    /// a later defeat.
    pub async fn submit_retry(&self, choice: RetryChoice) -> Result<()> {
        if !self.gate.retry_offered() {
            return Err(RuntimeError::NotAwaitingInput);
        }
        self.sender()?.send_retry(choice).await
    }

    fn sender(&self) -> Result<&ActionSender> {
        self.input.as_ref().ok_or(RuntimeError::ProviderClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Narration lines
    /// - `Topic::Audio` - Sound cues
    /// - `Topic::Visual` - Effects keyed by target
    /// - `Topic::Turn` - Phase changes, turn starts, outcomes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::Topic;
    ///
    /// let mut log = handle.subscribe(Topic::Log);
    /// while let Ok(event) = log.recv().await {
    ///     // Render the line
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to every topic at once.
    pub fn subscribe_all(&self) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus
            .subscribe_multiple(&[Topic::Log, Topic::Audio, Topic::Visual, Topic::Turn])
    }
}
