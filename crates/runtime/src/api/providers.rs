//! Asynchronous abstraction for sourcing player intent.
//!
//! The battle awaits an [`ActionProvider`] whenever a human-controlled party
//! member is up, and again when the party falls and a retry choice is
//! needed. Enemies and auto-controlled allies never go through a provider;
//! they are decided synchronously by the core policy.
use std::collections::VecDeque;

use async_trait::async_trait;
use battle_core::{Action, CombatantId, Roster};
use tokio::sync::mpsc;

use super::errors::{Result, RuntimeError};
use crate::battle::RetryChoice;

/// Trait for providing actions for human-controlled combatants.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI) through a channel
/// - Scripted/replayed actions
/// - Testing fixtures
///
/// There is no timeout: the battle waits until the provider answers or
/// fails.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` given a read-only view of the roster.
    ///
    /// Targets are chosen before the action is returned; the battle only
    /// filters out protected ones.
    async fn provide_action(&mut self, actor: CombatantId, roster: &Roster) -> Result<Action>;

    /// Decide what happens after a defeat. Abandons unless overridden.
    async fn choose_retry(&mut self, _attempt: u32) -> Result<RetryChoice> {
        Ok(RetryChoice::Abandon)
    }
}

// ============================================================================
// Channel Provider
// ============================================================================

/// Sending half of a [`ChannelActionProvider`], held by the battle handle.
#[derive(Clone, Debug)]
pub struct ActionSender {
    actions: mpsc::Sender<Action>,
    retries: mpsc::Sender<RetryChoice>,
}

impl ActionSender {
    /// Queues an action without waiting.
    ///
    /// A full channel means an answer is already pending for this turn.
    pub(crate) fn try_send_action(&self, action: Action) -> Result<()> {
        self.actions.try_send(action).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => RuntimeError::TurnInProgress,
            mpsc::error::TrySendError::Closed(_) => RuntimeError::ProviderClosed,
        })
    }

    pub(crate) async fn send_retry(&self, choice: RetryChoice) -> Result<()> {
        self.retries
            .send(choice)
            .await
            .map_err(|_| RuntimeError::ProviderClosed)
    }
}

/// Provider fed by a UI through [`BattleHandle`](super::BattleHandle).
pub struct ChannelActionProvider {
    actions: mpsc::Receiver<Action>,
    retries: mpsc::Receiver<RetryChoice>,
}

impl ChannelActionProvider {
    /// Creates the provider together with its sending half.
    pub fn new() -> (Self, ActionSender) {
        let (action_tx, action_rx) = mpsc::channel(1);
        let (retry_tx, retry_rx) = mpsc::channel(1);
        (
            Self {
                actions: action_rx,
                retries: retry_rx,
            },
            ActionSender {
                actions: action_tx,
                retries: retry_tx,
            },
        )
    }
}

#[async_trait]
impl ActionProvider for ChannelActionProvider {
    async fn provide_action(&mut self, _actor: CombatantId, _roster: &Roster) -> Result<Action> {
        self.actions.recv().await.ok_or(RuntimeError::ProviderClosed)
    }

    async fn choose_retry(&mut self, _attempt: u32) -> Result<RetryChoice> {
        self.retries.recv().await.ok_or(RuntimeError::ProviderClosed)
    }
}

// ============================================================================
// Scripted Provider
// ============================================================================

/// Replays queued actions and retry choices.
///
/// Once the action script runs dry the actor attacks the first targetable
/// opponent; once the retry script runs dry the battle is abandoned.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActionProvider {
    actions: VecDeque<Action>,
    retries: VecDeque<RetryChoice>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            retries: VecDeque::new(),
        }
    }

    pub fn with_retries(mut self, retries: impl IntoIterator<Item = RetryChoice>) -> Self {
        self.retries = retries.into_iter().collect();
        self
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&mut self, actor: CombatantId, roster: &Roster) -> Result<Action> {
        if let Some(action) = self.actions.pop_front() {
            return Ok(action);
        }
        let target = roster
            .opponents_of(actor)
            .first()
            .map(|c| c.id)
            .ok_or(RuntimeError::ProviderClosed)?;
        Ok(Action::attack(actor, target))
    }

    async fn choose_retry(&mut self, _attempt: u32) -> Result<RetryChoice> {
        Ok(self.retries.pop_front().unwrap_or(RetryChoice::Abandon))
    }
}
