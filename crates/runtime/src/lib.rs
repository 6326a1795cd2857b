//! Async orchestration for party-vs-enemy battles.
//!
//! This crate drives the deterministic rules in `battle-core` through a turn
//! loop, sources human intent through the [`ActionProvider`] abstraction,
//! and publishes narration, sound cues, visual effects and lifecycle events
//! on a topic-based [`EventBus`]. Consumers build a [`Battle`], keep a
//! [`BattleHandle`] for input and subscriptions, and await
//! [`Battle::run`] or [`Battle::run_with_retries`].
//!
//! Modules are organized by responsibility:
//! - [`battle`] hosts the orchestrator, builder, config and retry backup
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
pub mod api;
pub mod battle;
pub mod events;

pub use api::{
    ActionProvider, ActionSender, BattleHandle, ChannelActionProvider, Result, RuntimeError,
    ScriptedActionProvider,
};
pub use battle::{
    Battle, BattleBackup, BattleBuilder, BattleOutcome, BattlePhase, PartyVitals, RetryChoice,
    RuntimeConfig, SessionFlags,
};
pub use events::{BattleEvent, Event, EventBus, LogTone, SpecialEvent, Topic, TurnEvent};
