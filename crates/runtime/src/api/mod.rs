//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the battle module can stay focused on orchestration.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::BattleHandle;
pub(crate) use handle::InputGate;
pub use providers::{ActionProvider, ActionSender, ChannelActionProvider, ScriptedActionProvider};
