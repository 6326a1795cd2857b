//! Topic-based event bus for battle events.
//!
//! Events are published to specific topics (log, audio, visual, turn), and
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, LogTone, SpecialEvent, TurnEvent};
