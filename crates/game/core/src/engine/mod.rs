//! Turn scheduling under the action-value (ATB) discipline.
//!
//! Each living combatant counts its `action_value` down toward zero. The
//! scheduler advances time by the smallest positive remainder, hands the turn
//! to the first ready combatant in speed order, and after the turn pushes the
//! actor back by `K / speed`. Faster combatants therefore act proportionally
//! more often rather than once per round.
//!
//! `status` holds the per-turn effect processing that brackets each action.

mod status;
mod turns;

pub use status::{StatusTick, begin_turn, end_turn};
pub use turns::TurnScheduler;
