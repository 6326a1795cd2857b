//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe combatants, their
//! status containers, the party inventory and the live roster. Runtime layers
//! clone or query this state but mutate it through action resolution, the
//! turn scheduler, or the orchestrator's scripted events.
mod combatant;
mod common;
mod inventory;
mod roster;
mod status;

pub use combatant::{Archetype, CombatStats, Combatant, Role, Tier};
pub use common::{CombatantId, ResourceMeter, Side};
pub use inventory::Inventory;
pub use roster::Roster;
pub use status::{StatusId, StatusMap};
