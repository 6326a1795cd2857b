//! Deterministic combat rules for the party-vs-enemy battle system.
//!
//! `battle-core` defines the canonical rules (combatants, damage formulas,
//! action resolution, enemy decisions, turn scheduling) and exposes pure
//! APIs that are driven by the runtime crate. Nothing here performs I/O or
//! awaits; every random draw flows through a caller-supplied
//! [`env::RngSource`].
pub mod action;
pub mod combat;
pub mod engine;
pub mod env;
pub mod policy;
pub mod state;

pub use action::{
    Action, ActionKind, ExecContext, Resolution, ResolutionEvent, SkipReason, Target, execute,
    sanitize_targets,
};
pub use combat::{DamageKind, DamageRoll, HealRoll};
pub use engine::{StatusTick, TurnScheduler, begin_turn, end_turn};
pub use env::{
    Bestiary, CatalogError, Catalogs, CombatTables, CombatantTemplate, EffectKind, Encounter,
    EncounterId, EncounterRules, FusionRule, ItemCatalog, ItemDef, ItemId, PcgRng, RescueRule,
    RngSource, Scope, ScriptedRng, SkillCatalog, SkillDef, SkillId, SplitRule, StatusApplication,
    TemplateId,
};
pub use policy::decide;
pub use state::{
    Archetype, CombatStats, Combatant, CombatantId, Inventory, ResourceMeter, Role, Roster, Side,
    StatusId, StatusMap, Tier,
};
