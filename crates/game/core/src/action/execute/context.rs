//! Execution context.

use crate::env::{CombatTables, ItemCatalog, RngSource, SkillCatalog};
use crate::state::Inventory;

// ============================================================================
// Exec Context
// ============================================================================

/// Everything [`execute`](super::execute) reads or mutates besides the roster.
pub struct ExecContext<'a> {
    pub skills: &'a SkillCatalog,
    pub items: &'a ItemCatalog,
    pub tables: &'a CombatTables,
    /// Shared battle generator; every draw in a turn goes through it.
    pub rng: &'a mut dyn RngSource,
    /// Party inventory, consumed by item actions.
    pub inventory: &'a mut Inventory,
}

impl<'a> ExecContext<'a> {
    pub fn new(
        skills: &'a SkillCatalog,
        items: &'a ItemCatalog,
        tables: &'a CombatTables,
        rng: &'a mut dyn RngSource,
        inventory: &'a mut Inventory,
    ) -> Self {
        Self {
            skills,
            items,
            tables,
            rng,
            inventory,
        }
    }
}
