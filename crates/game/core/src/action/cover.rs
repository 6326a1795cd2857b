//! Cover redirection.
//!
//! A party member with the covering flag intercepts single-target physical
//! hits from enemies aimed at another party member, taking reduced damage.
//! Magic never redirects.

use crate::combat::damage::scale;
use crate::env::CombatTables;
use crate::state::{CombatantId, Roster, Side};

/// Returns the coverer that intercepts a hit from `attacker` on `target`.
///
/// Requires an enemy attacker, a party target, and another alive party
/// member holding the covering flag. The first such member in roster order
/// wins.
pub fn find_coverer(
    roster: &Roster,
    attacker: CombatantId,
    target: CombatantId,
) -> Option<CombatantId> {
    if roster.side_of(attacker)? != Side::Enemy || roster.side_of(target)? != Side::Party {
        return None;
    }

    roster
        .party()
        .iter()
        .find(|c| c.id != target && c.is_alive() && c.is_covering)
        .map(|c| c.id)
}

/// Damage the coverer takes: `max(1, floor(base × cover_multiplier))`.
pub fn covered_damage(base: u32, tables: &CombatTables) -> u32 {
    scale(base, tables.cover_multiplier).max(1)
}
