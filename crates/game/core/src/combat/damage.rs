//! Damage calculation.

use crate::env::{CombatTables, RngSource};
use crate::state::{Combatant, StatusId};

use super::result::DamageRoll;

// ============================================================================
// Helpers
// ============================================================================

/// `floor(value × factor)` on non-negative integers.
#[inline]
pub(crate) fn scale(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).floor().max(0.0) as u32
}

/// Applies the attacker's `atk_up` / `atk_down` multipliers, each floored.
fn apply_attack_modifiers(dmg: u32, attacker: &Combatant, tables: &CombatTables) -> u32 {
    let mut dmg = dmg;
    if attacker.has_buff(StatusId::AtkUp) {
        dmg = scale(dmg, tables.modifiers.atk_up);
    }
    if attacker.has_debuff(StatusId::AtkDown) {
        dmg = scale(dmg, tables.modifiers.atk_down);
    }
    dmg
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Physical damage dealt by `attacker` to `defender`.
///
/// # Formula
///
/// ```text
/// dmg = floor(atk × power × variance)        variance ∈ [min, min + range]
/// dmg = floor(dmg × 1.25)   if atk_up
/// dmg = floor(dmg × 0.7)    if atk_down
/// dmg = floor(dmg × 1.5)    on critical
/// dmg = dmg - floor(def / def_reduction_rate)   (saturating)
/// dmg = floor(dmg × (1 - relic_reduction))      if defender holds the relic
/// dmg = max(dmg, 1)
/// ```
///
/// The order of the steps is part of the balance and must not change.
pub fn physical_damage(
    attacker: &Combatant,
    defender: &Combatant,
    power: f64,
    tables: &CombatTables,
    rng: &mut dyn RngSource,
) -> DamageRoll {
    let params = tables.physical;

    let variance = rng.spread(params.variance_min, params.variance_range);
    let base = f64::from(attacker.stats.atk) * power * variance;
    let mut dmg = base.floor().max(0.0) as u32;

    dmg = apply_attack_modifiers(dmg, attacker, tables);

    let critical = rng.chance(params.crit_rate);
    if critical {
        dmg = scale(dmg, params.crit_multiplier);
    }

    dmg = dmg.saturating_sub(defender.stats.def / params.def_reduction_rate.max(1));

    if defender.damage_reduction {
        dmg = scale(dmg, 1.0 - params.relic_reduction);
    }

    DamageRoll {
        amount: dmg.max(1),
        critical,
    }
}

/// Magic damage dealt by `attacker` to `defender`.
///
/// # Formula
///
/// ```text
/// dmg = floor(matk × power + variance)       variance ∈ [min, min + range]
/// dmg = floor(dmg × 1.25)   if atk_up
/// dmg = floor(dmg × 0.7)    if atk_down
/// dmg = dmg - floor(mdef / mdef_reduction_rate)  (saturating)
/// dmg = max(dmg, 1)
/// ```
///
/// No critical roll and no relic reduction.
pub fn magic_damage(
    attacker: &Combatant,
    defender: &Combatant,
    power: f64,
    tables: &CombatTables,
    rng: &mut dyn RngSource,
) -> DamageRoll {
    let params = tables.magic;

    let variance = rng.spread(params.variance_min, params.variance_range);
    let base = f64::from(attacker.stats.matk) * power + variance;
    let mut dmg = base.floor().max(0.0) as u32;

    dmg = apply_attack_modifiers(dmg, attacker, tables);
    dmg = dmg.saturating_sub(defender.stats.mdef / params.mdef_reduction_rate.max(1));

    DamageRoll {
        amount: dmg.max(1),
        critical: false,
    }
}

/// Poison tick damage: `max(1, min(cap, floor(max_hp × percent)))`.
pub fn poison_damage(target: &Combatant, tables: &CombatTables) -> u32 {
    let params = tables.poison;
    scale(target.hp.maximum, params.percent)
        .min(params.cap)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{CombatStats, Role, Side};

    fn fighter(side: Side, stats: CombatStats) -> Combatant {
        Combatant::new("f", side, Role::Hero, 100, 50, stats)
    }

    fn hero() -> Combatant {
        fighter(Side::Party, CombatStats {
            atk: 50,
            def: 10,
            matk: 30,
            spd: 100,
            ..CombatStats::default()
        })
    }

    fn foe(def: u32) -> Combatant {
        fighter(Side::Enemy, CombatStats {
            def,
            mdef: def,
            spd: 100,
            ..CombatStats::default()
        })
    }

    #[test]
    fn flat_physical_subtracts_half_defense() {
        let tables = CombatTables::flat();
        let mut rng = ScriptedRng::constant(0.5);

        let roll = physical_damage(&hero(), &foe(5), 1.0, &tables, &mut rng);
        assert_eq!(roll.amount, 48);
        assert!(!roll.critical);
    }

    #[test]
    fn damage_never_drops_below_one() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::constant(0.0);
        let weak = fighter(Side::Enemy, CombatStats {
            atk: 1,
            matk: 0,
            ..CombatStats::default()
        });
        let wall = foe(10_000);

        assert_eq!(physical_damage(&weak, &wall, 1.0, &tables, &mut rng).amount, 1);
        assert_eq!(magic_damage(&weak, &wall, 1.0, &tables, &mut rng).amount, 1);
    }

    #[test]
    fn modifiers_crit_and_relic_apply_in_order() {
        let tables = CombatTables::default();
        let mut attacker = hero();
        attacker.add_status(StatusId::AtkUp, 2);
        let mut defender = foe(10);
        defender.damage_reduction = true;

        // variance draw 0.5 → ×1.0, crit draw 0.05 < 0.1.
        let mut rng = ScriptedRng::new([0.5, 0.05], 0.9);
        let roll = physical_damage(&attacker, &defender, 1.0, &tables, &mut rng);

        // 50 → 62 (atk_up) → 93 (crit) → 88 (def 5) → 70 (relic ×0.8)
        assert!(roll.critical);
        assert_eq!(roll.amount, 70);
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn magic_ignores_the_relic_and_crits() {
        let tables = CombatTables::default();
        let mut defender = foe(10);
        defender.damage_reduction = true;

        // Additive variance draw 0.5 → +5.
        let mut rng = ScriptedRng::new([0.5], 0.0);
        let roll = magic_damage(&hero(), &defender, 2.0, &tables, &mut rng);

        // floor(30 × 2 + 5) = 65 → 60 after mdef
        assert_eq!(roll.amount, 60);
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn atk_down_weakens_hits() {
        let tables = CombatTables::flat();
        let mut attacker = hero();
        attacker.add_status(StatusId::AtkDown, 2);
        let mut rng = ScriptedRng::constant(0.5);

        let roll = physical_damage(&attacker, &foe(0), 1.0, &tables, &mut rng);
        assert_eq!(roll.amount, 35);
    }

    #[test]
    fn poison_uses_percent_with_a_cap() {
        let tables = CombatTables::default();
        let mut big = foe(0);
        big.hp = crate::state::ResourceMeter::full(1000);
        let mut small = foe(0);
        small.hp = crate::state::ResourceMeter::full(200);
        let mut tiny = foe(0);
        tiny.hp = crate::state::ResourceMeter::full(5);

        assert_eq!(poison_damage(&big, &tables), 50);
        assert_eq!(poison_damage(&small, &tables), 10);
        assert_eq!(poison_damage(&tiny, &tables), 1);
    }
}
