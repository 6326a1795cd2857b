//! Heal calculation.

use crate::env::{CombatTables, RngSource};
use crate::state::Combatant;

use super::damage::scale;
use super::result::HealRoll;

/// HP restored by `healer` with a heal of the given `power`.
///
/// # Formula
///
/// ```text
/// amount = floor(rec × power × variance)     variance ∈ [min, min + range]
/// amount = floor(amount × super_multiplier)  on super heal
/// ```
pub fn heal_amount(
    healer: &Combatant,
    power: f64,
    tables: &CombatTables,
    rng: &mut dyn RngSource,
) -> HealRoll {
    let params = tables.heal;

    let variance = rng.spread(params.variance_min, params.variance_range);
    let mut amount = (f64::from(healer.stats.rec) * power * variance)
        .floor()
        .max(0.0) as u32;

    let critical = rng.chance(params.super_rate);
    if critical {
        amount = scale(amount, params.super_multiplier);
    }

    HealRoll { amount, critical }
}

/// Regen tick for `target`: its `regen_value` percent of max HP, at least 1.
///
/// A zero `regen_value` falls back to the tables' default percent.
pub fn regen_amount(target: &Combatant, tables: &CombatTables) -> u32 {
    let percent = match target.regen_value {
        0 => tables.regen_percent,
        value => value,
    };
    (u64::from(target.hp.maximum) * u64::from(percent) / 100).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{CombatStats, ResourceMeter, Role, Side};

    fn cleric() -> Combatant {
        Combatant::new("cleric", Side::Party, Role::Support, 80, 40, CombatStats {
            rec: 20,
            spd: 90,
            ..CombatStats::default()
        })
    }

    #[test]
    fn flat_heal_is_rec_times_power() {
        let mut rng = ScriptedRng::constant(0.5);
        let roll = heal_amount(&cleric(), 1.5, &CombatTables::flat(), &mut rng);
        assert_eq!(roll, HealRoll {
            amount: 30,
            critical: false,
        });
    }

    #[test]
    fn super_heal_multiplies_after_variance() {
        // variance 0.95 + 0.5 × 0.1 = 1.0, super roll 0.01 < 0.1
        let mut rng = ScriptedRng::new([0.5, 0.01], 0.9);
        let roll = heal_amount(&cleric(), 2.0, &CombatTables::default(), &mut rng);

        assert!(roll.critical);
        assert_eq!(roll.amount, 60);
    }

    #[test]
    fn regen_uses_own_percent_or_default() {
        let tables = CombatTables::default();
        let mut target = cleric();
        target.hp = ResourceMeter::full(250);

        assert_eq!(regen_amount(&target, &tables), 25);
        target.regen_value = 20;
        assert_eq!(regen_amount(&target, &tables), 50);

        target.hp = ResourceMeter::full(3);
        assert_eq!(regen_amount(&target, &tables), 1);
    }
}
