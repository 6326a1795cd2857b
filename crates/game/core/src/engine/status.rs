//! Start- and end-of-turn status processing.

use crate::combat::{poison_damage, regen_amount};
use crate::env::CombatTables;
use crate::state::{Combatant, StatusId};

/// Something a status did to the actor around its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusTick {
    /// The covering flag dropped at the start of the coverer's turn.
    CoverEnded,
    Regenerated { amount: u32 },
    /// Poison damage; `fatal` ends the turn before any action.
    Poisoned { amount: u32, fatal: bool },
    Expired(StatusId),
}

/// Runs the start-of-turn effects for `actor`.
///
/// Order: covering flag cleared, regen heal then decrement, poison damage
/// then decrement.
pub fn begin_turn(actor: &mut Combatant, tables: &CombatTables) -> Vec<StatusTick> {
    let mut ticks = Vec::new();

    if actor.is_covering {
        actor.is_covering = false;
        ticks.push(StatusTick::CoverEnded);
    }

    if actor.has_buff(StatusId::Regen) {
        let amount = regen_amount(actor, tables);
        let healed = actor.apply_hp(i64::from(amount));
        ticks.push(StatusTick::Regenerated {
            amount: healed.max(0) as u32,
        });
        if actor.buffs.tick(StatusId::Regen) {
            actor.regen_value = 0;
            ticks.push(StatusTick::Expired(StatusId::Regen));
        }
    }

    if actor.has_debuff(StatusId::Poison) {
        let amount = poison_damage(actor, tables);
        actor.apply_hp(-i64::from(amount));
        let fatal = !actor.is_alive();
        ticks.push(StatusTick::Poisoned { amount, fatal });
        if fatal {
            return ticks;
        }
        if actor.debuffs.tick(StatusId::Poison) {
            ticks.push(StatusTick::Expired(StatusId::Poison));
        }
    }

    ticks
}

/// Decrements every counted effect not already handled at turn start.
///
/// Returns the effects that expired.
pub fn end_turn(actor: &mut Combatant) -> Vec<StatusId> {
    if !actor.is_alive() {
        return Vec::new();
    }
    let mut expired = actor.buffs.tick_all_except(&[StatusId::Regen]);
    expired.extend(actor.debuffs.tick_all_except(&[StatusId::Poison]));
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, Role, Side};

    fn subject(max_hp: u32) -> Combatant {
        Combatant::new("s", Side::Party, Role::Hero, max_hp, 0, CombatStats::default())
    }

    #[test]
    fn cover_drops_at_own_turn_start() {
        let mut c = subject(100);
        c.add_status(StatusId::Cover, 1);

        assert_eq!(begin_turn(&mut c, &CombatTables::default()), vec![
            StatusTick::CoverEnded
        ]);
        assert!(!c.is_covering);
    }

    #[test]
    fn regen_heals_then_counts_down() {
        let mut c = subject(200);
        c.apply_hp(-100);
        c.add_status(StatusId::Regen, 1);
        c.regen_value = 15;

        let ticks = begin_turn(&mut c, &CombatTables::default());

        assert_eq!(c.hp.current, 130);
        assert_eq!(ticks, vec![
            StatusTick::Regenerated { amount: 30 },
            StatusTick::Expired(StatusId::Regen),
        ]);
        assert_eq!(c.regen_value, 0);
    }

    #[test]
    fn lethal_poison_stops_processing() {
        let mut c = subject(200);
        c.apply_hp(-195);
        c.add_status(StatusId::Poison, 3);

        let ticks = begin_turn(&mut c, &CombatTables::default());

        assert!(!c.is_alive());
        assert_eq!(ticks, vec![StatusTick::Poisoned {
            amount: 10,
            fatal: true
        }]);
    }

    #[test]
    fn end_turn_skips_effects_ticked_at_start() {
        let mut c = subject(100);
        c.add_status(StatusId::AtkUp, 1);
        c.add_status(StatusId::AtkDown, 2);
        c.add_status(StatusId::Poison, 2);
        c.add_status(StatusId::Regen, 2);

        let expired = end_turn(&mut c);

        assert_eq!(expired, vec![StatusId::AtkUp]);
        assert_eq!(c.debuffs.remaining(StatusId::AtkDown), Some(1));
        assert_eq!(c.debuffs.remaining(StatusId::Poison), Some(2));
        assert_eq!(c.buffs.remaining(StatusId::Regen), Some(2));
    }
}
