use std::cmp::Ordering;

use crate::state::{CombatantId, Roster};

/// Turn scheduling view over a [`Roster`].
///
/// Holds no state of its own: order is recomputed from the currently alive
/// combatants on every query, so roster mutations between turns (splits,
/// fusions, revivals) are always observed.
pub struct TurnScheduler<'a> {
    roster: &'a mut Roster,
}

impl<'a> TurnScheduler<'a> {
    pub fn new(roster: &'a mut Roster) -> Self {
        Self { roster }
    }

    /// Alive combatants sorted by speed descending.
    ///
    /// Ties keep roster order (party first), which is also the tie-break for
    /// simultaneous readiness.
    pub fn speed_order(&self) -> Vec<CombatantId> {
        let mut alive: Vec<(CombatantId, u32)> = self
            .roster
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| (c.id, c.stats.spd))
            .collect();

        // Stable sort keeps roster order among equal speeds.
        alive.sort_by(|a, b| b.1.cmp(&a.1));
        alive.into_iter().map(|(id, _)| id).collect()
    }

    /// Advances the action-value clock and returns the next actor.
    ///
    /// Returns `None` without touching the roster when the battle is already
    /// decided or nobody is alive.
    pub fn prepare_next_turn(&mut self) -> Option<CombatantId> {
        if self.roster.is_decided() {
            return None;
        }

        let order = self.speed_order();
        let lowest = order
            .iter()
            .filter_map(|&id| self.roster.get(id).map(|c| c.action_value))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))?;

        if lowest > 0.0 {
            for &id in &order {
                if let Some(combatant) = self.roster.get_mut(id) {
                    combatant.action_value -= lowest;
                }
            }
        }

        order.into_iter().find(|&id| {
            self.roster
                .get(id)
                .is_some_and(|c| c.action_value <= 0.0)
        })
    }

    /// Pushes the actor back by `K / speed` after its turn.
    pub fn complete_turn(&mut self, actor: CombatantId) {
        let k = self.roster.action_value_k();
        if let Some(combatant) = self.roster.get_mut(actor) {
            combatant.reset_action_value(k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, Combatant, Role, Side};

    fn runner(name: &str, side: Side, spd: u32) -> Combatant {
        Combatant::new(name, side, Role::Hero, 100, 0, CombatStats {
            spd,
            ..CombatStats::default()
        })
    }

    #[test]
    fn faster_combatant_acts_first() {
        let mut roster = Roster::new(10_000.0);
        let slow = roster.insert(runner("slow", Side::Party, 50));
        let fast = roster.insert(runner("fast", Side::Enemy, 200));

        let mut scheduler = TurnScheduler::new(&mut roster);
        assert_eq!(scheduler.speed_order(), vec![fast, slow]);
        assert_eq!(scheduler.prepare_next_turn(), Some(fast));
    }

    #[test]
    fn ties_fall_back_to_speed_order() {
        let mut roster = Roster::new(10_000.0);
        let first = roster.insert(runner("first", Side::Party, 100));
        let second = roster.insert(runner("second", Side::Enemy, 100));

        let mut scheduler = TurnScheduler::new(&mut roster);
        assert_eq!(scheduler.prepare_next_turn(), Some(first));
        scheduler.complete_turn(first);
        assert_eq!(scheduler.prepare_next_turn(), Some(second));
    }

    #[test]
    fn double_speed_acts_twice_as_often() {
        let mut roster = Roster::new(10_000.0);
        let fast = roster.insert(runner("fast", Side::Party, 200));
        let slow = roster.insert(runner("slow", Side::Enemy, 100));

        let mut scheduler = TurnScheduler::new(&mut roster);
        let (mut fast_turns, mut slow_turns) = (0, 0);
        for _ in 0..300 {
            let actor = scheduler.prepare_next_turn().unwrap();
            if actor == fast {
                fast_turns += 1;
            } else if actor == slow {
                slow_turns += 1;
            }
            scheduler.complete_turn(actor);
        }

        assert_eq!(fast_turns, 200);
        assert_eq!(slow_turns, 100);
    }

    #[test]
    fn dead_combatants_are_skipped() {
        let mut roster = Roster::new(10_000.0);
        let fast = roster.insert(runner("fast", Side::Party, 300));
        let slow = roster.insert(runner("slow", Side::Party, 100));
        roster.insert(runner("foe", Side::Enemy, 10));
        roster.get_mut(fast).unwrap().apply_hp(-100);

        let mut scheduler = TurnScheduler::new(&mut roster);
        assert_eq!(scheduler.prepare_next_turn(), Some(slow));
    }

    #[test]
    fn decided_battle_is_not_advanced() {
        let mut roster = Roster::new(10_000.0);
        roster.insert(runner("hero", Side::Party, 100));
        let foe = roster.insert(runner("foe", Side::Enemy, 100));
        roster.get_mut(foe).unwrap().apply_hp(-100);
        let before = roster.clone();

        let mut scheduler = TurnScheduler::new(&mut roster);
        assert_eq!(scheduler.prepare_next_turn(), None);
        assert_eq!(roster, before);
    }
}
