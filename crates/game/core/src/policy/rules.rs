//! One rule per archetype. A rule returns `None` to fall back to a plain
//! attack on a random opponent.

use crate::action::{Action, ActionKind, Target};
use crate::env::{RngSource, Scope, SkillDef};
use crate::state::{Combatant, CombatantId, Role, StatusId};

use super::known::Known;
use super::odds;

/// Everything a rule may look at, plus the shared random source.
pub(super) struct Situation<'a, 'r> {
    pub(super) actor: &'a Combatant,
    pub(super) opponents: &'a [&'a Combatant],
    pub(super) allies: &'a [&'a Combatant],
    pub(super) known: Known<'a>,
    pub(super) rng: &'r mut dyn RngSource,
}

impl<'a> Situation<'a, '_> {
    fn cast(&self, skill: &SkillDef, target: Target) -> Action {
        Action::skill(self.actor.id, skill.id.clone(), target)
    }

    fn random_opponent(&mut self) -> Option<CombatantId> {
        if self.opponents.is_empty() {
            return None;
        }
        Some(self.opponents[self.rng.index(self.opponents.len())].id)
    }

    fn all_opponents(&self) -> Target {
        Target::Many(self.opponents.iter().map(|c| c.id).collect())
    }

    fn all_allies(&self) -> Target {
        Target::Many(self.allies.iter().map(|c| c.id).collect())
    }

    fn wounded_allies(&self) -> Vec<&'a Combatant> {
        self.allies.iter().copied().filter(|c| is_wounded(c)).collect()
    }

    /// Plain attack on a uniform-random opponent.
    ///
    /// With nobody to hit the action carries an empty target list and
    /// resolves to nothing.
    pub(super) fn attack(&mut self) -> Action {
        match self.random_opponent() {
            Some(target) => Action::attack(self.actor.id, target),
            None => Action::new(self.actor.id, ActionKind::Attack, Target::Many(Vec::new())),
        }
    }
}

fn is_wounded(combatant: &Combatant) -> bool {
    u64::from(combatant.hp.current) * 100
        < u64::from(combatant.hp.maximum) * odds::WOUNDED_PERCENT
}

pub(super) fn boss(s: &mut Situation<'_, '_>) -> Option<Action> {
    if !s.actor.has_buff(StatusId::AtkUp) {
        if let Some(buff) = s.known.self_buff() {
            if s.rng.chance(odds::BOSS_SELF_BUFF) {
                return Some(s.cast(buff, Target::Actor));
            }
        }
    }

    let wide = s.known.all_target_offensive();
    let heavy = s.known.single_heavy();
    if (wide.is_none() && heavy.is_none()) || s.opponents.is_empty() {
        return None;
    }

    let roll = s.rng.next_f64();
    if roll < odds::BOSS_ALL_TARGET {
        return wide.map(|skill| s.cast(skill, s.all_opponents()));
    }
    if roll < odds::BOSS_HEAVY {
        let skill = heavy?;
        let target = s.random_opponent()?;
        return Some(s.cast(skill, Target::Single(target)));
    }
    None
}

pub(super) fn healer(s: &mut Situation<'_, '_>) -> Option<Action> {
    let wounded = s.wounded_allies();

    if wounded.len() >= 2 {
        if let Some(skill) = s.known.heal_all() {
            return Some(s.cast(skill, s.all_allies()));
        }
    }
    if let Some(lowest) = wounded.iter().min_by_key(|c| c.hp.current) {
        if let Some(skill) = s.known.heal_single() {
            return Some(s.cast(skill, Target::Single(lowest.id)));
        }
    }

    let skill = s.known.heal_single()?;
    let damaged: Vec<CombatantId> = s
        .allies
        .iter()
        .filter(|c| !c.hp.is_full())
        .map(|c| c.id)
        .collect();
    if damaged.is_empty() || !s.rng.chance(odds::HEALER_TOP_UP) {
        return None;
    }
    let target = damaged[s.rng.index(damaged.len())];
    Some(s.cast(skill, Target::Single(target)))
}

pub(super) fn support(s: &mut Situation<'_, '_>) -> Option<Action> {
    if s.actor.has_buff(StatusId::AtkUp) {
        return None;
    }
    let skill = s.known.buff_all()?;
    if s.rng.chance(odds::SUPPORT_BUFF) {
        return Some(s.cast(skill, s.all_allies()));
    }
    None
}

pub(super) fn caster(s: &mut Situation<'_, '_>) -> Option<Action> {
    if s.opponents.is_empty() {
        return None;
    }
    if let Some(skill) = s.known.magic_all() {
        if s.rng.chance(odds::CASTER_ALL_TARGET) {
            return Some(s.cast(skill, s.all_opponents()));
        }
    }
    if let Some(skill) = s.known.magic_single() {
        if s.rng.chance(odds::CASTER_SINGLE_TARGET) {
            let target = s.random_opponent()?;
            return Some(s.cast(skill, Target::Single(target)));
        }
    }
    None
}

pub(super) fn king(s: &mut Situation<'_, '_>) -> Option<Action> {
    let skill = s.known.special()?;
    if s.opponents.is_empty() || !s.rng.chance(odds::KING_SPECIAL) {
        return None;
    }
    let target = s.random_opponent()?;
    Some(s.cast(skill, Target::Single(target)))
}

pub(super) fn benefactor(s: &mut Situation<'_, '_>) -> Option<Action> {
    let skill = s.known.any_heal()?;
    let wounded = s.wounded_allies();
    let lowest = wounded.iter().min_by_key(|c| c.hp.current)?;
    let target = match skill.scope {
        Scope::All => s.all_allies(),
        _ => Target::Single(lowest.id),
    };
    Some(s.cast(skill, target))
}

/// Auto-controlled party member: support roles heal, spellcasters nuke,
/// everyone else swings.
pub(super) fn player(s: &mut Situation<'_, '_>) -> Option<Action> {
    if s.actor.role == Role::Support {
        return healer(s);
    }
    if s.known.knows_magic() {
        return caster(s);
    }
    None
}
