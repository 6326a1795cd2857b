//! Skill lookups over what an actor knows and can currently afford.

use crate::env::{EffectKind, Scope, SkillCatalog, SkillDef};
use crate::state::{Combatant, StatusId};

/// Affordable skills of one actor, in the order it lists them.
pub(super) struct Known<'a> {
    actor: &'a Combatant,
    catalog: &'a SkillCatalog,
}

impl<'a> Known<'a> {
    pub(super) fn new(actor: &'a Combatant, catalog: &'a SkillCatalog) -> Self {
        Self { actor, catalog }
    }

    fn usable(&self) -> impl Iterator<Item = &'a SkillDef> + '_ {
        let mp = self.actor.mp.current;
        self.actor
            .skills
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .filter(move |skill| skill.cost <= mp)
    }

    fn first(&self, pred: impl Fn(&SkillDef) -> bool) -> Option<&'a SkillDef> {
        self.usable().find(|skill| pred(skill))
    }

    /// Highest power match; the earlier skill wins ties.
    fn strongest(&self, pred: impl Fn(&SkillDef) -> bool) -> Option<&'a SkillDef> {
        self.usable()
            .filter(|skill| pred(skill))
            .fold(None, |best: Option<&'a SkillDef>, skill| match best {
                Some(current) if current.power >= skill.power => Some(current),
                _ => Some(skill),
            })
    }

    pub(super) fn self_buff(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.scope == Scope::Actor && s.grants(StatusId::AtkUp))
    }

    pub(super) fn all_target_offensive(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.scope == Scope::All && s.is_offensive())
    }

    pub(super) fn single_heavy(&self) -> Option<&'a SkillDef> {
        self.strongest(|s| s.scope == Scope::Single && s.effect.is_damage())
    }

    /// Highest power single-target offensive skill, the King's special.
    pub(super) fn special(&self) -> Option<&'a SkillDef> {
        self.strongest(|s| s.scope == Scope::Single && s.is_offensive())
    }

    pub(super) fn heal_all(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.scope == Scope::All && s.effect == EffectKind::Heal)
    }

    pub(super) fn heal_single(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.scope == Scope::Single && s.effect == EffectKind::Heal)
    }

    pub(super) fn any_heal(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.effect == EffectKind::Heal)
    }

    pub(super) fn buff_all(&self) -> Option<&'a SkillDef> {
        self.first(|s| s.scope == Scope::All && s.effect == EffectKind::Buff && !s.is_offensive())
    }

    pub(super) fn magic_all(&self) -> Option<&'a SkillDef> {
        self.strongest(|s| s.scope == Scope::All && s.effect == EffectKind::Magic)
    }

    pub(super) fn magic_single(&self) -> Option<&'a SkillDef> {
        self.strongest(|s| s.scope == Scope::Single && s.effect == EffectKind::Magic)
    }

    /// Whether the actor lists any magic skill, affordable or not.
    pub(super) fn knows_magic(&self) -> bool {
        self.actor
            .skills
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .any(|s| s.effect == EffectKind::Magic)
    }
}
