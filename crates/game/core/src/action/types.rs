//! Action descriptors.

use crate::env::{ItemId, SkillId};
use crate::state::CombatantId;

/// What the actor does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Plain physical attack with power 1.
    Attack,
    Skill(SkillId),
    Item(ItemId),
}

/// Who the action lands on, chosen before submission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Single(CombatantId),
    Many(Vec<CombatantId>),
    /// The actor itself.
    Actor,
}

impl Target {
    /// Target ids with [`Target::Actor`] resolved to `actor`.
    pub fn ids(&self, actor: CombatantId) -> Vec<CombatantId> {
        match self {
            Target::Single(id) => vec![*id],
            Target::Many(ids) => ids.clone(),
            Target::Actor => vec![actor],
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Target::Single(_))
    }
}

/// A chosen action, consumed once by [`execute`](super::execute).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub target: Target,
}

impl Action {
    pub fn new(actor: CombatantId, kind: ActionKind, target: Target) -> Self {
        Self {
            actor,
            kind,
            target,
        }
    }

    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Attack, Target::Single(target))
    }

    pub fn skill(actor: CombatantId, skill: impl Into<SkillId>, target: Target) -> Self {
        Self::new(actor, ActionKind::Skill(skill.into()), target)
    }

    pub fn item(actor: CombatantId, item: impl Into<ItemId>, target: Target) -> Self {
        Self::new(actor, ActionKind::Item(item.into()), target)
    }
}
