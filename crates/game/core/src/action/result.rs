//! What an executed action did.
//!
//! Resolution never fails: invalid targets and shortages are recorded as
//! [`ResolutionEvent::Skipped`] entries, and a [`Resolution`] flagged as
//! cancelled guarantees that nothing was mutated.

use crate::combat::DamageKind;
use crate::env::ItemId;
use crate::state::{CombatantId, StatusId};

/// Why part (or all) of an action did not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkipReason {
    ActorDown,
    TargetDown,
    /// Resurrection aimed at a living combatant.
    TargetAlive,
    /// The benefactor cannot be targeted.
    ProtectedTarget,
    NoTargets,
    OutOfStock,
    UnknownSkill,
    UnknownItem,
    UnknownCombatant,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionEvent {
    Damaged {
        source: CombatantId,
        target: CombatantId,
        amount: u32,
        kind: DamageKind,
        critical: bool,
        /// Original target when a coverer took the hit.
        covered_for: Option<CombatantId>,
    },
    Healed {
        source: CombatantId,
        target: CombatantId,
        amount: u32,
        critical: bool,
    },
    Defeated {
        target: CombatantId,
    },
    Skipped {
        target: Option<CombatantId>,
        reason: SkipReason,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusId,
        turns: u32,
    },
    Covering {
        actor: CombatantId,
    },
    Revived {
        target: CombatantId,
        hp: u32,
    },
    /// The actor gave its life to fully revive `target`.
    Sacrificed {
        actor: CombatantId,
        target: CombatantId,
    },
    MpSpent {
        actor: CombatantId,
        amount: u32,
    },
    MpRestored {
        target: CombatantId,
        amount: u32,
    },
    ItemUsed {
        actor: CombatantId,
        item: ItemId,
        remaining: u32,
    },
    /// Named audio cue, optionally anchored to a target for visuals.
    Cue {
        name: String,
        target: Option<CombatantId>,
    },
}

/// Outcome of one [`execute`](super::execute) call.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub events: Vec<ResolutionEvent>,
    /// The action was dropped before anything was mutated.
    pub cancelled: bool,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cancelled resolution carrying the reason.
    pub fn cancelled(target: Option<CombatantId>, reason: SkipReason) -> Self {
        Self {
            events: vec![ResolutionEvent::Skipped { target, reason }],
            cancelled: true,
        }
    }

    pub fn push(&mut self, event: ResolutionEvent) {
        self.events.push(event);
    }

    pub fn skip(&mut self, target: Option<CombatantId>, reason: SkipReason) {
        self.push(ResolutionEvent::Skipped { target, reason });
    }

    pub fn cue(&mut self, name: impl Into<String>, target: Option<CombatantId>) {
        self.push(ResolutionEvent::Cue {
            name: name.into(),
            target,
        });
    }

    /// Total damage dealt to `target`.
    pub fn damage_to(&self, target: CombatantId) -> u32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                ResolutionEvent::Damaged {
                    target: hit, amount, ..
                } if *hit == target => Some(*amount),
                _ => None,
            })
            .sum()
    }

    /// Ids defeated by this action.
    pub fn defeated(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.events.iter().filter_map(|event| match event {
            ResolutionEvent::Defeated { target } => Some(*target),
            _ => None,
        })
    }

    /// Ids brought back by this action.
    pub fn revived(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.events.iter().filter_map(|event| match event {
            ResolutionEvent::Revived { target, .. } => Some(*target),
            _ => None,
        })
    }
}
