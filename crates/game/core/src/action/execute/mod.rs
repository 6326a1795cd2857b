//! Action execution.
//!
//! [`execute`] applies one chosen [`Action`] to the roster:
//!
//! 1. **Actor check**: a missing or dead actor cancels the action
//! 2. **Lookup**: unknown skills and items cancel the action
//! 3. **Cost**: every skill except resurrection pays its MP cost up front
//! 4. **Effects**: applied per target, in target order, through `effects`
//!
//! Target legality regarding the benefactor is enforced separately by
//! [`sanitize_targets`], which the orchestrator calls before dispatch.

mod context;
mod effects;
mod validation;

use crate::action::result::{Resolution, ResolutionEvent, SkipReason};
use crate::action::types::{Action, ActionKind, Target};
use crate::combat::DamageKind;
use crate::env::{EffectKind, ItemDef, SkillDef};
use crate::state::{Combatant, Roster};

use effects::Strike;

// ============================================================================
// Public Exports
// ============================================================================

pub use context::ExecContext;
pub use validation::sanitize_targets;

/// Audio cue for a plain attack.
pub const ATTACK_CUE: &str = "attack";

/// Audio cue for item use.
pub const ITEM_CUE: &str = "item";

/// Cue used when a skill does not name its own.
pub fn default_cue(effect: EffectKind) -> &'static str {
    match effect {
        EffectKind::Physical => "attack",
        EffectKind::Magic => "magic",
        EffectKind::Heal => "heal",
        EffectKind::Buff => "buff",
        EffectKind::Regen => "regen",
        EffectKind::MpRecovery => "mp_recovery",
        EffectKind::Res => "revive",
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Resolves `action` against the roster.
///
/// Never fails for a well-formed descriptor: dead targets are skipped,
/// shortages take their documented branch, and anything that cannot apply at
/// all yields a cancelled [`Resolution`] without mutation.
pub fn execute(roster: &mut Roster, action: &Action, ctx: &mut ExecContext<'_>) -> Resolution {
    let Some(actor) = roster.get(action.actor).cloned() else {
        return Resolution::cancelled(Some(action.actor), SkipReason::UnknownCombatant);
    };
    if !actor.is_alive() {
        return Resolution::cancelled(Some(actor.id), SkipReason::ActorDown);
    }

    match &action.kind {
        ActionKind::Attack => attack(roster, &actor, &action.target, ctx),
        ActionKind::Skill(id) => {
            let skills = ctx.skills;
            match skills.get(id) {
                Some(def) => cast(roster, &actor, def, &action.target, ctx),
                None => Resolution::cancelled(None, SkipReason::UnknownSkill),
            }
        }
        ActionKind::Item(id) => {
            let items = ctx.items;
            match items.get(id) {
                Some(def) => use_item(roster, &actor, def, &action.target, ctx),
                None => Resolution::cancelled(None, SkipReason::UnknownItem),
            }
        }
    }
}

// ============================================================================
// Action Kinds
// ============================================================================

fn attack(
    roster: &mut Roster,
    actor: &Combatant,
    target: &Target,
    ctx: &mut ExecContext<'_>,
) -> Resolution {
    let mut out = Resolution::new();
    let ids = target.ids(actor.id);
    out.cue(ATTACK_CUE, ids.first().copied());

    let hit = Strike {
        power: 1.0,
        kind: DamageKind::Physical,
        status: None,
        allow_cover: target.is_single(),
    };
    for id in ids {
        effects::strike(roster, actor, id, hit, ctx, &mut out);
    }
    out
}

fn cast(
    roster: &mut Roster,
    actor: &Combatant,
    def: &SkillDef,
    target: &Target,
    ctx: &mut ExecContext<'_>,
) -> Resolution {
    let mut out = Resolution::new();
    let ids = target.ids(actor.id);
    let cue = def
        .cue
        .clone()
        .unwrap_or_else(|| default_cue(def.effect).to_owned());
    out.cue(cue, ids.first().copied());

    if def.effect == EffectKind::Res {
        for id in ids {
            if !effects::resurrect(roster, actor.id, id, def.cost, ctx, &mut out) {
                break;
            }
        }
        return out;
    }

    if def.cost > 0 {
        if let Some(caster) = roster.get_mut(actor.id) {
            let spent = caster.apply_mp(-i64::from(def.cost));
            out.push(ResolutionEvent::MpSpent {
                actor: actor.id,
                amount: spent.unsigned_abs() as u32,
            });
        }
    }

    match def.effect {
        EffectKind::Physical | EffectKind::Magic => {
            let hit = Strike {
                power: def.power,
                kind: if def.effect == EffectKind::Magic {
                    DamageKind::Magic
                } else {
                    DamageKind::Physical
                },
                status: def.status,
                allow_cover: target.is_single(),
            };
            for id in ids {
                effects::strike(roster, actor, id, hit, ctx, &mut out);
            }
        }
        EffectKind::Heal => {
            for id in ids {
                effects::heal(roster, actor, id, def.power, ctx, &mut out);
            }
        }
        EffectKind::Buff => match def.status {
            Some(app) if app.status.is_flag() => effects::cover(roster, actor.id, &mut out),
            Some(app) => {
                for id in ids {
                    effects::apply_status(roster, id, app, None, &mut out);
                }
            }
            None => out.skip(None, SkipReason::NoTargets),
        },
        EffectKind::Regen => {
            let percent = (def.power * 100.0).round().max(0.0) as u32;
            if let Some(app) = def.status {
                for id in ids {
                    effects::apply_status(roster, id, app, Some(percent), &mut out);
                }
            }
        }
        EffectKind::MpRecovery => {
            effects::restore_mp(roster, actor.id, def.power.floor().max(0.0) as u32, &mut out);
        }
        EffectKind::Res => {}
    }
    out
}

fn use_item(
    roster: &mut Roster,
    actor: &Combatant,
    def: &ItemDef,
    target: &Target,
    ctx: &mut ExecContext<'_>,
) -> Resolution {
    let requested = target.ids(actor.id);
    if ctx.inventory.count(&def.id) == 0 {
        return Resolution::cancelled(requested.first().copied(), SkipReason::OutOfStock);
    }

    let wants_fallen = def.effect == EffectKind::Res;
    let eligible: Vec<_> = requested
        .iter()
        .copied()
        .filter(|&id| {
            roster
                .get(id)
                .is_some_and(|c| c.is_alive() != wants_fallen)
        })
        .collect();
    if eligible.is_empty() {
        let reason = if wants_fallen {
            SkipReason::TargetAlive
        } else {
            SkipReason::TargetDown
        };
        return Resolution::cancelled(requested.first().copied(), reason);
    }

    let mut out = Resolution::new();
    ctx.inventory.take(&def.id);
    out.push(ResolutionEvent::ItemUsed {
        actor: actor.id,
        item: def.id.clone(),
        remaining: ctx.inventory.count(&def.id),
    });
    out.cue(ITEM_CUE, eligible.first().copied());

    for id in eligible {
        match def.effect {
            EffectKind::Heal => effects::restore_hp(roster, actor.id, id, def.amount, &mut out),
            EffectKind::MpRecovery => effects::restore_mp(roster, id, def.amount, &mut out),
            EffectKind::Res => {
                let fraction = f64::from(def.amount) / 100.0;
                effects::revive_percent(roster, id, fraction, &mut out);
            }
            // Rejected when the item catalog is built.
            _ => {}
        }
    }
    out
}
