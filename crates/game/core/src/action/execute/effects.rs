//! Per-target effect application.
//!
//! Each helper resolves one effect on one target and records what happened
//! in the [`Resolution`]. Dead or missing targets are skipped, never errors.

use crate::action::cover::{covered_damage, find_coverer};
use crate::action::result::{Resolution, ResolutionEvent, SkipReason};
use crate::combat::damage::scale;
use crate::combat::{DamageKind, heal_amount, magic_damage, physical_damage};
use crate::env::StatusApplication;
use crate::state::{Combatant, CombatantId, Roster, StatusId};

use super::ExecContext;

/// One damaging hit.
#[derive(Clone, Copy, Debug)]
pub(super) struct Strike {
    pub power: f64,
    pub kind: DamageKind,
    /// Status inflicted on a target that survives the hit.
    pub status: Option<StatusApplication>,
    /// Single-target physical hits may be intercepted by a coverer.
    pub allow_cover: bool,
}

pub(super) fn strike(
    roster: &mut Roster,
    actor: &Combatant,
    target: CombatantId,
    strike: Strike,
    ctx: &mut ExecContext<'_>,
    out: &mut Resolution,
) {
    let Some(defender) = roster.get(target) else {
        out.skip(Some(target), SkipReason::UnknownCombatant);
        return;
    };
    if !defender.is_alive() {
        out.skip(Some(target), SkipReason::TargetDown);
        return;
    }

    let coverer = if strike.allow_cover && strike.kind == DamageKind::Physical {
        find_coverer(roster, actor.id, target)
    } else {
        None
    };
    let hit_id = coverer.unwrap_or(target);
    let Some(hit) = roster.get(hit_id) else {
        return;
    };

    let roll = match strike.kind {
        DamageKind::Magic => magic_damage(actor, hit, strike.power, ctx.tables, &mut *ctx.rng),
        _ => physical_damage(actor, hit, strike.power, ctx.tables, &mut *ctx.rng),
    };
    let amount = match coverer {
        Some(_) => covered_damage(roll.amount, ctx.tables),
        None => roll.amount,
    };

    let Some(hit) = roster.get_mut(hit_id) else {
        return;
    };
    hit.apply_hp(-i64::from(amount));
    out.push(ResolutionEvent::Damaged {
        source: actor.id,
        target: hit_id,
        amount,
        kind: strike.kind,
        critical: roll.critical,
        covered_for: coverer.map(|_| target),
    });

    if !hit.is_alive() {
        out.push(ResolutionEvent::Defeated { target: hit_id });
    } else if let Some(app) = strike.status {
        hit.add_status(app.status, app.turns);
        out.push(ResolutionEvent::StatusApplied {
            target: hit_id,
            status: app.status,
            turns: app.turns,
        });
    }
}

pub(super) fn heal(
    roster: &mut Roster,
    actor: &Combatant,
    target: CombatantId,
    power: f64,
    ctx: &mut ExecContext<'_>,
    out: &mut Resolution,
) {
    let Some(recipient) = roster.get_mut(target) else {
        out.skip(Some(target), SkipReason::UnknownCombatant);
        return;
    };
    if !recipient.is_alive() {
        out.skip(Some(target), SkipReason::TargetDown);
        return;
    }

    let roll = heal_amount(actor, power, ctx.tables, &mut *ctx.rng);
    let applied = recipient.apply_hp(i64::from(roll.amount));
    out.push(ResolutionEvent::Healed {
        source: actor.id,
        target,
        amount: applied.max(0) as u32,
        critical: roll.critical,
    });
}

/// Flat HP restore (items).
pub(super) fn restore_hp(
    roster: &mut Roster,
    actor: CombatantId,
    target: CombatantId,
    amount: u32,
    out: &mut Resolution,
) {
    if let Some(recipient) = roster.get_mut(target) {
        let applied = recipient.apply_hp(i64::from(amount));
        out.push(ResolutionEvent::Healed {
            source: actor,
            target,
            amount: applied.max(0) as u32,
            critical: false,
        });
    }
}

pub(super) fn restore_mp(
    roster: &mut Roster,
    target: CombatantId,
    amount: u32,
    out: &mut Resolution,
) {
    if let Some(recipient) = roster.get_mut(target) {
        let applied = recipient.apply_mp(i64::from(amount));
        out.push(ResolutionEvent::MpRestored {
            target,
            amount: applied.max(0) as u32,
        });
    }
}

/// Applies a counted status. `regen_percent` is stored for regen ticks.
pub(super) fn apply_status(
    roster: &mut Roster,
    target: CombatantId,
    app: StatusApplication,
    regen_percent: Option<u32>,
    out: &mut Resolution,
) {
    let Some(recipient) = roster.get_mut(target) else {
        out.skip(Some(target), SkipReason::UnknownCombatant);
        return;
    };
    if !recipient.is_alive() {
        out.skip(Some(target), SkipReason::TargetDown);
        return;
    }

    recipient.add_status(app.status, app.turns);
    if let (StatusId::Regen, Some(percent)) = (app.status, regen_percent) {
        recipient.regen_value = percent;
    }
    out.push(ResolutionEvent::StatusApplied {
        target,
        status: app.status,
        turns: app.turns,
    });
}

/// Sets the actor's covering flag.
pub(super) fn cover(roster: &mut Roster, actor: CombatantId, out: &mut Resolution) {
    if let Some(coverer) = roster.get_mut(actor) {
        coverer.add_status(StatusId::Cover, 1);
        out.push(ResolutionEvent::Covering { actor });
    }
}

/// Brings `target` back at `fraction` of max HP (at least 1).
pub(super) fn revive_percent(
    roster: &mut Roster,
    target: CombatantId,
    fraction: f64,
    out: &mut Resolution,
) {
    if let Some(fallen) = roster.get_mut(target) {
        let hp = scale(fallen.hp.maximum, fraction).max(1);
        if fallen.revive(hp) {
            out.push(ResolutionEvent::Revived {
                target,
                hp: fallen.hp.current,
            });
        }
    }
}

/// Resurrection skill with its two branches.
///
/// With enough MP the actor pays the cost and the target returns at the
/// tables' res fraction. Without it, the actor falls and the target returns
/// with full HP and MP. Returns false once the actor is down.
pub(super) fn resurrect(
    roster: &mut Roster,
    actor: CombatantId,
    target: CombatantId,
    cost: u32,
    ctx: &ExecContext<'_>,
    out: &mut Resolution,
) -> bool {
    match roster.get(target) {
        None => {
            out.skip(Some(target), SkipReason::UnknownCombatant);
            return true;
        }
        Some(fallen) if fallen.is_alive() => {
            out.skip(Some(target), SkipReason::TargetAlive);
            return true;
        }
        Some(_) => {}
    }
    let Some(caster) = roster.get_mut(actor) else {
        return false;
    };

    if caster.mp.current >= cost {
        caster.apply_mp(-i64::from(cost));
        if cost > 0 {
            out.push(ResolutionEvent::MpSpent {
                actor,
                amount: cost,
            });
        }
        revive_percent(roster, target, ctx.tables.res_fraction, out);
        return true;
    }

    let hp = caster.hp.current;
    caster.apply_hp(-i64::from(hp));
    out.push(ResolutionEvent::Sacrificed { actor, target });
    out.push(ResolutionEvent::Defeated { target: actor });

    if let Some(fallen) = roster.get_mut(target) {
        fallen.revive(fallen.hp.maximum);
        fallen.mp.fill();
        out.push(ResolutionEvent::Revived {
            target,
            hp: fallen.hp.current,
        });
    }
    false
}
