//! Turns rule-level results into log lines, sound cues and visual effects.

use battle_core::{
    Action, ActionKind, Catalogs, CombatantId, Resolution, ResolutionEvent, Roster, SkipReason,
    StatusId, StatusTick,
};

use crate::events::{BattleEvent, EventBus, LogTone, SpecialEvent};

/// Read-only view used to put names on ids while publishing.
pub(crate) struct Narrator<'a> {
    bus: &'a EventBus,
    roster: &'a Roster,
    catalogs: &'a Catalogs,
}

impl<'a> Narrator<'a> {
    pub(crate) fn new(bus: &'a EventBus, roster: &'a Roster, catalogs: &'a Catalogs) -> Self {
        Self {
            bus,
            roster,
            catalogs,
        }
    }

    fn name(&self, id: CombatantId) -> String {
        self.roster
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn effect(&self, name: &str, target: Option<CombatantId>) {
        self.bus.publish(BattleEvent::Effect {
            name: name.to_owned(),
            target,
        });
    }

    /// Headline for the chosen action, published before its results.
    pub(crate) fn action(&self, action: &Action) {
        let actor = self.name(action.actor);
        let text = match &action.kind {
            ActionKind::Attack => format!("{actor} attacks!"),
            ActionKind::Skill(id) => {
                let skill = self
                    .catalogs
                    .skills
                    .get(id)
                    .map_or(id.as_str(), |s| s.name.as_str());
                format!("{actor} uses {skill}!")
            }
            ActionKind::Item(id) => {
                let item = self
                    .catalogs
                    .items
                    .get(id)
                    .map_or(id.as_str(), |i| i.name.as_str());
                format!("{actor} uses a {item}!")
            }
        };
        self.bus.log(text, LogTone::Normal);
    }

    pub(crate) fn resolution(&self, resolution: &Resolution) {
        for event in &resolution.events {
            self.resolution_event(event);
        }
    }

    fn resolution_event(&self, event: &ResolutionEvent) {
        match event {
            ResolutionEvent::Damaged {
                target,
                amount,
                critical,
                covered_for,
                ..
            } => {
                if let Some(original) = covered_for {
                    self.bus.log(
                        format!("{} shields {}!", self.name(*target), self.name(*original)),
                        LogTone::Status,
                    );
                    self.effect("cover", Some(*target));
                }
                let text = format!("{} takes {amount} damage.", self.name(*target));
                if *critical {
                    self.bus.announce(format!("Critical hit! {text}"), LogTone::Damage);
                    self.effect("critical", Some(*target));
                } else {
                    self.bus.log(text, LogTone::Damage);
                    self.effect("hit", Some(*target));
                }
            }
            ResolutionEvent::Healed {
                target,
                amount,
                critical,
                ..
            } => {
                let text = format!("{} recovers {amount} HP.", self.name(*target));
                if *critical {
                    self.bus.announce(format!("Great heal! {text}"), LogTone::Heal);
                } else {
                    self.bus.log(text, LogTone::Heal);
                }
                self.effect("heal", Some(*target));
            }
            ResolutionEvent::Defeated { target } => {
                self.bus
                    .announce(format!("{} is defeated!", self.name(*target)), LogTone::Damage);
                self.effect("defeat", Some(*target));
            }
            ResolutionEvent::Skipped { target, reason } => {
                let who = target.map(|id| self.name(id));
                self.bus.log(skip_text(who.as_deref(), *reason), LogTone::System);
            }
            ResolutionEvent::StatusApplied { target, status, .. } => {
                self.bus.log(
                    format!("{} is affected by {}.", self.name(*target), status_label(*status)),
                    LogTone::Status,
                );
                self.effect(status.as_ref(), Some(*target));
            }
            ResolutionEvent::Covering { actor } => {
                self.bus
                    .log(format!("{} stands guard.", self.name(*actor)), LogTone::Status);
                self.effect("guard", Some(*actor));
            }
            ResolutionEvent::Revived { target, hp } => {
                self.bus.announce(
                    format!("{} is revived with {hp} HP!", self.name(*target)),
                    LogTone::Heal,
                );
                self.effect("revive", Some(*target));
            }
            ResolutionEvent::Sacrificed { actor, target } => {
                self.bus.announce(
                    format!(
                        "{} gives everything to save {}!",
                        self.name(*actor),
                        self.name(*target)
                    ),
                    LogTone::Damage,
                );
                self.effect("sacrifice", Some(*actor));
            }
            ResolutionEvent::MpSpent { .. } => {}
            ResolutionEvent::MpRestored { target, amount } => {
                self.bus.log(
                    format!("{} recovers {amount} MP.", self.name(*target)),
                    LogTone::Heal,
                );
            }
            ResolutionEvent::ItemUsed { item, remaining, .. } => {
                let name = self
                    .catalogs
                    .items
                    .get(item)
                    .map_or(item.as_str(), |i| i.name.as_str());
                self.bus
                    .log(format!("{name} left: {remaining}."), LogTone::System);
            }
            ResolutionEvent::Cue { name, target } => {
                self.bus.publish(BattleEvent::Cue(name.clone()));
                self.effect(name, *target);
            }
        }
    }

    pub(crate) fn ticks(&self, actor: CombatantId, ticks: &[StatusTick]) {
        let name = self.name(actor);
        for tick in ticks {
            match tick {
                StatusTick::CoverEnded => {
                    self.bus.log(format!("{name} stops guarding."), LogTone::Status);
                }
                StatusTick::Regenerated { amount } => {
                    self.bus
                        .log(format!("{name} regenerates {amount} HP."), LogTone::Heal);
                    self.effect("regen", Some(actor));
                }
                StatusTick::Poisoned { amount, fatal } => {
                    self.bus
                        .log(format!("{name} takes {amount} poison damage."), LogTone::Damage);
                    self.effect("poison", Some(actor));
                    if *fatal {
                        self.bus
                            .announce(format!("{name} succumbs to poison!"), LogTone::Damage);
                    }
                }
                StatusTick::Expired(status) => self.expired(&name, *status),
            }
        }
    }

    pub(crate) fn expirations(&self, actor: CombatantId, expired: &[StatusId]) {
        let name = self.name(actor);
        for status in expired {
            self.expired(&name, *status);
        }
    }

    fn expired(&self, name: &str, status: StatusId) {
        self.bus.log(
            format!("{name}'s {} wore off.", status_label(status)),
            LogTone::Status,
        );
    }

    pub(crate) fn special(&self, event: &SpecialEvent) {
        match event {
            SpecialEvent::Split { name, spawned, .. } => {
                let spawn = spawned
                    .first()
                    .map(|id| self.name(*id))
                    .unwrap_or_default();
                self.bus.announce(
                    format!("{name} splits into {} {spawn}!", spawned.len()),
                    LogTone::System,
                );
                self.bus.publish(BattleEvent::Cue("split".into()));
            }
            SpecialEvent::Fusion { fused, .. } => {
                self.bus.announce(
                    format!("The band merges into {}!", self.name(*fused)),
                    LogTone::System,
                );
                self.bus.publish(BattleEvent::Cue("fusion".into()));
                self.effect("fusion", Some(*fused));
            }
            SpecialEvent::Rescue {
                trigger,
                benefactor,
            } => {
                self.bus.announce(
                    format!(
                        "{} unleashes overwhelming power! The party falls...",
                        self.name(*trigger)
                    ),
                    LogTone::Damage,
                );
                self.bus.publish(BattleEvent::Cue("wipe".into()));
                self.bus.announce("A warm light restores the party!", LogTone::Heal);
                if let Some(id) = benefactor {
                    self.bus
                        .announce(format!("{} joins the fight!", self.name(*id)), LogTone::System);
                    self.effect("join", Some(*id));
                }
                self.bus.publish(BattleEvent::Cue("rescue".into()));
            }
        }
    }
}

fn status_label(status: StatusId) -> &'static str {
    match status {
        StatusId::AtkUp => "attack up",
        StatusId::AtkDown => "attack down",
        StatusId::Regen => "regen",
        StatusId::Poison => "poison",
        StatusId::Cover => "guard",
    }
}

fn skip_text(who: Option<&str>, reason: SkipReason) -> String {
    let who = who.unwrap_or("The target");
    match reason {
        SkipReason::ActorDown => format!("{who} cannot act."),
        SkipReason::TargetDown => format!("{who} is already down."),
        SkipReason::TargetAlive => format!("{who} is still standing."),
        SkipReason::ProtectedTarget => format!("{who} cannot be targeted."),
        SkipReason::NoTargets => "There is nobody to target.".to_owned(),
        SkipReason::OutOfStock => "None left!".to_owned(),
        SkipReason::UnknownSkill | SkipReason::UnknownItem | SkipReason::UnknownCombatant => {
            "Nothing happens.".to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use battle_core::{CombatStats, Combatant, DamageKind, Role, Side};

    #[test]
    fn damage_publishes_a_line_and_an_effect() {
        let bus = EventBus::with_capacity(16);
        let mut log = bus.subscribe(Topic::Log);
        let mut visual = bus.subscribe(Topic::Visual);
        let mut roster = Roster::new(10_000.0);
        let hero = roster.insert(Combatant::new(
            "Ash",
            Side::Party,
            Role::Hero,
            100,
            0,
            CombatStats::default(),
        ));
        let slime = roster.insert(Combatant::new(
            "Slime",
            Side::Enemy,
            Role::Slime,
            50,
            0,
            CombatStats::default(),
        ));
        let catalogs = Catalogs::default();

        let mut resolution = Resolution::new();
        resolution.push(ResolutionEvent::Damaged {
            source: hero,
            target: slime,
            amount: 12,
            kind: DamageKind::Physical,
            critical: false,
            covered_for: None,
        });
        Narrator::new(&bus, &roster, &catalogs).resolution(&resolution);

        assert_eq!(
            log.try_recv().unwrap().into_inner(),
            BattleEvent::Log {
                text: "Slime takes 12 damage.".into(),
                tone: LogTone::Damage,
                emphasis: false,
            }
        );
        assert_eq!(
            visual.try_recv().unwrap().into_inner(),
            BattleEvent::Effect {
                name: "hit".into(),
                target: Some(slime),
            }
        );
    }
}
