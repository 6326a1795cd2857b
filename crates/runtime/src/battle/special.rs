//! Scripted encounter events that rewrite the roster mid-battle.
//!
//! Triggers come from the [`EncounterRules`] on each enemy's template, so
//! every check is a pure function of the roster and the bestiary. Fusion and
//! rescue fire at most once per battle; the flags that enforce it live on
//! the battle and are reset on retry.

use battle_core::{Bestiary, Combatant, CombatantId, EncounterRules, FusionRule, Roster};

use crate::events::SpecialEvent;

/// Once-per-battle markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub fusion_done: bool,
    pub rescue_done: bool,
}

fn rules_of<'b>(combatant: &Combatant, bestiary: &'b Bestiary) -> Option<&'b EncounterRules> {
    let template = combatant.template.as_ref()?;
    bestiary.template(template).map(|t| &t.rules)
}

/// Runs every pending check in order: splits, fusion, rescue.
///
/// Combatants spawned here are not re-checked until the next call.
pub(crate) fn resolve_pending(
    roster: &mut Roster,
    bestiary: &Bestiary,
    flags: &mut SessionFlags,
) -> Vec<SpecialEvent> {
    let mut events = split(roster, bestiary);
    events.extend(fuse(roster, bestiary, flags));
    events.extend(rescue(roster, bestiary, flags));
    events
}

/// Replaces every alive splitter at or below its threshold with copies.
pub(crate) fn split(roster: &mut Roster, bestiary: &Bestiary) -> Vec<SpecialEvent> {
    let pending: Vec<_> = roster
        .enemies()
        .iter()
        .filter(|c| c.is_alive())
        .filter_map(|c| {
            let rule = rules_of(c, bestiary)?.split.as_ref()?;
            c.hp.at_or_below_percent(rule.threshold_percent)
                .then(|| (c.id, c.name.clone(), rule))
        })
        .collect();

    let mut events = Vec::new();
    for (source, name, rule) in pending {
        let Some(template) = bestiary.template(&rule.into) else {
            continue;
        };
        roster.remove(source);
        let spawned = (0..rule.copies)
            .map(|_| roster.insert(template.spawn()))
            .collect();
        events.push(SpecialEvent::Split {
            source,
            name,
            spawned,
        });
    }
    events
}

/// Merges the first fusion group with enough fallen members and a survivor.
pub(crate) fn fuse(
    roster: &mut Roster,
    bestiary: &Bestiary,
    flags: &mut SessionFlags,
) -> Option<SpecialEvent> {
    if flags.fusion_done {
        return None;
    }

    let mut groups: Vec<(&FusionRule, Vec<&Combatant>)> = Vec::new();
    for enemy in roster.enemies() {
        let Some(rule) = rules_of(enemy, bestiary).and_then(|r| r.fusion.as_ref()) else {
            continue;
        };
        match groups.iter_mut().find(|(known, _)| known.group == rule.group) {
            Some((_, members)) => members.push(enemy),
            None => groups.push((rule, vec![enemy])),
        }
    }

    let (rule, members) = groups.into_iter().find(|(rule, members)| {
        let fallen = members.iter().filter(|c| !c.is_alive()).count();
        let standing = members.len() - fallen;
        fallen >= rule.defeated as usize && standing >= 1
    })?;
    let template = bestiary.template(&rule.into)?;
    let removed: Vec<CombatantId> = members.iter().map(|c| c.id).collect();

    for id in &removed {
        roster.remove(*id);
    }
    let fused = roster.insert(template.spawn());
    flags.fusion_done = true;

    Some(SpecialEvent::Fusion {
        group: rule.group.clone(),
        removed,
        fused,
    })
}

/// Wipes the party and brings it back at full strength, with the
/// benefactor joining if it is not already fighting.
pub(crate) fn rescue(
    roster: &mut Roster,
    bestiary: &Bestiary,
    flags: &mut SessionFlags,
) -> Option<SpecialEvent> {
    if flags.rescue_done {
        return None;
    }

    let (trigger, rule) = roster
        .enemies()
        .iter()
        .filter(|c| c.is_alive())
        .find_map(|c| {
            let rule = rules_of(c, bestiary)?.rescue.as_ref()?;
            c.hp.at_or_below_percent(rule.threshold_percent)
                .then_some((c.id, rule))
        })?;

    let k = roster.action_value_k();
    for member in roster.party_mut() {
        member.apply_hp(-i64::from(member.hp.current));
    }
    for member in roster.party_mut() {
        member.revive(member.hp.maximum);
        member.mp.fill();
        member.reset_action_value(k);
    }

    let present = roster.party().iter().any(Combatant::is_benefactor);
    let benefactor = match bestiary.template(&rule.benefactor) {
        Some(template) if !present => Some(roster.insert(template.spawn())),
        _ => None,
    };
    flags.rescue_done = true;

    Some(SpecialEvent::Rescue {
        trigger,
        benefactor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        Archetype, CombatStats, CombatantTemplate, Encounter, RescueRule, Role, Side,
        SkillCatalog, SplitRule, Tier,
    };

    fn stats() -> CombatStats {
        CombatStats {
            atk: 10,
            spd: 100,
            ..CombatStats::default()
        }
    }

    fn bestiary() -> Bestiary {
        let group = |id: &str| {
            CombatantTemplate::new(id, id, Side::Enemy, Role::Goblin, 50, 0, stats()).with_rules(
                EncounterRules {
                    fusion: Some(FusionRule {
                        group: "band".into(),
                        defeated: 2,
                        into: "lord".into(),
                    }),
                    ..EncounterRules::default()
                },
            )
        };
        let templates = vec![
            CombatantTemplate::new("hero", "Ash", Side::Party, Role::Hero, 100, 20, stats()),
            CombatantTemplate::new("sage", "Sage", Side::Party, Role::Benefactor, 300, 0, stats())
                .with_archetype(Archetype::Benefactor),
            CombatantTemplate::new("king", "King", Side::Enemy, Role::Slime, 200, 0, stats())
                .with_tier(Tier::Boss)
                .with_rules(EncounterRules {
                    split: Some(SplitRule {
                        threshold_percent: 50,
                        into: "blob".into(),
                        copies: 3,
                    }),
                    ..EncounterRules::default()
                }),
            CombatantTemplate::new("blob", "Blob", Side::Enemy, Role::Slime, 40, 0, stats()),
            group("grunt"),
            group("shaman"),
            group("drummer"),
            CombatantTemplate::new("lord", "Lord", Side::Enemy, Role::Composite, 400, 0, stats())
                .with_tier(Tier::CompositeBoss),
            CombatantTemplate::new("shade", "Shade", Side::Enemy, Role::Shadow, 100, 0, stats())
                .with_rules(EncounterRules {
                    rescue: Some(RescueRule {
                        threshold_percent: 30,
                        benefactor: "sage".into(),
                    }),
                    ..EncounterRules::default()
                }),
        ];
        let encounters = vec![Encounter {
            id: "any".into(),
            enemies: vec!["king".into()],
            music: None,
        }];
        Bestiary::new(templates, encounters, &SkillCatalog::default()).unwrap()
    }

    fn spawn(roster: &mut Roster, bestiary: &Bestiary, id: &str) -> CombatantId {
        roster.insert(bestiary.template(&id.into()).unwrap().spawn())
    }

    #[test]
    fn split_replaces_the_boss_at_half_health() {
        let bestiary = bestiary();
        let mut roster = Roster::new(10_000.0);
        spawn(&mut roster, &bestiary, "hero");
        let king = spawn(&mut roster, &bestiary, "king");

        roster.get_mut(king).unwrap().apply_hp(-99);
        assert!(split(&mut roster, &bestiary).is_empty());

        roster.get_mut(king).unwrap().apply_hp(-1);
        let events = split(&mut roster, &bestiary);

        assert_eq!(events.len(), 1);
        assert!(!roster.contains(king));
        assert_eq!(roster.enemies().len(), 3);
        assert!(roster.enemies().iter().all(|c| c.name == "Blob" && c.hp.is_full()));
    }

    #[test]
    fn fusion_needs_a_survivor_and_fires_once() {
        let bestiary = bestiary();
        let mut roster = Roster::new(10_000.0);
        spawn(&mut roster, &bestiary, "hero");
        let grunt = spawn(&mut roster, &bestiary, "grunt");
        let shaman = spawn(&mut roster, &bestiary, "shaman");
        let drummer = spawn(&mut roster, &bestiary, "drummer");
        let mut flags = SessionFlags::default();

        roster.get_mut(grunt).unwrap().apply_hp(-50);
        assert!(fuse(&mut roster, &bestiary, &mut flags).is_none());

        roster.get_mut(shaman).unwrap().apply_hp(-50);
        let Some(SpecialEvent::Fusion { removed, fused, .. }) =
            fuse(&mut roster, &bestiary, &mut flags)
        else {
            panic!("fusion should fire");
        };

        assert_eq!(removed, vec![grunt, shaman, drummer]);
        assert_eq!(roster.enemies().len(), 1);
        assert_eq!(roster.get(fused).unwrap().tier, Tier::CompositeBoss);
        assert!(flags.fusion_done);

        let again = spawn(&mut roster, &bestiary, "grunt");
        roster.get_mut(again).unwrap().apply_hp(-50);
        assert!(fuse(&mut roster, &bestiary, &mut flags).is_none());
    }

    #[test]
    fn fusion_skips_a_fully_defeated_group() {
        let bestiary = bestiary();
        let mut roster = Roster::new(10_000.0);
        for id in ["grunt", "shaman"] {
            let enemy = spawn(&mut roster, &bestiary, id);
            roster.get_mut(enemy).unwrap().apply_hp(-50);
        }
        let mut flags = SessionFlags::default();

        assert!(fuse(&mut roster, &bestiary, &mut flags).is_none());
        assert!(!flags.fusion_done);
    }

    #[test]
    fn rescue_restores_the_party_and_adds_the_benefactor_once() {
        let bestiary = bestiary();
        let mut roster = Roster::new(10_000.0);
        let hero = spawn(&mut roster, &bestiary, "hero");
        let shade = spawn(&mut roster, &bestiary, "shade");
        let mut flags = SessionFlags::default();

        let ash = roster.get_mut(hero).unwrap();
        ash.apply_hp(-60);
        ash.apply_mp(-20);
        ash.add_status(battle_core::StatusId::Poison, 3);
        roster.get_mut(shade).unwrap().apply_hp(-70);

        let Some(SpecialEvent::Rescue {
            trigger,
            benefactor: Some(sage),
        }) = rescue(&mut roster, &bestiary, &mut flags)
        else {
            panic!("rescue should fire");
        };

        assert_eq!(trigger, shade);
        let ash = roster.get(hero).unwrap();
        assert!(ash.hp.is_full() && ash.mp.is_full());
        assert!(ash.debuffs.is_empty());
        assert!(roster.get(sage).unwrap().is_benefactor());
        assert!(rescue(&mut roster, &bestiary, &mut flags).is_none());
        assert_eq!(roster.party().len(), 2);
    }
}
