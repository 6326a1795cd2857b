//! Hand-built catalogs with round numbers.
//!
//! Used with `CombatTables::flat()`, every hit is `atk - def / 2` and the
//! turn order follows directly from `10_000 / spd`:
//! the hero acts at 50, the brute at 83, everyone else much later.
#![allow(dead_code)]

use battle_core::{
    Archetype, Bestiary, Catalogs, CombatStats, CombatTables, Combatant, CombatantId,
    CombatantTemplate, EffectKind, Encounter, EncounterRules, FusionRule, ItemCatalog, ItemDef,
    RescueRule, Role, Side, SkillCatalog, SplitRule, Tier,
};
use battle_runtime::{Battle, BattleBuilder, BattleEvent, Event, RuntimeConfig, TurnEvent};
use tokio::sync::broadcast;

/// Party members are inserted first, so the hero is always id 1.
pub const HERO: CombatantId = CombatantId(1);

fn stats(atk: u32, spd: u32) -> CombatStats {
    CombatStats {
        atk,
        spd,
        ..CombatStats::default()
    }
}

fn fusing(id: &str) -> CombatantTemplate {
    CombatantTemplate::new(id, id, Side::Enemy, Role::Goblin, 50, 0, stats(1, 10)).with_rules(
        EncounterRules {
            fusion: Some(FusionRule {
                group: "band".into(),
                defeated: 2,
                into: "lord".into(),
            }),
            ..EncounterRules::default()
        },
    )
}

fn encounter(id: &str, enemies: &[&str]) -> Encounter {
    Encounter {
        id: id.into(),
        enemies: enemies.iter().map(|e| (*e).into()).collect(),
        music: None,
    }
}

pub fn catalogs() -> Catalogs {
    let skills = SkillCatalog::default();
    let items =
        ItemCatalog::new([ItemDef::new("potion", "Potion", EffectKind::Heal, 30)]).unwrap();

    let templates = vec![
        CombatantTemplate::new("hero", "Ash", Side::Party, Role::Hero, 100, 20, stats(75, 200)),
        CombatantTemplate::new("sage", "Sage", Side::Party, Role::Benefactor, 300, 0, stats(10, 1))
            .with_archetype(Archetype::Benefactor),
        CombatantTemplate::new("dummy", "Dummy", Side::Enemy, Role::Slime, 50, 0, stats(1, 10)),
        CombatantTemplate::new("king", "King", Side::Enemy, Role::Slime, 140, 0, stats(1, 10))
            .with_tier(Tier::Boss)
            .with_rules(EncounterRules {
                split: Some(SplitRule {
                    threshold_percent: 50,
                    into: "blob".into(),
                    copies: 3,
                }),
                ..EncounterRules::default()
            }),
        CombatantTemplate::new("blob", "Blob", Side::Enemy, Role::Slime, 40, 0, stats(1, 10)),
        fusing("grunt"),
        fusing("shaman"),
        fusing("drummer"),
        CombatantTemplate::new("lord", "Lord", Side::Enemy, Role::Composite, 400, 0, stats(1, 10))
            .with_tier(Tier::CompositeBoss),
        CombatantTemplate::new("shade", "Shade", Side::Enemy, Role::Shadow, 100, 0, stats(0, 1))
            .with_rules(EncounterRules {
                rescue: Some(RescueRule {
                    threshold_percent: 30,
                    benefactor: "sage".into(),
                }),
                ..EncounterRules::default()
            }),
        CombatantTemplate::new(
            "brute",
            "Brute",
            Side::Enemy,
            Role::Dragon,
            10_000,
            0,
            stats(10_000, 120),
        ),
    ];
    let encounters = vec![
        encounter("dummy", &["dummy"]),
        encounter("split", &["king"]),
        encounter("band", &["grunt", "shaman", "drummer"]),
        encounter("ambush", &["shade", "brute"]),
        encounter("brute", &["brute"]),
    ];
    let bestiary = Bestiary::new(templates, encounters, &skills).unwrap();
    Catalogs::new(skills, items, bestiary)
}

pub fn spawn(catalogs: &Catalogs, template: &str) -> Combatant {
    catalogs.bestiary.template(&template.into()).unwrap().spawn()
}

/// The hero, optionally starting below full health.
pub fn hero(catalogs: &Catalogs, damage: i64) -> Combatant {
    let mut hero = spawn(catalogs, "hero");
    hero.apply_hp(-damage);
    hero
}

/// Builder preloaded with the catalogs, flat tables and a single hero.
pub fn battle(encounter: &str) -> BattleBuilder {
    let catalogs = catalogs();
    let party = vec![hero(&catalogs, 0)];
    Battle::builder()
        .config(RuntimeConfig {
            event_buffer_size: 1_024,
            ..RuntimeConfig::default()
        })
        .tables(CombatTables::flat())
        .party(party)
        .catalogs(catalogs)
        .encounter(encounter)
}

/// Everything published so far on a receiver.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event.into_inner());
    }
    events
}

pub fn turn_events(events: Vec<BattleEvent>) -> Vec<TurnEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            BattleEvent::Turn(turn) => Some(turn),
            _ => None,
        })
        .collect()
}
