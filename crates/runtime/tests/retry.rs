mod common;

use battle_core::{Action, EncounterId, Inventory, ItemId, Target};
use battle_runtime::{
    BattleBackup, BattleEvent, BattleOutcome, RetryChoice, RuntimeConfig, RuntimeError,
    ScriptedActionProvider, SessionFlags, Topic, TurnEvent,
};

use common::{HERO, battle, catalogs, drain, hero, turn_events};

fn potion() -> ItemId {
    "potion".into()
}

#[tokio::test]
async fn retry_drops_the_benefactor_and_restores_captured_vitals() {
    let catalogs = catalogs();
    let mut battle = battle("ambush")
        .party(vec![hero(&catalogs, 40)])
        .provider(ScriptedActionProvider::default())
        .build()
        .unwrap();
    let first_enemies: Vec<_> = battle.roster().enemies().iter().map(|c| c.id).collect();

    assert_eq!(battle.run().await.unwrap(), BattleOutcome::Defeat);
    assert_eq!(battle.roster().party().len(), 2);

    battle.retry(false).unwrap();

    let party = battle.roster().party();
    assert_eq!(party.len(), 1);
    assert_eq!(party[0].id, HERO);
    assert_eq!(party[0].hp.current, 60);
    assert!(party[0].mp.is_full());
    assert!(party[0].buffs.is_empty() && party[0].debuffs.is_empty());

    let enemies = battle.roster().enemies();
    assert_eq!(enemies.len(), 2);
    assert!(enemies.iter().all(|c| c.hp.is_full()));
    assert!(enemies.iter().all(|c| !first_enemies.contains(&c.id)));

    assert_eq!(battle.flags(), SessionFlags::default());
    assert_eq!(battle.attempt(), 2);
    assert_eq!(battle.turn(), 0);
    assert_eq!(battle.outcome(), None);
}

#[tokio::test]
async fn healed_retry_fills_vitals_and_rolls_back_items() {
    let catalogs = catalogs();
    let drink = Action::item(HERO, potion(), Target::Single(HERO));
    let mut battle = battle("brute")
        .party(vec![hero(&catalogs, 40)])
        .inventory(Inventory::new().with(potion(), 2))
        .provider(ScriptedActionProvider::new([drink]))
        .build()
        .unwrap();

    assert_eq!(battle.run().await.unwrap(), BattleOutcome::Defeat);
    assert_eq!(battle.inventory().count(&potion()), 1);

    battle.retry(true).unwrap();

    assert_eq!(battle.inventory().count(&potion()), 2);
    let hero = &battle.roster().party()[0];
    assert!(hero.hp.is_full() && hero.mp.is_full());
}

#[tokio::test]
async fn provider_decides_between_retrying_and_abandoning() {
    let mut battle = battle("brute")
        .provider(ScriptedActionProvider::default().with_retries([RetryChoice::Resume]))
        .build()
        .unwrap();
    let mut turns = battle.handle().subscribe(Topic::Turn);

    assert_eq!(
        battle.run_with_retries(3).await.unwrap(),
        BattleOutcome::Abandoned
    );
    assert_eq!(battle.attempt(), 2);
    assert_eq!(battle.outcome(), Some(BattleOutcome::Abandoned));

    let events = turn_events(drain(&mut turns));
    let offered: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TurnEvent::RetryOffered { attempt } => Some(*attempt),
            _ => None,
        })
        .collect();
    assert_eq!(offered, vec![1, 2]);
    let started = events
        .iter()
        .filter(|e| matches!(e, TurnEvent::BattleStarted { .. }))
        .count();
    assert_eq!(started, 2);
}

#[tokio::test]
async fn retries_are_bounded() {
    let mut battle = battle("brute")
        .provider(ScriptedActionProvider::default().with_retries([RetryChoice::Resume; 4]))
        .build()
        .unwrap();

    assert_eq!(
        battle.run_with_retries(1).await.unwrap(),
        BattleOutcome::Defeat
    );
    assert_eq!(battle.attempt(), 2);
}

#[tokio::test]
async fn discarded_backup_makes_defeat_final() {
    let mut battle = battle("brute")
        .provider(ScriptedActionProvider::default().with_retries([RetryChoice::Resume]))
        .build()
        .unwrap();
    battle.discard_backup();

    assert_eq!(
        battle.run_with_retries(3).await.unwrap(),
        BattleOutcome::Defeat
    );
    assert!(matches!(battle.retry(false), Err(RuntimeError::NoBackup)));
}

#[tokio::test]
async fn backup_survives_a_trip_through_disk() {
    let battle = battle("ambush")
        .provider(ScriptedActionProvider::default())
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");

    std::fs::write(&path, battle.backup().unwrap().to_json().unwrap()).unwrap();
    let restored = BattleBackup::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(&restored, battle.backup().unwrap());
    assert_eq!(restored.encounter, EncounterId::from("ambush"));
    assert!(matches!(
        BattleBackup::from_json("{"),
        Err(RuntimeError::Backup(_))
    ));
}

#[tokio::test]
async fn retry_choices_only_answer_an_open_prompt() {
    let mut battle = battle("brute")
        .config(RuntimeConfig {
            auto_party: true,
            event_buffer_size: 1_024,
            ..RuntimeConfig::default()
        })
        .channel_input()
        .build()
        .unwrap();
    let handle = battle.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    assert!(!handle.retry_offered());
    assert!(matches!(
        handle.submit_retry(RetryChoice::Resume).await,
        Err(RuntimeError::NotAwaitingInput)
    ));

    let task = tokio::spawn(async move {
        let outcome = battle.run_with_retries(1).await;
        (battle, outcome)
    });

    loop {
        match turns.recv().await.unwrap().into_inner() {
            BattleEvent::Turn(TurnEvent::RetryOffered { attempt }) => {
                assert_eq!(attempt, 1);
                break;
            }
            _ => continue,
        }
    }
    assert!(handle.retry_offered());
    handle.submit_retry(RetryChoice::Abandon).await.unwrap();

    let (battle, outcome) = task.await.unwrap();
    assert_eq!(outcome.unwrap(), BattleOutcome::Abandoned);
    assert_eq!(battle.attempt(), 1);
    assert!(!handle.retry_offered());
}
