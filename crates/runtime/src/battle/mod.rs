//! Battle orchestration.
//!
//! [`Battle`] owns one fight: the roster, the party inventory, the seeded
//! random source and the once-per-battle session flags. It drives the turn
//! loop as a phase machine (see [`BattlePhase`]), awaits the
//! [`ActionProvider`] for human-controlled party members, asks the core
//! decision policy for everyone else, and publishes everything it does on
//! the [`EventBus`]. Build one with [`Battle::builder`].

mod backup;
mod narrate;
mod phase;
mod special;
mod turn;

use std::sync::Arc;
use std::time::Duration;

use battle_content::Content;
use battle_core::{
    Archetype, Bestiary, Catalogs, CombatTables, Combatant, Encounter, EncounterId, Inventory,
    PcgRng, Roster,
};

pub use backup::{BattleBackup, PartyVitals, RetryChoice};
pub use phase::{BattleOutcome, BattlePhase};
pub use special::SessionFlags;

use crate::api::{
    ActionProvider, ActionSender, BattleHandle, ChannelActionProvider, InputGate, Result,
    RuntimeError,
};
use crate::events::{EventBus, TurnEvent};

/// Battle configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Pause after each presentation beat; zero disables pacing.
    pub step_delay: Duration,
    /// Turns per attempt before the battle ends as exhausted.
    pub max_turns: u32,
    /// Let the decision policy play human-controlled party members too.
    pub auto_party: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            step_delay: Duration::ZERO,
            max_turns: 1_000,
            auto_party: false,
        }
    }
}

/// One fight between the party and an encounter.
pub struct Battle {
    config: RuntimeConfig,
    catalogs: Catalogs,
    tables: CombatTables,
    roster: Roster,
    inventory: Inventory,
    rng: PcgRng,
    encounter: Encounter,
    backup: Option<BattleBackup>,
    flags: SessionFlags,

    provider: Option<Box<dyn ActionProvider>>,
    input: Option<ActionSender>,
    gate: Arc<InputGate>,
    bus: EventBus,

    phase: BattlePhase,
    started: bool,
    turn: u32,
    attempt: u32,
    outcome: Option<BattleOutcome>,
}

impl Battle {
    /// Create a new battle builder
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    /// Get a cloneable handle for submitting input and subscribing to events
    pub fn handle(&self) -> BattleHandle {
        BattleHandle::new(Arc::clone(&self.gate), self.input.clone(), self.bus.clone())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn encounter(&self) -> &EncounterId {
        &self.encounter.id
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Turns taken in the current attempt.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Starts at 1 and grows with every retry.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Snapshot used by [`retry`](Self::retry).
    pub fn backup(&self) -> Option<&BattleBackup> {
        self.backup.as_ref()
    }

    /// Swap in a snapshot from elsewhere, e.g. one restored from disk.
    pub fn replace_backup(&mut self, backup: BattleBackup) {
        self.backup = Some(backup);
    }

    /// Forbid retries for this battle.
    pub fn discard_backup(&mut self) {
        self.backup = None;
    }

    /// Runs turns until the battle ends.
    pub async fn run(&mut self) -> Result<BattleOutcome> {
        loop {
            if let Some(outcome) = self.step().await? {
                return Ok(outcome);
            }
        }
    }

    /// Runs the battle, offering up to `max_retries` restarts after defeats.
    ///
    /// The provider's [`choose_retry`](ActionProvider::choose_retry) decides
    /// each time; without a provider or a backup a defeat is final.
    pub async fn run_with_retries(&mut self, max_retries: u32) -> Result<BattleOutcome> {
        let mut retries = 0;
        loop {
            let outcome = self.run().await?;
            if outcome != BattleOutcome::Defeat || retries >= max_retries || self.backup.is_none()
            {
                return Ok(outcome);
            }

            self.gate.offer_retry();
            self.bus.turn(TurnEvent::RetryOffered {
                attempt: self.attempt,
            });
            let choice = match self.provider.as_mut() {
                Some(provider) => provider.choose_retry(self.attempt).await,
                None => Ok(RetryChoice::Abandon),
            };
            self.gate.clear_retry();
            let choice = choice?;
            tracing::info!(attempt = self.attempt, %choice, "retry choice");

            match choice {
                RetryChoice::Abandon => {
                    self.finish(BattleOutcome::Abandoned);
                    return Ok(BattleOutcome::Abandoned);
                }
                RetryChoice::Resume => self.retry(false)?,
                RetryChoice::ResumeHealed => self.retry(true)?,
            }
            retries += 1;
        }
    }

    /// Restarts the encounter from the backup.
    ///
    /// The party is truncated to its captured size and its HP/MP restored
    /// (or filled when `healed`), every status and session flag is cleared,
    /// enemies are spawned fresh and the inventory is rolled back. The
    /// random source keeps its position, so a retry plays out differently.
    pub fn retry(&mut self, healed: bool) -> Result<()> {
        let backup = self.backup.clone().ok_or(RuntimeError::NoBackup)?;
        let encounter = self
            .catalogs
            .bestiary
            .encounter(&backup.encounter)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownEncounter(backup.encounter.clone()))?;
        let enemies = spawn_enemies(&self.catalogs.bestiary, &encounter)?;

        backup.restore_party(&mut self.roster, healed);
        self.roster.clear_enemies();
        for enemy in enemies {
            self.roster.insert(enemy);
        }
        self.inventory = backup.inventory();
        self.encounter = encounter;
        self.flags = SessionFlags::default();

        self.phase = BattlePhase::AwaitingSpecialEvent;
        self.started = false;
        self.turn = 0;
        self.attempt += 1;
        self.outcome = None;

        tracing::info!(attempt = self.attempt, healed, "battle restarted from backup");
        Ok(())
    }
}

fn spawn_enemies(bestiary: &Bestiary, encounter: &Encounter) -> Result<Vec<Combatant>> {
    encounter
        .enemies
        .iter()
        .map(|id| {
            bestiary
                .template(id)
                .map(|template| template.spawn())
                .ok_or_else(|| RuntimeError::UnknownTemplate(id.clone()))
        })
        .collect()
}

/// Builder for [`Battle`]
pub struct BattleBuilder {
    config: RuntimeConfig,
    catalogs: Option<Catalogs>,
    tables: CombatTables,
    party: Vec<Combatant>,
    inventory: Inventory,
    encounter: Option<EncounterId>,
    seed: u64,
    provider: Option<Box<dyn ActionProvider>>,
    input: Option<ActionSender>,
}

impl BattleBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalogs: None,
            tables: CombatTables::default(),
            party: Vec::new(),
            inventory: Inventory::new(),
            encounter: None,
            seed: 0,
            provider: None,
            input: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required catalogs
    pub fn catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    pub fn tables(mut self, tables: CombatTables) -> Self {
        self.tables = tables;
        self
    }

    /// Party members in roster order.
    pub fn party(mut self, party: impl IntoIterator<Item = Combatant>) -> Self {
        self.party = party.into_iter().collect();
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Catalogs, tables, starting party and inventory from loaded content.
    pub fn content(self, content: &Content) -> Self {
        let party: Vec<_> = content.party_templates().map(|t| t.spawn()).collect();
        self.catalogs(content.catalogs.clone())
            .tables(content.tables.clone())
            .party(party)
            .inventory(content.party.inventory())
    }

    pub fn encounter(mut self, encounter: impl Into<EncounterId>) -> Self {
        self.encounter = Some(encounter.into());
        self
    }

    /// Seed for the battle's random source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the provider for human-controlled party members
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self.input = None;
        self
    }

    /// Take human input through [`BattleHandle::submit_action`].
    pub fn channel_input(mut self) -> Self {
        let (provider, input) = ChannelActionProvider::new();
        self.provider = Some(Box::new(provider));
        self.input = Some(input);
        self
    }

    /// Build the battle: spawn the encounter and capture the backup.
    pub fn build(self) -> Result<Battle> {
        let catalogs = self.catalogs.ok_or(RuntimeError::MissingCatalogs)?;
        if self.party.is_empty() {
            return Err(RuntimeError::EmptyParty);
        }
        let encounter_id = self.encounter.ok_or(RuntimeError::MissingEncounter)?;
        let encounter = catalogs
            .bestiary
            .encounter(&encounter_id)
            .cloned()
            .ok_or(RuntimeError::UnknownEncounter(encounter_id))?;

        let needs_provider = !self.config.auto_party
            && self
                .party
                .iter()
                .any(|member| member.archetype == Archetype::Player);
        if needs_provider && self.provider.is_none() {
            return Err(RuntimeError::ProviderNotSet);
        }

        let mut roster = Roster::new(self.tables.action_value_k);
        for member in self.party {
            roster.insert(member);
        }
        for enemy in spawn_enemies(&catalogs.bestiary, &encounter)? {
            roster.insert(enemy);
        }

        let backup = BattleBackup::capture(
            &roster,
            &self.inventory,
            encounter.id.clone(),
            encounter.music.clone(),
        );

        tracing::info!(
            encounter = %encounter.id,
            party = roster.party().len(),
            enemies = roster.enemies().len(),
            seed = self.seed,
            "battle ready"
        );

        Ok(Battle {
            bus: EventBus::with_capacity(self.config.event_buffer_size),
            config: self.config,
            catalogs,
            tables: self.tables,
            roster,
            inventory: self.inventory,
            rng: PcgRng::seeded(self.seed),
            encounter,
            backup: Some(backup),
            flags: SessionFlags::default(),
            provider: self.provider,
            input: self.input,
            gate: Arc::new(InputGate::default()),
            phase: BattlePhase::AwaitingSpecialEvent,
            started: false,
            turn: 0,
            attempt: 1,
            outcome: None,
        })
    }
}
