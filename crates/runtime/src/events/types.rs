//! Event types for different topics.

use battle_core::{Action, CombatantId, EncounterId, Resolution};
use serde::{Deserialize, Serialize};

use crate::battle::{BattleOutcome, BattlePhase};

/// How the presentation layer should color a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LogTone {
    Normal,
    Damage,
    Heal,
    Status,
    System,
}

/// Everything the battle publishes, one variant per sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Narration line.
    Log {
        text: String,
        tone: LogTone,
        emphasis: bool,
    },
    /// Named audio cue.
    Cue(String),
    /// Named visual effect, anchored to a combatant when there is one.
    Effect {
        name: String,
        target: Option<CombatantId>,
    },
    Turn(TurnEvent),
}

/// Roster changes made by scripted encounter events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialEvent {
    Split {
        source: CombatantId,
        /// Name of the removed source, which is no longer in the roster.
        name: String,
        spawned: Vec<CombatantId>,
    },
    Fusion {
        group: String,
        removed: Vec<CombatantId>,
        fused: CombatantId,
    },
    Rescue {
        trigger: CombatantId,
        /// Set when the benefactor joined; `None` when it was already present.
        benefactor: Option<CombatantId>,
    },
}

/// Battle lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    BattleStarted {
        encounter: EncounterId,
        music: Option<String>,
        attempt: u32,
    },
    PhaseChanged {
        phase: BattlePhase,
        actor: Option<CombatantId>,
    },
    TurnStarted {
        actor: CombatantId,
        turn: u32,
    },
    /// A human-controlled actor is waiting on the action provider.
    AwaitingInput {
        actor: CombatantId,
    },
    ActionResolved {
        action: Action,
        resolution: Resolution,
    },
    Special(SpecialEvent),
    /// The party fell and the provider is being asked whether to retry.
    RetryOffered {
        attempt: u32,
    },
    BattleEnded {
        outcome: BattleOutcome,
        turns: u32,
    },
}
