use serde::{Deserialize, Serialize};

/// Where the battle loop currently is.
///
/// One turn walks `AwaitingSpecialEvent → TurnStart → StatusStart →
/// ActionSelect → ActionResolve → StatusEnd → VictoryCheck` and then either
/// loops or lands in `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    AwaitingSpecialEvent,
    TurnStart,
    StatusStart,
    ActionSelect,
    ActionResolve,
    StatusEnd,
    VictoryCheck,
    Ended,
}

/// How a battle finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The player declined to retry after a defeat.
    Abandoned,
    /// The turn limit ran out, or nobody was left to act.
    Exhausted,
}
