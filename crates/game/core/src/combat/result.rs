//! Resolver output types.

/// Damage source, used for logging and cover eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DamageKind {
    Physical,
    Magic,
    Poison,
}

/// Outcome of a damage calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Final amount, always at least 1.
    pub amount: u32,
    pub critical: bool,
}

/// Outcome of a heal calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealRoll {
    pub amount: u32,
    /// Super heal landed.
    pub critical: bool,
}
