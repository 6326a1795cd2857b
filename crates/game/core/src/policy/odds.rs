//! Probability table for the decision rules.
//!
//! Every value is the chance of a single independent draw succeeding. The
//! boss weighted pick uses cumulative bounds on one draw.

pub const BOSS_SELF_BUFF: f64 = 0.3;
pub const BOSS_ALL_TARGET: f64 = 0.3;
/// Upper bound of the heavy single-target band (`0.3..0.6`).
pub const BOSS_HEAVY: f64 = 0.6;

/// Allies strictly below this share of max HP count as wounded.
pub const WOUNDED_PERCENT: u64 = 50;
pub const HEALER_TOP_UP: f64 = 0.5;

pub const SUPPORT_BUFF: f64 = 0.4;

pub const CASTER_ALL_TARGET: f64 = 0.3;
pub const CASTER_SINGLE_TARGET: f64 = 0.4;

pub const KING_SPECIAL: f64 = 0.35;
