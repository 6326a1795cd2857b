use std::fmt;

/// Unique identifier for a combatant within one battle.
///
/// Identifiers are allocated by the [`Roster`](super::Roster) and never
/// reused, so references stay valid across splits and fusions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which team a combatant fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Side {
    Party,
    Enemy,
}

impl Side {
    /// Returns the side this one fights against.
    pub const fn opposing(self) -> Self {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// Current and maximum value of a depletable pool (HP or MP).
///
/// `current` is kept within `0..=maximum` by every mutating method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Adds `delta` (possibly negative) and clamps to `0..=maximum`.
    ///
    /// Returns the change that was actually applied.
    pub fn apply(&mut self, delta: i64) -> i64 {
        let before = self.current;
        let next = (i64::from(self.current) + delta).clamp(0, i64::from(self.maximum));
        self.current = next as u32;
        i64::from(self.current) - i64::from(before)
    }

    /// Sets the current value, clamped to the maximum.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    pub fn fill(&mut self) {
        self.current = self.maximum;
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Fraction of the pool that is filled, `0.0` for an empty maximum.
    pub fn ratio(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.maximum)
    }

    /// Returns true when `current` is at or below `percent` of the maximum.
    pub fn at_or_below_percent(&self, percent: u32) -> bool {
        u64::from(self.current) * 100 <= u64::from(self.maximum) * u64::from(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_clamps_both_ends() {
        let mut meter = ResourceMeter::full(50);
        assert_eq!(meter.apply(-80), -50);
        assert_eq!(meter.current, 0);
        assert_eq!(meter.apply(500), 50);
        assert_eq!(meter.current, 50);
    }

    #[test]
    fn percent_threshold_is_inclusive() {
        let meter = ResourceMeter::new(50, 100);
        assert!(meter.at_or_below_percent(50));
        assert!(!meter.at_or_below_percent(49));
    }

    #[test]
    fn side_names_round_trip_through_strum() {
        assert_eq!(Side::Party.to_string(), "party");
        assert_eq!("enemy".parse::<Side>().unwrap(), Side::Enemy);
        assert_eq!(Side::Enemy.opposing(), Side::Party);
    }
}
