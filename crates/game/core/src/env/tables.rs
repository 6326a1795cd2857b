//! Balance parameters for the damage and heal resolver.
//!
//! Defaults reproduce the shipped tuning. Every field can be overridden from
//! a tables file; missing fields keep their default.

/// Physical damage parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PhysicalParams {
    /// Lower bound of the multiplicative variance.
    pub variance_min: f64,
    /// Width of the multiplicative variance window.
    pub variance_range: f64,
    pub crit_rate: f64,
    pub crit_multiplier: f64,
    /// Defense is divided by this before being subtracted.
    pub def_reduction_rate: u32,
    /// Fraction removed when the defender holds the damage-reduction relic.
    pub relic_reduction: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            variance_min: 0.9,
            variance_range: 0.2,
            crit_rate: 0.1,
            crit_multiplier: 1.5,
            def_reduction_rate: 2,
            relic_reduction: 0.2,
        }
    }
}

/// Magic damage parameters. Variance is additive and there is no crit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MagicParams {
    pub variance_min: f64,
    pub variance_range: f64,
    pub mdef_reduction_rate: u32,
}

impl Default for MagicParams {
    fn default() -> Self {
        Self {
            variance_min: 0.0,
            variance_range: 10.0,
            mdef_reduction_rate: 2,
        }
    }
}

/// Damage multipliers granted by `atk_up` / `atk_down`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ModifierParams {
    pub atk_up: f64,
    pub atk_down: f64,
}

impl Default for ModifierParams {
    fn default() -> Self {
        Self {
            atk_up: 1.25,
            atk_down: 0.7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HealParams {
    pub variance_min: f64,
    pub variance_range: f64,
    pub super_rate: f64,
    pub super_multiplier: f64,
}

impl Default for HealParams {
    fn default() -> Self {
        Self {
            variance_min: 0.95,
            variance_range: 0.1,
            super_rate: 0.1,
            super_multiplier: 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PoisonParams {
    /// Fraction of max HP lost per tick.
    pub percent: f64,
    /// Absolute ceiling per tick.
    pub cap: u32,
}

impl Default for PoisonParams {
    fn default() -> Self {
        Self {
            percent: 0.05,
            cap: 50,
        }
    }
}

/// Complete balance table set.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CombatTables {
    pub physical: PhysicalParams,
    pub magic: MagicParams,
    pub modifiers: ModifierParams,
    pub heal: HealParams,
    pub poison: PoisonParams,
    /// Damage multiplier applied to hits redirected onto a coverer.
    pub cover_multiplier: f64,
    /// Regen percent used when a combatant carries no explicit value.
    pub regen_percent: u32,
    /// Fraction of max HP restored by a paid resurrection.
    pub res_fraction: f64,
    /// Action value constant `K`.
    pub action_value_k: f64,
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            physical: PhysicalParams::default(),
            magic: MagicParams::default(),
            modifiers: ModifierParams::default(),
            heal: HealParams::default(),
            poison: PoisonParams::default(),
            cover_multiplier: 0.5,
            regen_percent: 10,
            res_fraction: 0.5,
            action_value_k: 10_000.0,
        }
    }
}

impl CombatTables {
    /// Default tables with variance, criticals and super heals disabled.
    ///
    /// Every formula becomes a pure function of the stats, which makes
    /// expected values easy to compute by hand.
    pub fn flat() -> Self {
        let mut tables = Self::default();
        tables.physical.variance_min = 1.0;
        tables.physical.variance_range = 0.0;
        tables.physical.crit_rate = 0.0;
        tables.magic.variance_min = 0.0;
        tables.magic.variance_range = 0.0;
        tables.heal.variance_min = 1.0;
        tables.heal.variance_range = 0.0;
        tables.heal.super_rate = 0.0;
        tables
    }
}
