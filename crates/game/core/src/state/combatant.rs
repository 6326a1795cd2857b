//! The single concrete combatant record.
//!
//! Party members and enemies share one data layout; variant behavior is
//! carried as data ([`Role`], [`Tier`], [`Archetype`], skill lists) rather
//! than through per-variant types.

use crate::env::{SkillId, TemplateId};

use super::common::{CombatantId, ResourceMeter, Side};
use super::status::{StatusId, StatusMap};

/// Display role of a combatant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Role {
    // Party
    Hero,
    Caster,
    Support,
    /// Non-targetable auto-acting ally that joins through the rescue script.
    Benefactor,

    // Enemies
    Slime,
    Goblin,
    Shadow,
    Dragon,
    Composite,
}

/// Encounter tier of an enemy. Party members are `Basic`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Tier {
    #[default]
    Basic,
    Elite,
    Boss,
    CompositeBoss,
}

impl Tier {
    pub const fn is_boss(self) -> bool {
        matches!(self, Tier::Boss | Tier::CompositeBoss)
    }
}

/// Decision profile used when the combatant is not driven by a human.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Archetype {
    /// Human-controlled party member.
    Player,
    #[default]
    Basic,
    Boss,
    Healer,
    Support,
    Caster,
    King,
    Benefactor,
}

/// Mutable combat statistics. Rewards, relics and buffs adjust them in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub atk: u32,
    pub def: u32,
    pub matk: u32,
    pub mdef: u32,
    pub spd: u32,
    pub rec: u32,
}

/// A single fighter, on either side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub role: Role,
    pub tier: Tier,
    pub archetype: Archetype,
    /// Template this combatant was spawned from, if any.
    pub template: Option<TemplateId>,
    /// Opaque presentation reference (sprite sheet, voice set).
    pub sprite: Option<String>,

    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub stats: CombatStats,

    pub buffs: StatusMap,
    pub debuffs: StatusMap,
    /// Percent of max HP restored per regen tick; zero falls back to the tables.
    pub regen_value: u32,
    pub is_covering: bool,
    /// Holds the damage-reduction relic.
    pub damage_reduction: bool,

    /// Scheduling countdown; zero or below means ready to act.
    pub action_value: f64,
    pub skills: Vec<SkillId>,
}

impl Combatant {
    /// Creates a combatant with full HP/MP and no status.
    pub fn new(
        name: impl Into<String>,
        side: Side,
        role: Role,
        max_hp: u32,
        max_mp: u32,
        stats: CombatStats,
    ) -> Self {
        let archetype = match side {
            Side::Party => Archetype::Player,
            Side::Enemy => Archetype::Basic,
        };

        Self {
            id: CombatantId::default(),
            name: name.into(),
            side,
            role,
            tier: Tier::Basic,
            archetype,
            template: None,
            sprite: None,
            hp: ResourceMeter::full(max_hp),
            mp: ResourceMeter::full(max_mp),
            stats,
            buffs: StatusMap::new(),
            debuffs: StatusMap::new(),
            regen_value: 0,
            is_covering: false,
            damage_reduction: false,
            action_value: 0.0,
            skills: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    pub fn with_damage_reduction(mut self, enabled: bool) -> Self {
        self.damage_reduction = enabled;
        self
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    pub fn is_benefactor(&self) -> bool {
        self.role == Role::Benefactor
    }

    /// Whether other combatants may name this one as an action target.
    pub fn is_targetable(&self) -> bool {
        !self.is_benefactor()
    }

    pub fn knows(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }

    /// Applies an HP change, clamped to `0..=max`.
    ///
    /// Positive changes while dead are ignored; revival goes through
    /// [`revive`](Self::revive). Returns the change actually applied.
    pub fn apply_hp(&mut self, delta: i64) -> i64 {
        if delta > 0 && !self.is_alive() {
            return 0;
        }
        self.hp.apply(delta)
    }

    /// Applies an MP change, clamped to `0..=max`. No-op while dead.
    pub fn apply_mp(&mut self, delta: i64) -> i64 {
        if !self.is_alive() {
            return 0;
        }
        self.mp.apply(delta)
    }

    /// Sets HP to `amount` (clamped). A positive result clears every status.
    ///
    /// Returns true when the combatant is alive afterwards.
    pub fn revive(&mut self, amount: u32) -> bool {
        self.hp.set(amount);
        if self.is_alive() {
            self.clear_all_status();
            return true;
        }
        false
    }

    pub fn has_buff(&self, id: StatusId) -> bool {
        self.buffs.has(id)
    }

    pub fn has_debuff(&self, id: StatusId) -> bool {
        self.debuffs.has(id)
    }

    /// Applies an effect for `turns` turns, routing it to the right container.
    ///
    /// `Cover` toggles the covering flag instead of storing a counter.
    pub fn add_status(&mut self, id: StatusId, turns: u32) {
        if id.is_flag() {
            self.is_covering = true;
        } else if id.is_debuff() {
            self.debuffs.set(id, turns);
        } else {
            self.buffs.set(id, turns);
        }
    }

    /// Removes all buffs, debuffs and the covering flag.
    pub fn clear_all_status(&mut self) {
        self.buffs.clear();
        self.debuffs.clear();
        self.is_covering = false;
        self.regen_value = 0;
    }

    /// Restores HP and MP to exact values, bypassing the dead-heal guard.
    pub fn restore_vitals(&mut self, hp: u32, mp: u32) {
        self.hp.set(hp);
        self.mp.set(mp);
    }

    /// Pushes the combatant back in the queue proportionally to its speed.
    pub fn reset_action_value(&mut self, k: f64) {
        self.action_value = k / f64::from(self.stats.spd.max(1));
    }
}
