//! Skill catalog.

use std::collections::BTreeMap;

use crate::state::StatusId;

use super::error::CatalogError;

string_id!(
    /// Key of a [`SkillDef`] in the [`SkillCatalog`].
    SkillId
);

/// Which combatants a skill reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Scope {
    Single,
    All,
    /// Only the user (`self` in data files).
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    Actor,
}

/// What a skill or item does once it lands.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectKind {
    Physical,
    Magic,
    Heal,
    Buff,
    Regen,
    MpRecovery,
    Res,
}

impl EffectKind {
    /// Damage-dealing effects.
    pub const fn is_damage(self) -> bool {
        matches!(self, EffectKind::Physical | EffectKind::Magic)
    }
}

/// Status applied by a skill, with its duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub status: StatusId,
    pub turns: u32,
}

impl StatusApplication {
    pub const fn new(status: StatusId, turns: u32) -> Self {
        Self { status, turns }
    }
}

/// Static skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    pub cost: u32,
    /// Damage/heal multiplier; regen percent ÷ 100; flat MP for recovery.
    pub power: f64,
    pub scope: Scope,
    pub effect: EffectKind,
    /// Status granted (buff/regen) or inflicted (damage) by the skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusApplication>,
    /// Audio cue name; the runtime picks one from the effect when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cue: Option<String>,
}

impl SkillDef {
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        cost: u32,
        power: f64,
        scope: Scope,
        effect: EffectKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            power,
            scope,
            effect,
            status: None,
            cue: None,
        }
    }

    pub fn with_status(mut self, status: StatusId, turns: u32) -> Self {
        self.status = Some(StatusApplication::new(status, turns));
        self
    }

    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = Some(cue.into());
        self
    }

    /// Whether the skill is aimed at the opposing side.
    pub fn is_offensive(&self) -> bool {
        match self.effect {
            EffectKind::Physical | EffectKind::Magic => true,
            EffectKind::Buff => self.status.is_some_and(|s| s.status.is_debuff()),
            _ => false,
        }
    }

    /// Buff skill whose status is `status`.
    pub fn grants(&self, status: StatusId) -> bool {
        self.effect == EffectKind::Buff && self.status.is_some_and(|s| s.status == status)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !self.power.is_finite() || self.power < 0.0 {
            return Err(CatalogError::InvalidPower {
                id: self.id.to_string(),
            });
        }

        match (self.effect, self.status) {
            (EffectKind::Buff | EffectKind::Regen, None) => Err(CatalogError::MissingStatus {
                id: self.id.to_string(),
                effect: self.effect.into(),
            }),
            (EffectKind::Regen, Some(app)) if app.status != StatusId::Regen => {
                Err(CatalogError::MismatchedStatus {
                    id: self.id.to_string(),
                    status: app.status.into(),
                })
            }
            (EffectKind::Buff, Some(app)) if app.status == StatusId::Regen => {
                Err(CatalogError::MismatchedStatus {
                    id: self.id.to_string(),
                    status: app.status.into(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Read-only skill table keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillId, SkillDef>,
}

impl SkillCatalog {
    /// Builds a catalog, rejecting duplicate ids and malformed entries.
    pub fn new(defs: impl IntoIterator<Item = SkillDef>) -> Result<Self, CatalogError> {
        let mut skills = BTreeMap::new();
        for def in defs {
            def.validate()?;
            if skills.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "skill",
                    id: def.id.to_string(),
                });
            }
            skills.insert(def.id.clone(), def);
        }
        Ok(Self { skills })
    }

    pub fn get(&self, id: &SkillId) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.skills.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDef> + '_ {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let fire = SkillDef::new("fire", "Fire", 5, 1.5, Scope::Single, EffectKind::Magic);
        let err = SkillCatalog::new([fire.clone(), fire]).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_DUPLICATE_ID");
    }

    #[test]
    fn buff_without_status_is_malformed() {
        let rally = SkillDef::new("rally", "Rally", 8, 0.0, Scope::All, EffectKind::Buff);
        assert!(matches!(
            SkillCatalog::new([rally]),
            Err(CatalogError::MissingStatus { .. })
        ));
    }

    #[test]
    fn regen_must_grant_regen() {
        let bad = SkillDef::new("bloom", "Bloom", 8, 0.1, Scope::Single, EffectKind::Regen)
            .with_status(StatusId::AtkUp, 3);
        assert!(matches!(
            SkillCatalog::new([bad]),
            Err(CatalogError::MismatchedStatus { .. })
        ));
    }

    #[test]
    fn negative_power_is_malformed() {
        let bad = SkillDef::new("void", "Void", 0, -1.0, Scope::Single, EffectKind::Magic);
        assert!(matches!(
            SkillCatalog::new([bad]),
            Err(CatalogError::InvalidPower { .. })
        ));
    }

    #[test]
    fn debuff_buffs_count_as_offensive() {
        let curse = SkillDef::new("curse", "Curse", 6, 0.0, Scope::All, EffectKind::Buff)
            .with_status(StatusId::AtkDown, 3);
        let rally = SkillDef::new("rally", "Rally", 6, 0.0, Scope::All, EffectKind::Buff)
            .with_status(StatusId::AtkUp, 3);

        assert!(curse.is_offensive());
        assert!(!rally.is_offensive());
        assert!(rally.grants(StatusId::AtkUp));
    }

    #[test]
    fn scope_self_uses_data_name() {
        assert_eq!(Scope::Actor.as_ref(), "self");
    }
}
