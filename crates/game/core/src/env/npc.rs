//! Combatant templates and encounter definitions.
//!
//! A [`CombatantTemplate`] describes a fighter in a data-driven way: stat
//! block, role, tier, decision archetype, skill list and the scripted
//! encounter rules it carries. Templates are spawned into live
//! [`Combatant`]s at battle setup and by the special events (split, fusion,
//! rescue). The [`Bestiary`] indexes templates and encounters by id and
//! checks every cross reference once, when it is built.

use std::collections::BTreeMap;

use crate::state::{Archetype, CombatStats, Combatant, Role, Side, Tier};

use super::error::CatalogError;
use super::skills::{SkillCatalog, SkillId};

string_id!(
    /// Key of a [`CombatantTemplate`].
    TemplateId
);

string_id!(
    /// Key of an [`Encounter`].
    EncounterId
);

// ============================================================================
// Encounter Rules
// ============================================================================

/// Replace the holder with weaker copies once its HP drops to the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitRule {
    #[cfg_attr(feature = "serde", serde(default = "half"))]
    pub threshold_percent: u32,
    pub into: TemplateId,
    pub copies: u32,
}

/// Merge a fusion group into one composite boss.
///
/// Fires once per battle when at least `defeated` members of `group` are dead
/// while at least one member is still standing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FusionRule {
    pub group: String,
    pub defeated: u32,
    pub into: TemplateId,
}

/// Scripted wipe-and-rescue once the holder's HP drops to the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RescueRule {
    pub threshold_percent: u32,
    /// Template of the benefactor who joins the party.
    pub benefactor: TemplateId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EncounterRules {
    pub split: Option<SplitRule>,
    pub fusion: Option<FusionRule>,
    pub rescue: Option<RescueRule>,
}

impl EncounterRules {
    pub fn is_empty(&self) -> bool {
        self.split.is_none() && self.fusion.is_none() && self.rescue.is_none()
    }
}

#[cfg(feature = "serde")]
fn half() -> u32 {
    50
}

// ============================================================================
// Templates
// ============================================================================

/// Spawnable combatant definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub id: TemplateId,
    pub name: String,
    pub side: Side,
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: Tier,
    /// Decision profile; falls back to the side's default when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub archetype: Option<Archetype>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite: Option<String>,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_mp: u32,
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_reduction: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: EncounterRules,
}

impl CombatantTemplate {
    pub fn new(
        id: impl Into<TemplateId>,
        name: impl Into<String>,
        side: Side,
        role: Role,
        max_hp: u32,
        max_mp: u32,
        stats: CombatStats,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            side,
            role,
            tier: Tier::Basic,
            archetype: None,
            sprite: None,
            max_hp,
            max_mp,
            stats,
            skills: Vec::new(),
            damage_reduction: false,
            rules: EncounterRules::default(),
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkillId>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rules(mut self, rules: EncounterRules) -> Self {
        self.rules = rules;
        self
    }

    /// Builds a live combatant at full HP/MP.
    ///
    /// The id is left at its default; the roster assigns one on insert.
    pub fn spawn(&self) -> Combatant {
        let mut combatant = Combatant::new(
            self.name.clone(),
            self.side,
            self.role,
            self.max_hp,
            self.max_mp,
            self.stats,
        )
        .with_tier(self.tier)
        .with_skills(self.skills.iter().cloned())
        .with_damage_reduction(self.damage_reduction)
        .with_template(self.id.clone());

        if let Some(archetype) = self.archetype {
            combatant.archetype = archetype;
        }
        combatant.sprite = self.sprite.clone();
        combatant
    }

    fn referenced_templates(&self) -> impl Iterator<Item = &TemplateId> + '_ {
        let rules = &self.rules;
        rules
            .split
            .as_ref()
            .map(|r| &r.into)
            .into_iter()
            .chain(rules.fusion.as_ref().map(|r| &r.into))
            .chain(rules.rescue.as_ref().map(|r| &r.benefactor))
    }
}

/// Enemy line-up for one fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub id: EncounterId,
    pub enemies: Vec<TemplateId>,
    /// Music cue played while the encounter runs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub music: Option<String>,
}

// ============================================================================
// Bestiary
// ============================================================================

/// Read-only index of templates and encounters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bestiary {
    templates: BTreeMap<TemplateId, CombatantTemplate>,
    encounters: BTreeMap<EncounterId, Encounter>,
}

impl Bestiary {
    /// Builds the index and validates every reference against `skills` and
    /// the template set itself.
    pub fn new(
        templates: impl IntoIterator<Item = CombatantTemplate>,
        encounters: impl IntoIterator<Item = Encounter>,
        skills: &SkillCatalog,
    ) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for template in templates {
            if template.max_hp == 0 {
                return Err(CatalogError::ZeroHp {
                    id: template.id.to_string(),
                });
            }
            if by_id.contains_key(&template.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "template",
                    id: template.id.to_string(),
                });
            }
            by_id.insert(template.id.clone(), template);
        }

        for template in by_id.values() {
            if let Some(skill) = template.skills.iter().find(|s| !skills.contains(s)) {
                return Err(CatalogError::UnknownSkill {
                    owner: format!("template '{}'", template.id),
                    skill: skill.to_string(),
                });
            }
            if let Some(missing) = template
                .referenced_templates()
                .find(|id| !by_id.contains_key(*id))
            {
                return Err(CatalogError::UnknownTemplate {
                    owner: format!("template '{}'", template.id),
                    template: missing.to_string(),
                });
            }
            check_rules(template, &by_id)?;
        }

        let mut by_encounter = BTreeMap::new();
        for encounter in encounters {
            if encounter.enemies.is_empty() {
                return Err(CatalogError::EmptyEncounter {
                    id: encounter.id.to_string(),
                });
            }
            if let Some(missing) = encounter.enemies.iter().find(|id| !by_id.contains_key(*id)) {
                return Err(CatalogError::UnknownTemplate {
                    owner: format!("encounter '{}'", encounter.id),
                    template: missing.to_string(),
                });
            }
            if by_encounter.contains_key(&encounter.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "encounter",
                    id: encounter.id.to_string(),
                });
            }
            by_encounter.insert(encounter.id.clone(), encounter);
        }

        Ok(Self {
            templates: by_id,
            encounters: by_encounter,
        })
    }

    pub fn template(&self, id: &TemplateId) -> Option<&CombatantTemplate> {
        self.templates.get(id)
    }

    pub fn encounter(&self, id: &EncounterId) -> Option<&Encounter> {
        self.encounters.get(id)
    }

    pub fn templates(&self) -> impl Iterator<Item = &CombatantTemplate> + '_ {
        self.templates.values()
    }

    pub fn encounters(&self) -> impl Iterator<Item = &Encounter> + '_ {
        self.encounters.values()
    }
}

/// Rule values must keep every special event bounded and the rescued
/// benefactor under policy control. Referenced templates already exist.
fn check_rules(
    template: &CombatantTemplate,
    templates: &BTreeMap<TemplateId, CombatantTemplate>,
) -> Result<(), CatalogError> {
    let invalid = |rule, reason| CatalogError::InvalidRule {
        id: template.id.to_string(),
        rule,
        reason,
    };
    let rules = &template.rules;

    if let Some(split) = &rules.split {
        if !(1..=100).contains(&split.threshold_percent) {
            return Err(invalid("split", "threshold must be within 1..=100 percent"));
        }
        if split.copies == 0 {
            return Err(invalid("split", "at least one copy is required"));
        }
        if templates.get(&split.into).is_some_and(|t| t.rules.split.is_some()) {
            return Err(invalid("split", "copies must not split again"));
        }
    }
    if rules.fusion.as_ref().is_some_and(|f| f.defeated == 0) {
        return Err(invalid("fusion", "at least one defeated member is required"));
    }
    if let Some(rescue) = &rules.rescue {
        if !(1..=100).contains(&rescue.threshold_percent) {
            return Err(invalid("rescue", "threshold must be within 1..=100 percent"));
        }
        let benefactor = templates.get(&rescue.benefactor).is_some_and(|t| {
            t.side == Side::Party
                && t.role == Role::Benefactor
                && t.archetype == Some(Archetype::Benefactor)
        });
        if !benefactor {
            return Err(CatalogError::InvalidBenefactor {
                owner: format!("template '{}'", template.id),
                template: rescue.benefactor.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EffectKind, Scope, SkillDef};

    fn stats() -> CombatStats {
        CombatStats {
            atk: 10,
            def: 5,
            matk: 0,
            mdef: 0,
            spd: 80,
            rec: 0,
        }
    }

    fn skills() -> SkillCatalog {
        SkillCatalog::new([SkillDef::new(
            "slam",
            "Slam",
            0,
            1.5,
            Scope::Single,
            EffectKind::Physical,
        )])
        .unwrap()
    }

    fn enemy(id: &str, role: Role, hp: u32) -> CombatantTemplate {
        CombatantTemplate::new(id, id, Side::Enemy, role, hp, 0, stats())
    }

    fn splitting(threshold_percent: u32, copies: u32) -> CombatantTemplate {
        enemy("king", Role::Slime, 300).with_rules(EncounterRules {
            split: Some(SplitRule {
                threshold_percent,
                into: "slime".into(),
                copies,
            }),
            ..EncounterRules::default()
        })
    }

    fn rescuing(threshold_percent: u32) -> CombatantTemplate {
        enemy("shade", Role::Shadow, 100).with_rules(EncounterRules {
            rescue: Some(RescueRule {
                threshold_percent,
                benefactor: "sage".into(),
            }),
            ..EncounterRules::default()
        })
    }

    fn sage() -> CombatantTemplate {
        CombatantTemplate::new("sage", "Sage", Side::Party, Role::Benefactor, 300, 0, stats())
            .with_archetype(Archetype::Benefactor)
    }

    #[test]
    fn spawn_copies_the_stat_block() {
        let template = enemy("slime", Role::Slime, 40).with_skills(["slam"]);
        let slime = template.spawn();

        assert_eq!(slime.hp.current, 40);
        assert_eq!(slime.archetype, Archetype::Basic);
        assert_eq!(slime.template, Some(TemplateId::from("slime")));
        assert!(slime.knows(&"slam".into()));
    }

    #[test]
    fn party_templates_default_to_player_control() {
        let hero =
            CombatantTemplate::new("hero", "Hero", Side::Party, Role::Hero, 100, 20, stats());
        assert_eq!(hero.spawn().archetype, Archetype::Player);
    }

    #[test]
    fn unknown_skill_is_fatal() {
        let template = enemy("imp", Role::Goblin, 30).with_skills(["fireball"]);
        let err = Bestiary::new([template], [], &skills()).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_UNKNOWN_SKILL");
    }

    #[test]
    fn split_target_must_exist() {
        let err = Bestiary::new([splitting(50, 2)], [], &skills()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTemplate { .. }));
    }

    #[test]
    fn split_values_are_bounded() {
        let slime = || enemy("slime", Role::Slime, 40);
        assert!(Bestiary::new([splitting(50, 2), slime()], [], &skills()).is_ok());
        assert!(Bestiary::new([splitting(100, 1), slime()], [], &skills()).is_ok());

        for (threshold, copies) in [(0, 2), (101, 2), (50, 0)] {
            let err = Bestiary::new([splitting(threshold, copies), slime()], [], &skills())
                .unwrap_err();
            assert!(matches!(err, CatalogError::InvalidRule { rule: "split", .. }));
            assert_eq!(err.error_code(), "CATALOG_INVALID_RULE");
        }
    }

    #[test]
    fn split_copies_cannot_split_again() {
        let slime = enemy("slime", Role::Slime, 40).with_rules(EncounterRules {
            split: Some(SplitRule {
                threshold_percent: 50,
                into: "slime".into(),
                copies: 2,
            }),
            ..EncounterRules::default()
        });
        let err = Bestiary::new([splitting(50, 2), slime], [], &skills()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRule { rule: "split", .. }));
    }

    #[test]
    fn fusion_needs_a_defeated_member() {
        let grunt = enemy("grunt", Role::Goblin, 50).with_rules(EncounterRules {
            fusion: Some(FusionRule {
                group: "band".into(),
                defeated: 0,
                into: "lord".into(),
            }),
            ..EncounterRules::default()
        });
        let lord = enemy("lord", Role::Composite, 400);
        let err = Bestiary::new([grunt, lord], [], &skills()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRule { rule: "fusion", .. }));
    }

    #[test]
    fn rescue_threshold_is_bounded() {
        assert!(Bestiary::new([rescuing(30), sage()], [], &skills()).is_ok());
        for threshold in [0, 150] {
            let err = Bestiary::new([rescuing(threshold), sage()], [], &skills()).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidRule { rule: "rescue", .. }));
        }
    }

    #[test]
    fn rescue_benefactor_must_be_a_policy_driven_ally() {
        let uncontrolled =
            CombatantTemplate::new("sage", "Sage", Side::Party, Role::Benefactor, 300, 0, stats());
        let hostile = enemy("sage", Role::Benefactor, 300).with_archetype(Archetype::Benefactor);
        let hero = CombatantTemplate::new("sage", "Sage", Side::Party, Role::Hero, 300, 0, stats())
            .with_archetype(Archetype::Benefactor);

        for benefactor in [uncontrolled, hostile, hero] {
            let err = Bestiary::new([rescuing(30), benefactor], [], &skills()).unwrap_err();
            assert_eq!(err.error_code(), "CATALOG_INVALID_BENEFACTOR");
        }
    }

    #[test]
    fn encounters_resolve_their_enemies() {
        let slime = enemy("slime", Role::Slime, 40);
        let encounter = Encounter {
            id: "meadow".into(),
            enemies: vec!["slime".into(), "slime".into()],
            music: Some("field".into()),
        };
        let bestiary = Bestiary::new([slime], [encounter], &skills()).unwrap();

        let meadow = bestiary.encounter(&"meadow".into()).unwrap();
        assert_eq!(meadow.enemies.len(), 2);

        let empty = Encounter {
            id: "void".into(),
            enemies: vec![],
            music: None,
        };
        assert!(matches!(
            Bestiary::new([], [empty], &skills()),
            Err(CatalogError::EmptyEncounter { .. })
        ));
    }

    #[test]
    fn zero_hp_template_is_rejected() {
        let ghost = enemy("ghost", Role::Shadow, 0);
        assert!(matches!(
            Bestiary::new([ghost], [], &skills()),
            Err(CatalogError::ZeroHp { .. })
        ));
    }
}
