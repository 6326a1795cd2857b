//! Read-only battle data and randomness.
//!
//! Catalogs expose static skill, item and combatant definitions; tables hold
//! the balance parameters used by the resolver; [`RngSource`] is the single
//! shared random generator every draw flows through. The [`Catalogs`]
//! aggregate bundles the static data so the runtime can hand it around as
//! one unit.

/// Declares a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

mod error;
mod items;
mod npc;
mod rng;
mod skills;
mod tables;

pub use error::CatalogError;
pub use items::{ItemCatalog, ItemDef, ItemId};
pub use npc::{
    Bestiary, CombatantTemplate, Encounter, EncounterId, EncounterRules, FusionRule, RescueRule,
    SplitRule, TemplateId,
};
pub use rng::{PcgRng, RngSource, ScriptedRng, mix_seed};
pub use skills::{EffectKind, Scope, SkillCatalog, SkillDef, SkillId, StatusApplication};
pub use tables::{
    CombatTables, HealParams, MagicParams, ModifierParams, PhysicalParams, PoisonParams,
};

/// Static data consumed read-only during a battle.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub skills: SkillCatalog,
    pub items: ItemCatalog,
    pub bestiary: Bestiary,
}

impl Catalogs {
    pub fn new(skills: SkillCatalog, items: ItemCatalog, bestiary: Bestiary) -> Self {
        Self {
            skills,
            items,
            bestiary,
        }
    }
}
