//! Catalog validation errors.
//!
//! Malformed skill, item or combatant data is rejected when the catalog is
//! built. These errors are fatal: a battle never starts on bad data, and
//! nothing mid-battle re-validates catalog entries.

/// Errors raised while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("skill '{id}' has an invalid power value")]
    InvalidPower { id: String },

    #[error("skill '{id}' with effect '{effect}' requires a status application")]
    MissingStatus { id: String, effect: &'static str },

    #[error("skill '{id}' status '{status}' does not match its effect")]
    MismatchedStatus { id: String, status: &'static str },

    #[error("item '{id}' has unsupported effect '{effect}'")]
    UnsupportedItemEffect { id: String, effect: &'static str },

    #[error("item '{id}' must restore a positive amount")]
    EmptyItem { id: String },

    #[error("{owner} references unknown skill '{skill}'")]
    UnknownSkill { owner: String, skill: String },

    #[error("{owner} references unknown template '{template}'")]
    UnknownTemplate { owner: String, template: String },

    #[error("template '{id}' must have a positive max HP")]
    ZeroHp { id: String },

    #[error("encounter '{id}' has no enemies")]
    EmptyEncounter { id: String },

    #[error("template '{id}' has an invalid {rule} rule: {reason}")]
    InvalidRule {
        id: String,
        rule: &'static str,
        reason: &'static str,
    },

    #[error("{owner} names '{template}' as benefactor, which is not a party benefactor")]
    InvalidBenefactor { owner: String, template: String },
}

impl CatalogError {
    /// Returns a static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            InvalidPower { .. } => "CATALOG_INVALID_POWER",
            MissingStatus { .. } => "CATALOG_MISSING_STATUS",
            MismatchedStatus { .. } => "CATALOG_MISMATCHED_STATUS",
            UnsupportedItemEffect { .. } => "CATALOG_UNSUPPORTED_ITEM_EFFECT",
            EmptyItem { .. } => "CATALOG_EMPTY_ITEM",
            UnknownSkill { .. } => "CATALOG_UNKNOWN_SKILL",
            UnknownTemplate { .. } => "CATALOG_UNKNOWN_TEMPLATE",
            ZeroHp { .. } => "CATALOG_ZERO_HP",
            EmptyEncounter { .. } => "CATALOG_EMPTY_ENCOUNTER",
            InvalidRule { .. } => "CATALOG_INVALID_RULE",
            InvalidBenefactor { .. } => "CATALOG_INVALID_BENEFACTOR",
        }
    }
}
