//! Unified error types surfaced by the runtime API.
//!
//! Combat itself never fails; these cover setup, provider plumbing and input
//! submission so clients can bubble them up with consistent context.
use thiserror::Error;

use battle_core::{CatalogError, CombatantId, EncounterId, TemplateId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action provider channel closed")]
    ProviderClosed,

    #[error("action provider not set and party is not auto-controlled")]
    ProviderNotSet,

    #[error("a turn is already being resolved")]
    TurnInProgress,

    #[error("battle is not waiting for input")]
    NotAwaitingInput,

    #[error("action actor {provided} does not match current actor {expected}")]
    InvalidActionActor {
        expected: CombatantId,
        provided: CombatantId,
    },

    #[error("battle requires catalogs to be configured before building")]
    MissingCatalogs,

    #[error("battle requires at least one party member")]
    EmptyParty,

    #[error("battle requires an encounter")]
    MissingEncounter,

    #[error("unknown encounter '{0}'")]
    UnknownEncounter(EncounterId),

    #[error("unknown template '{0}'")]
    UnknownTemplate(TemplateId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("no battle backup was captured")]
    NoBackup,

    #[error("failed to encode or decode battle backup")]
    Backup(#[source] serde_json::Error),
}
