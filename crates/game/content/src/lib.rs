//! Data-driven battle content and loaders.
//!
//! This crate houses the static battle data and provides loaders for RON/TOML
//! files:
//! - Skill catalog (RON)
//! - Item catalog (RON)
//! - Combatant templates and encounters (RON)
//! - Starting party and inventory (RON)
//! - Balance tables (TOML)
//!
//! Content is validated once through the battle-core catalog constructors and
//! handed to the runtime as read-only [`battle_core::Catalogs`]. A built-in
//! data set is embedded so the runtime and tests can start without a data
//! directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BestiaryLoader, Content, ContentFactory, ItemLoader, LoadResult, PartyLoader, PartySetup,
    SkillLoader, TablesLoader,
};
