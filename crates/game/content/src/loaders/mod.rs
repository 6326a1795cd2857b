//! Content loaders for reading battle data from files.
//!
//! Each loader parses one file format into battle-core types. Validation of
//! cross references happens when the catalogs are assembled by
//! [`ContentFactory`].

pub mod bestiary;
pub mod factory;
pub mod item;
pub mod party;
pub mod skills;
pub mod tables;

pub use bestiary::BestiaryLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;
pub use party::{PartyLoader, PartySetup};
pub use skills::SkillLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T>(content: &str, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
