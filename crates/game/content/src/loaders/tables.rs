//! Balance tables loader.

use std::path::Path;

use battle_core::CombatTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for the resolver balance tables (`tables.toml`).
///
/// Every key is optional; missing keys keep the built-in defaults.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<CombatTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatTables> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let tables = TablesLoader::parse(
            r#"
            cover_multiplier = 0.25

            [poison]
            cap = 99
            "#,
        )
        .unwrap();

        assert_eq!(tables.cover_multiplier, 0.25);
        assert_eq!(tables.poison.cap, 99);
        assert_eq!(tables.poison.percent, 0.05);
        assert_eq!(tables.physical, CombatTables::default().physical);
    }
}
