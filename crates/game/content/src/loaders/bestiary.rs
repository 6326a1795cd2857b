//! Combatant template and encounter loaders.

use std::path::Path;

use battle_core::{CombatantTemplate, Encounter};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Template catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    pub templates: Vec<CombatantTemplate>,
}

/// Encounter list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterFile {
    pub encounters: Vec<Encounter>,
}

/// Loader for `templates.ron` and `encounters.ron`.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load_templates(path: &Path) -> LoadResult<Vec<CombatantTemplate>> {
        let content = read_file(path)?;
        Self::parse_templates(&content)
    }

    pub fn load_encounters(path: &Path) -> LoadResult<Vec<Encounter>> {
        let content = read_file(path)?;
        Self::parse_encounters(&content)
    }

    pub fn parse_templates(content: &str) -> LoadResult<Vec<CombatantTemplate>> {
        let file: TemplateFile = parse_ron(content, "template catalog")?;
        Ok(file.templates)
    }

    pub fn parse_encounters(content: &str) -> LoadResult<Vec<Encounter>> {
        let file: EncounterFile = parse_ron(content, "encounter list")?;
        Ok(file.encounters)
    }
}
