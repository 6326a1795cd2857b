//! Skill catalog loader.

use std::path::Path;

use battle_core::SkillDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<SkillDef>,
}

/// Loader for the skill catalog.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDef>> {
        let file: SkillFile = parse_ron(content, "skill catalog")?;
        Ok(file.skills)
    }
}
