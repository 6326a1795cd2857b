//! Content factory for building validated catalogs from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{
    Bestiary, Catalogs, CombatTables, CombatantTemplate, Encounter, ItemCatalog, ItemDef, Side,
    SkillCatalog, SkillDef,
};

use crate::loaders::{
    BestiaryLoader, ItemLoader, LoadResult, PartyLoader, PartySetup, SkillLoader, TablesLoader,
};

/// Everything a battle session needs from content.
#[derive(Clone, Debug)]
pub struct Content {
    pub catalogs: Catalogs,
    pub tables: CombatTables,
    pub party: PartySetup,
}

impl Content {
    /// Spawns the starting party in roster order.
    pub fn party_templates(&self) -> impl Iterator<Item = &CombatantTemplate> + '_ {
        self.party
            .members
            .iter()
            .filter_map(|id| self.catalogs.bestiary.template(id))
    }
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml      (optional)
/// ├── skills.ron
/// ├── items.ron
/// ├── templates.ron
/// ├── encounters.ron
/// └── party.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance tables from `tables.toml`, or defaults when absent.
    pub fn load_tables(&self) -> LoadResult<CombatTables> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no tables file, using defaults");
            return Ok(CombatTables::default());
        }
        TablesLoader::load(&path)
    }

    /// Load skill definitions from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDef>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load item definitions from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDef>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load combatant templates from `templates.ron`.
    pub fn load_templates(&self) -> LoadResult<Vec<CombatantTemplate>> {
        BestiaryLoader::load_templates(&self.data_dir.join("templates.ron"))
    }

    /// Load encounters from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<Encounter>> {
        BestiaryLoader::load_encounters(&self.data_dir.join("encounters.ron"))
    }

    /// Load the starting party from `party.ron`.
    pub fn load_party(&self) -> LoadResult<PartySetup> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Loads and validates every content file in the data directory.
    pub fn load(&self) -> LoadResult<Content> {
        let content = assemble(
            self.load_skills()?,
            self.load_items()?,
            self.load_templates()?,
            self.load_encounters()?,
            self.load_tables()?,
            self.load_party()?,
        )
        .with_context(|| format!("invalid content in {}", self.data_dir.display()))?;

        tracing::info!(
            dir = %self.data_dir.display(),
            skills = content.catalogs.skills.len(),
            items = content.catalogs.items.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// The data set embedded in this crate.
    pub fn builtin() -> LoadResult<Content> {
        assemble(
            SkillLoader::parse(include_str!("../../data/skills.ron"))?,
            ItemLoader::parse(include_str!("../../data/items.ron"))?,
            BestiaryLoader::parse_templates(include_str!("../../data/templates.ron"))?,
            BestiaryLoader::parse_encounters(include_str!("../../data/encounters.ron"))?,
            TablesLoader::parse(include_str!("../../data/tables.toml"))?,
            PartyLoader::parse(include_str!("../../data/party.ron"))?,
        )
        .context("invalid built-in content")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Builds the catalogs and checks the party setup against them.
fn assemble(
    skills: Vec<SkillDef>,
    items: Vec<ItemDef>,
    templates: Vec<CombatantTemplate>,
    encounters: Vec<Encounter>,
    tables: CombatTables,
    party: PartySetup,
) -> LoadResult<Content> {
    let skills = SkillCatalog::new(skills)?;
    let items = ItemCatalog::new(items)?;
    let bestiary = Bestiary::new(templates, encounters, &skills)?;

    if party.members.is_empty() {
        anyhow::bail!("party setup lists no members");
    }
    for member in &party.members {
        let template = bestiary
            .template(member)
            .ok_or_else(|| anyhow::anyhow!("party member '{}' has no template", member))?;
        if template.side != Side::Party {
            anyhow::bail!("party member '{}' is not a party template", member);
        }
    }
    if let Some(item) = party.inventory.keys().find(|id| items.get(id).is_none()) {
        anyhow::bail!("party inventory lists unknown item '{}'", item);
    }

    Ok(Content {
        catalogs: Catalogs::new(skills, items, bestiary),
        tables,
        party,
    })
}
