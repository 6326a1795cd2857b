//! Starting party loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{Inventory, ItemId, TemplateId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Party line-up and starting inventory (`party.ron`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySetup {
    /// Party templates in roster order.
    pub members: Vec<TemplateId>,
    #[serde(default)]
    pub inventory: BTreeMap<ItemId, u32>,
}

impl PartySetup {
    pub fn inventory(&self) -> Inventory {
        self.inventory
            .iter()
            .fold(Inventory::new(), |inv, (id, &count)| inv.with(id.clone(), count))
    }
}

pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartySetup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PartySetup> {
        parse_ron(content, "party setup")
    }
}
