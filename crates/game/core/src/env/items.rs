//! Consumable item catalog.

use std::collections::BTreeMap;

use super::error::CatalogError;
use super::skills::{EffectKind, Scope};

string_id!(
    /// Key of an [`ItemDef`] in the [`ItemCatalog`] and the inventory.
    ItemId
);

/// Static item definition.
///
/// `amount` is HP for heals, MP for recovery, and the percent of max HP a
/// fallen ally comes back with for resurrection items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub effect: EffectKind,
    pub amount: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_scope"))]
    pub scope: Scope,
}

#[cfg(feature = "serde")]
fn default_scope() -> Scope {
    Scope::Single
}

impl ItemDef {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        effect: EffectKind,
        amount: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
            amount,
            scope: Scope::Single,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !matches!(
            self.effect,
            EffectKind::Heal | EffectKind::MpRecovery | EffectKind::Res
        ) {
            return Err(CatalogError::UnsupportedItemEffect {
                id: self.id.to_string(),
                effect: self.effect.into(),
            });
        }
        if self.amount == 0 {
            return Err(CatalogError::EmptyItem {
                id: self.id.to_string(),
            });
        }
        Ok(())
    }
}

/// Read-only item table keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemDef>,
}

impl ItemCatalog {
    pub fn new(defs: impl IntoIterator<Item = ItemDef>) -> Result<Self, CatalogError> {
        let mut items = BTreeMap::new();
        for def in defs {
            def.validate()?;
            if items.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "item",
                    id: def.id.to_string(),
                });
            }
            items.insert(def.id.clone(), def);
        }
        Ok(Self { items })
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> + '_ {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
