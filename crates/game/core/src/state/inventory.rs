use std::collections::BTreeMap;

use crate::env::ItemId;

/// Party-wide consumable counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: impl Into<ItemId>, count: u32) -> Self {
        self.add(item.into(), count);
        self
    }

    pub fn count(&self, item: &ItemId) -> u32 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        *self.counts.entry(item).or_insert(0) += count;
    }

    /// Consumes one unit. Returns false when none are left.
    pub fn take(&mut self, item: &ItemId) -> bool {
        match self.counts.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(item);
                }
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> + '_ {
        self.counts.iter().map(|(id, &count)| (id, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_until_empty() {
        let potion = ItemId::from("potion");
        let mut inventory = Inventory::new().with("potion", 2);

        assert!(inventory.take(&potion));
        assert!(inventory.take(&potion));
        assert!(!inventory.take(&potion));
        assert_eq!(inventory.count(&potion), 0);
        assert!(inventory.is_empty());
    }
}
