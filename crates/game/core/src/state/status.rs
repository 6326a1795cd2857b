//! Turn-counted status effects.
//!
//! Each combatant carries two [`StatusMap`]s (buffs and debuffs) mapping an
//! effect id to the number of turns it has left. The absence of an entry is
//! the canonical "off" state: counters are always positive and an entry that
//! reaches zero is deleted.

use std::collections::BTreeMap;

/// Known effect identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StatusId {
    /// Physical and magic damage dealt ×1.25.
    AtkUp,
    /// Physical and magic damage dealt ×0.7.
    AtkDown,
    /// Heals a percentage of max HP at the start of each turn.
    Regen,
    /// Deals capped percentage damage at the start of each turn.
    Poison,
    /// Redirects single-target physical hits onto the holder.
    ///
    /// Stored as a boolean flag on the combatant, never as a counter.
    Cover,
}

impl StatusId {
    /// Returns true for effects stored in the debuff container.
    pub const fn is_debuff(self) -> bool {
        matches!(self, StatusId::AtkDown | StatusId::Poison)
    }

    /// Returns true for effects that are flags rather than counters.
    pub const fn is_flag(self) -> bool {
        matches!(self, StatusId::Cover)
    }
}

/// Mapping from effect id to remaining turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusMap {
    entries: BTreeMap<StatusId, u32>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: StatusId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn remaining(&self, id: StatusId) -> Option<u32> {
        self.entries.get(&id).copied()
    }

    /// Sets the counter for `id`, replacing any previous duration.
    ///
    /// A duration of zero removes the entry.
    pub fn set(&mut self, id: StatusId, turns: u32) {
        if turns == 0 {
            self.entries.remove(&id);
        } else {
            self.entries.insert(id, turns);
        }
    }

    pub fn remove(&mut self, id: StatusId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Decrements the counter for `id`.
    ///
    /// Returns true when the effect expired (and was removed) by this tick.
    pub fn tick(&mut self, id: StatusId) -> bool {
        let Some(turns) = self.entries.get_mut(&id) else {
            return false;
        };
        *turns = turns.saturating_sub(1);
        if *turns == 0 {
            self.entries.remove(&id);
            return true;
        }
        false
    }

    /// Decrements every counter except the ids in `skip`.
    ///
    /// Returns the ids that expired, in id order.
    pub fn tick_all_except(&mut self, skip: &[StatusId]) -> Vec<StatusId> {
        let ids: Vec<StatusId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| !skip.contains(id))
            .collect();

        ids.into_iter().filter(|&id| self.tick(id)).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusId, u32)> + '_ {
        self.entries.iter().map(|(&id, &turns)| (id, turns))
    }
}
