//! Battle backup used to restart a lost fight.

use std::collections::BTreeMap;

use battle_core::{EncounterId, Inventory, ItemId, Roster};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// What the player wants after a defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RetryChoice {
    /// Restart with the HP/MP the party entered the battle with.
    Resume,
    /// Restart with the party at full HP and MP.
    ResumeHealed,
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyVitals {
    pub hp: u32,
    pub mp: u32,
}

/// Party and encounter snapshot captured at battle setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleBackup {
    /// One entry per party member, in roster order.
    pub party: Vec<PartyVitals>,
    pub inventory: BTreeMap<ItemId, u32>,
    pub encounter: EncounterId,
    pub music: Option<String>,
}

impl BattleBackup {
    pub fn capture(
        roster: &Roster,
        inventory: &Inventory,
        encounter: EncounterId,
        music: Option<String>,
    ) -> Self {
        Self {
            party: roster
                .party()
                .iter()
                .map(|member| PartyVitals {
                    hp: member.hp.current,
                    mp: member.mp.current,
                })
                .collect(),
            inventory: inventory
                .iter()
                .map(|(item, count)| (item.clone(), count))
                .collect(),
            encounter,
            music,
        }
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
            .iter()
            .fold(Inventory::new(), |inventory, (item, &count)| {
                inventory.with(item.clone(), count)
            })
    }

    /// Rolls the party back to this snapshot.
    ///
    /// Members that joined after the capture are dropped, every status is
    /// cleared and each member re-enters the queue at `K / speed`.
    pub fn restore_party(&self, roster: &mut Roster, healed: bool) {
        roster.truncate_party(self.party.len());
        let k = roster.action_value_k();
        for (member, vitals) in roster.party_mut().iter_mut().zip(&self.party) {
            member.clear_all_status();
            if healed {
                member.hp.fill();
                member.mp.fill();
            } else {
                member.restore_vitals(vitals.hp, vitals.mp);
            }
            member.reset_action_value(k);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::Backup)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RuntimeError::Backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatStats, Combatant, Role, Side, StatusId};

    fn member(name: &str, role: Role) -> Combatant {
        Combatant::new(name, Side::Party, role, 100, 40, CombatStats {
            spd: 100,
            ..CombatStats::default()
        })
    }

    #[test]
    fn restore_drops_late_joiners_and_rewinds_vitals() {
        let mut roster = Roster::new(10_000.0);
        let hero = roster.insert(member("Ash", Role::Hero));
        roster.get_mut(hero).unwrap().apply_hp(-30);
        let inventory = Inventory::new().with("potion", 2);
        let backup = BattleBackup::capture(&roster, &inventory, "meadow".into(), None);

        roster.insert(member("Sage", Role::Benefactor));
        let ash = roster.get_mut(hero).unwrap();
        ash.apply_hp(-70);
        ash.apply_mp(-40);
        ash.add_status(StatusId::Poison, 3);
        ash.action_value = -5.0;

        backup.restore_party(&mut roster, false);

        assert_eq!(roster.party().len(), 1);
        let ash = roster.get(hero).unwrap();
        assert_eq!((ash.hp.current, ash.mp.current), (70, 40));
        assert!(ash.debuffs.is_empty());
        assert_eq!(ash.action_value, 100.0);
        assert_eq!(backup.inventory(), inventory);

        backup.restore_party(&mut roster, true);
        assert_eq!(roster.get(hero).unwrap().hp.current, 100);
    }

    #[test]
    fn backup_exports_as_json() {
        let backup = BattleBackup {
            party: vec![PartyVitals { hp: 50, mp: 5 }],
            inventory: BTreeMap::from([(ItemId::from("ether"), 1)]),
            encounter: "shadow_keep".into(),
            music: Some("final".into()),
        };

        let json = backup.to_json().unwrap();
        assert!(json.contains("\"ether\": 1"));
        assert_eq!(BattleBackup::from_json(&json).unwrap(), backup);
        assert!(matches!(
            BattleBackup::from_json("{"),
            Err(RuntimeError::Backup(_))
        ));
    }
}
