//! Live set of party members and enemies.

use super::combatant::Combatant;
use super::common::{CombatantId, Side};

/// Owns every combatant in the battle, dead or alive.
///
/// Dead combatants stay in the roster (they can be revived); only the
/// orchestrator's scripted events remove or replace entries. Turn order is
/// never cached here: the [`TurnScheduler`](crate::engine::TurnScheduler)
/// recomputes it from the live entries on every query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    party: Vec<Combatant>,
    enemies: Vec<Combatant>,
    next_id: u32,
    /// Action value constant `K`; a combatant waits `K / speed` after acting.
    action_value_k: f64,
}

impl Roster {
    pub fn new(action_value_k: f64) -> Self {
        Self {
            party: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
            action_value_k,
        }
    }

    pub fn action_value_k(&self) -> f64 {
        self.action_value_k
    }

    /// Adds a combatant to its side, assigning a fresh id and an initial
    /// action value of `K / speed`.
    pub fn insert(&mut self, mut combatant: Combatant) -> CombatantId {
        let id = CombatantId(self.next_id);
        self.next_id += 1;

        combatant.id = id;
        combatant.reset_action_value(self.action_value_k);

        match combatant.side {
            Side::Party => self.party.push(combatant),
            Side::Enemy => self.enemies.push(combatant),
        }
        id
    }

    /// Removes a combatant from whichever side holds it.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        if let Some(index) = self.party.iter().position(|c| c.id == id) {
            return Some(self.party.remove(index));
        }
        let index = self.enemies.iter().position(|c| c.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }

    /// Drops party members beyond `len`, e.g. allies that joined mid-battle.
    pub fn truncate_party(&mut self, len: usize) {
        self.party.truncate(len);
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.party
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|c| c.id == id)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.get(id).is_some()
    }

    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        self.get(id).map(|c| c.side)
    }

    pub fn party(&self) -> &[Combatant] {
        &self.party
    }

    pub fn party_mut(&mut self) -> &mut [Combatant] {
        &mut self.party
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Combatant] {
        &mut self.enemies
    }

    /// Every combatant, party first, in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.party.iter().chain(self.enemies.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> + '_ {
        self.party.iter_mut().chain(self.enemies.iter_mut())
    }

    pub fn side(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Party => &self.party,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn alive_party(&self) -> Vec<&Combatant> {
        self.party.iter().filter(|c| c.is_alive()).collect()
    }

    pub fn alive_enemies(&self) -> Vec<&Combatant> {
        self.enemies.iter().filter(|c| c.is_alive()).collect()
    }

    /// Alive combatants on `side` that may be named as action targets.
    pub fn targetable(&self, side: Side) -> Vec<&Combatant> {
        self.side(side)
            .iter()
            .filter(|c| c.is_alive() && c.is_targetable())
            .collect()
    }

    /// Targets the given combatant fights against.
    pub fn opponents_of(&self, id: CombatantId) -> Vec<&Combatant> {
        match self.side_of(id) {
            Some(side) => self.targetable(side.opposing()),
            None => Vec::new(),
        }
    }

    /// Targetable allies of the given combatant, itself included when eligible.
    pub fn allies_of(&self, id: CombatantId) -> Vec<&Combatant> {
        match self.side_of(id) {
            Some(side) => self.targetable(side),
            None => Vec::new(),
        }
    }

    /// No enemy is alive.
    pub fn check_victory(&self) -> bool {
        !self.enemies.iter().any(Combatant::is_alive)
    }

    /// No party member other than the benefactor is alive.
    pub fn check_defeat(&self) -> bool {
        !self
            .party
            .iter()
            .any(|c| c.is_alive() && !c.is_benefactor())
    }

    pub fn is_decided(&self) -> bool {
        self.check_victory() || self.check_defeat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, Role};

    fn member(name: &str, side: Side, role: Role) -> Combatant {
        Combatant::new(name, side, role, 50, 10, CombatStats {
            spd: 100,
            ..CombatStats::default()
        })
    }

    #[test]
    fn insert_assigns_unique_ids_per_side() {
        let mut roster = Roster::new(10_000.0);
        let a = roster.insert(member("a", Side::Party, Role::Hero));
        let b = roster.insert(member("b", Side::Enemy, Role::Slime));

        assert_ne!(a, b);
        assert_eq!(roster.side_of(a), Some(Side::Party));
        assert_eq!(roster.side_of(b), Some(Side::Enemy));
        assert_eq!(roster.get(a).unwrap().action_value, 100.0);
    }

    #[test]
    fn benefactor_does_not_hold_off_defeat() {
        let mut roster = Roster::new(10_000.0);
        let hero = roster.insert(member("hero", Side::Party, Role::Hero));
        roster.insert(member("npc", Side::Party, Role::Benefactor));
        roster.insert(member("slime", Side::Enemy, Role::Slime));

        assert!(!roster.check_defeat());
        roster.get_mut(hero).unwrap().apply_hp(-50);
        assert!(roster.check_defeat());
    }

    #[test]
    fn benefactor_is_never_targetable() {
        let mut roster = Roster::new(10_000.0);
        let hero = roster.insert(member("hero", Side::Party, Role::Hero));
        roster.insert(member("npc", Side::Party, Role::Benefactor));
        let slime = roster.insert(member("slime", Side::Enemy, Role::Slime));

        let targets: Vec<_> = roster.opponents_of(slime).iter().map(|c| c.id).collect();
        assert_eq!(targets, vec![hero]);
    }

    #[test]
    fn victory_when_every_enemy_is_down() {
        let mut roster = Roster::new(10_000.0);
        roster.insert(member("hero", Side::Party, Role::Hero));
        let slime = roster.insert(member("slime", Side::Enemy, Role::Slime));

        assert!(!roster.check_victory());
        roster.get_mut(slime).unwrap().apply_hp(-50);
        assert!(roster.check_victory());
        assert!(roster.is_decided());
    }
}
