//! Decision policy for combatants that are not driven by a human.
//!
//! [`decide`] is stateless: it dispatches on the actor's [`Archetype`] and
//! walks that archetype's ordered rules. Each rule is an independent draw
//! from the shared [`RngSource`]; the first that succeeds picks the action.
//! A rule whose skill the actor does not know or cannot afford is skipped
//! without consuming a draw. When no rule fires the actor attacks a
//! uniform-random opponent.
//!
//! The probabilities live in [`odds`].

mod known;
pub mod odds;
mod rules;

use crate::action::Action;
use crate::env::{RngSource, SkillCatalog};
use crate::state::{Archetype, Combatant};

use known::Known;
use rules::Situation;

/// Chooses an action for `actor`.
///
/// `opponents` and `allies` must hold only alive, targetable combatants
/// (the benefactor never appears in either). `allies` includes the actor
/// itself when it is targetable.
pub fn decide(
    actor: &Combatant,
    opponents: &[&Combatant],
    allies: &[&Combatant],
    skills: &SkillCatalog,
    rng: &mut dyn RngSource,
) -> Action {
    let mut situation = Situation {
        actor,
        opponents,
        allies,
        known: Known::new(actor, skills),
        rng,
    };

    let chosen = match profile(actor) {
        Archetype::Boss => rules::boss(&mut situation),
        Archetype::Healer => rules::healer(&mut situation),
        Archetype::Support => rules::support(&mut situation),
        Archetype::Caster => rules::caster(&mut situation),
        Archetype::King => rules::king(&mut situation),
        Archetype::Benefactor => rules::benefactor(&mut situation),
        Archetype::Player => rules::player(&mut situation),
        Archetype::Basic => None,
    };
    chosen.unwrap_or_else(|| situation.attack())
}

/// Effective archetype: generic enemies named like a king act as one.
pub fn profile(actor: &Combatant) -> Archetype {
    if actor.archetype == Archetype::Basic && actor.name.contains("King") {
        return Archetype::King;
    }
    actor.archetype
}
