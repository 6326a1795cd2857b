//! Target checks performed before dispatch.
//!
//! The benefactor is never a hittable or healable recipient: it is filtered
//! out of multi-target lists, and naming it as a single target cancels the
//! whole action.

use crate::action::types::{Action, Target};
use crate::state::{CombatantId, Roster};

fn is_protected(roster: &Roster, id: CombatantId) -> bool {
    roster.get(id).is_some_and(|c| !c.is_targetable())
}

/// Removes protected combatants from the action's targets.
///
/// Returns `None` when the action must be cancelled: a single target that is
/// protected, or a target list that ends up empty.
pub fn sanitize_targets(roster: &Roster, action: &Action) -> Option<Action> {
    match &action.target {
        Target::Actor => Some(action.clone()),
        Target::Single(id) => (!is_protected(roster, *id)).then(|| action.clone()),
        Target::Many(ids) => {
            let kept: Vec<CombatantId> = ids
                .iter()
                .copied()
                .filter(|&id| !is_protected(roster, id))
                .collect();
            if kept.is_empty() {
                return None;
            }
            Some(Action {
                target: Target::Many(kept),
                ..action.clone()
            })
        }
    }
}
