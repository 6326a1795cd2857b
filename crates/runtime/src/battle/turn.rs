//! One pass of the turn loop.

use std::time::Duration;

use battle_core::{
    Action, ActionKind, Archetype, CombatantId, ExecContext, Resolution, SkipReason, Target,
    TurnScheduler, begin_turn, decide, end_turn, execute, sanitize_targets,
};

use super::narrate::Narrator;
use super::special;
use super::{Battle, BattleOutcome, BattlePhase};
use crate::api::{Result, RuntimeError};
use crate::events::{BattleEvent, TurnEvent};

impl Battle {
    /// Plays a single turn.
    ///
    /// Returns the outcome once the battle has ended; further calls return
    /// the same outcome without touching the roster.
    pub async fn step(&mut self) -> Result<Option<BattleOutcome>> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }
        if !self.started {
            self.announce_start();
        }

        self.enter(BattlePhase::AwaitingSpecialEvent, None);
        self.run_special_events().await;
        if let Some(outcome) = self.check_outcome() {
            return Ok(Some(outcome));
        }
        if self.turn >= self.config.max_turns {
            tracing::warn!(turns = self.turn, "turn limit reached");
            self.finish(BattleOutcome::Exhausted);
            return Ok(Some(BattleOutcome::Exhausted));
        }

        self.enter(BattlePhase::TurnStart, None);
        let next = TurnScheduler::new(&mut self.roster).prepare_next_turn();
        let Some(actor) = next else {
            if let Some(outcome) = self.check_outcome() {
                return Ok(Some(outcome));
            }
            self.finish(BattleOutcome::Exhausted);
            return Ok(Some(BattleOutcome::Exhausted));
        };
        self.turn += 1;
        tracing::debug!(%actor, turn = self.turn, "turn start");
        self.bus.turn(TurnEvent::TurnStarted {
            actor,
            turn: self.turn,
        });

        self.enter(BattlePhase::StatusStart, Some(actor));
        let ticks = match self.roster.get_mut(actor) {
            Some(combatant) => begin_turn(combatant, &self.tables),
            None => Vec::new(),
        };
        self.narrator().ticks(actor, &ticks);

        if self.roster.get(actor).is_some_and(|c| c.is_alive()) {
            self.enter(BattlePhase::ActionSelect, Some(actor));
            let action = self.select_action(actor).await?;

            // Held until the turn's bookkeeping is done, pacing included.
            self.enter(BattlePhase::ActionResolve, Some(actor));
            self.gate.set_processing(true);
            self.resolve(action).await;
            self.run_special_events().await;

            self.enter(BattlePhase::StatusEnd, Some(actor));
            let expired = match self.roster.get_mut(actor) {
                Some(combatant) => end_turn(combatant),
                None => Vec::new(),
            };
            self.narrator().expirations(actor, &expired);
            self.gate.set_processing(false);
        }

        TurnScheduler::new(&mut self.roster).complete_turn(actor);
        self.enter(BattlePhase::VictoryCheck, Some(actor));
        Ok(self.check_outcome())
    }

    fn narrator(&self) -> Narrator<'_> {
        Narrator::new(&self.bus, &self.roster, &self.catalogs)
    }

    fn enter(&mut self, phase: BattlePhase, actor: Option<CombatantId>) {
        self.phase = phase;
        tracing::trace!(%phase, "phase");
        self.bus.turn(TurnEvent::PhaseChanged { phase, actor });
    }

    fn announce_start(&mut self) {
        self.started = true;
        tracing::info!(
            encounter = %self.encounter.id,
            attempt = self.attempt,
            "battle started"
        );
        self.bus.turn(TurnEvent::BattleStarted {
            encounter: self.encounter.id.clone(),
            music: self.encounter.music.clone(),
            attempt: self.attempt,
        });
        if let Some(music) = &self.encounter.music {
            self.bus.publish(BattleEvent::Cue(music.clone()));
        }
    }

    /// Ends the battle when either side is wiped out.
    fn check_outcome(&mut self) -> Option<BattleOutcome> {
        let outcome = if self.roster.check_victory() {
            BattleOutcome::Victory
        } else if self.roster.check_defeat() {
            BattleOutcome::Defeat
        } else {
            return None;
        };
        self.finish(outcome);
        Some(outcome)
    }

    pub(super) fn finish(&mut self, outcome: BattleOutcome) {
        self.outcome = Some(outcome);
        self.enter(BattlePhase::Ended, None);
        tracing::info!(%outcome, turns = self.turn, attempt = self.attempt, "battle ended");
        self.bus.turn(TurnEvent::BattleEnded {
            outcome,
            turns: self.turn,
        });
    }

    async fn pace(&self) {
        pause(self.config.step_delay).await;
    }

    async fn run_special_events(&mut self) {
        let events =
            special::resolve_pending(&mut self.roster, &self.catalogs.bestiary, &mut self.flags);
        for event in events {
            tracing::info!(?event, "special event");
            self.narrator().special(&event);
            self.bus.turn(TurnEvent::Special(event));
            self.pace().await;
        }
    }

    /// Human-controlled members wait on the provider; everyone else is
    /// decided on the spot.
    async fn select_action(&mut self, actor: CombatantId) -> Result<Action> {
        let Some(combatant) = self.roster.get(actor) else {
            return Ok(Action::new(actor, ActionKind::Attack, Target::Many(Vec::new())));
        };

        if combatant.archetype == Archetype::Player && !self.config.auto_party {
            let provider = self.provider.as_mut().ok_or(RuntimeError::ProviderNotSet)?;
            self.gate.await_input(actor);
            self.bus.turn(TurnEvent::AwaitingInput { actor });
            let action = provider.provide_action(actor, &self.roster).await;
            self.gate.clear_awaiting();

            let action = action?;
            if action.actor != actor {
                return Err(RuntimeError::InvalidActionActor {
                    expected: actor,
                    provided: action.actor,
                });
            }
            return Ok(action);
        }

        let opponents = self.roster.opponents_of(actor);
        let allies = self.roster.allies_of(actor);
        let action = decide(
            combatant,
            &opponents,
            &allies,
            &self.catalogs.skills,
            &mut self.rng,
        );
        tracing::debug!(
            actor = %combatant.name,
            archetype = %battle_core::policy::profile(combatant),
            ?action,
            "decided"
        );
        Ok(action)
    }

    async fn resolve(&mut self, action: Action) {
        self.narrator().action(&action);

        let resolution = match sanitize_targets(&self.roster, &action) {
            Some(sanitized) => {
                let mut ctx = ExecContext::new(
                    &self.catalogs.skills,
                    &self.catalogs.items,
                    &self.tables,
                    &mut self.rng,
                    &mut self.inventory,
                );
                execute(&mut self.roster, &sanitized, &mut ctx)
            }
            None => {
                let target = match &action.target {
                    Target::Single(id) => Some(*id),
                    _ => None,
                };
                Resolution::cancelled(target, SkipReason::ProtectedTarget)
            }
        };

        let k = self.roster.action_value_k();
        for id in resolution.revived() {
            if let Some(combatant) = self.roster.get_mut(id) {
                combatant.reset_action_value(k);
            }
        }

        if resolution.cancelled {
            tracing::warn!(actor = %action.actor, events = ?resolution.events, "action cancelled");
        }
        self.narrator().resolution(&resolution);
        self.bus.turn(TurnEvent::ActionResolved { action, resolution });
        self.pace().await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
