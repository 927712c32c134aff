//! Round scheduling over per-actor action sources.
//!
//! A round gives each living actor, in order, one turn, then runs the shared
//! effect and AI pass. An actor whose action does not spend the turn (a
//! refusal, or a bump into a wall) is asked again, up to a limit. A floor
//! change ends the round at once: later actors and the shared pass are
//! skipped.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use delve_foundation::EntityId;
use log::{debug, trace};

use crate::action::{Action, TurnOutcome};
use crate::state::{GameState, RoundReport, TurnRecord};

/// How many times an actor is asked before its turn is forfeited.
pub const MAX_ATTEMPTS: usize = 8;

/// Supplies actions for one actor.
pub trait ActionSource {
    /// The next action for `actor`, or `None` if no more will come.
    fn next_action(&mut self, actor: EntityId, state: &GameState) -> Option<Action>;
}

/// Reads actions from a channel, blocking until one arrives.
///
/// A disconnected sender yields `None`, which the round reports as
/// [`TurnOutcome::NoAction`].
#[derive(Debug)]
pub struct QueueSource {
    rx: Receiver<Action>,
}

impl QueueSource {
    /// Wraps a receiver.
    #[must_use]
    pub const fn new(rx: Receiver<Action>) -> Self {
        Self { rx }
    }
}

impl ActionSource for QueueSource {
    fn next_action(&mut self, _actor: EntityId, _state: &GameState) -> Option<Action> {
        self.rx.recv().ok()
    }
}

/// Replays a fixed list of actions.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    actions: VecDeque<Action>,
}

impl ScriptedSource {
    /// Creates a source that plays `actions` in order.
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    /// Actions not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl ActionSource for ScriptedSource {
    fn next_action(&mut self, _actor: EntityId, _state: &GameState) -> Option<Action> {
        self.actions.pop_front()
    }
}

impl<F> ActionSource for F
where
    F: FnMut(EntityId, &GameState) -> Option<Action>,
{
    fn next_action(&mut self, actor: EntityId, state: &GameState) -> Option<Action> {
        self(actor, state)
    }
}

impl GameState {
    /// Plays one full round. `sources[i]` drives the `i`-th actor; actors
    /// without a source forfeit their turn.
    pub fn play_round(&mut self, sources: &mut [&mut dyn ActionSource]) -> RoundReport {
        self.play_round_by(|index, actor, state| {
            sources
                .get_mut(index)
                .map(|source| source.next_action(actor, state))
        })
    }

    /// Plays one full round with a single source answering for every actor.
    pub fn play_round_with(&mut self, source: &mut dyn ActionSource) -> RoundReport {
        self.play_round_by(|_, actor, state| Some(source.next_action(actor, state)))
    }

    /// `next` returns `None` when the actor has no source at all, and
    /// `Some(None)` when its source has nothing more to give.
    fn play_round_by<F>(&mut self, mut next: F) -> RoundReport
    where
        F: FnMut(usize, EntityId, &GameState) -> Option<Option<Action>>,
    {
        let actors = self.actors().to_vec();
        let mut turns = Vec::new();

        for (index, actor) in actors.into_iter().enumerate() {
            if !crate::world::is_alive(self.store(), actor) {
                trace!("{actor} is dead, skipping");
                continue;
            }
            for _ in 0..MAX_ATTEMPTS {
                let Some(action) = next(index, actor, self) else {
                    break;
                };
                let outcome = action.map_or(TurnOutcome::NoAction, |a| self.act(actor, a));
                let done = outcome.consumes_turn() || action.is_none();
                let descended = matches!(outcome, TurnOutcome::Descended { .. });
                turns.push(TurnRecord {
                    actor,
                    action,
                    outcome,
                });
                if descended {
                    debug!("{actor} changed floor, round ends");
                    return RoundReport {
                        round: self.next_round(),
                        turns,
                        descended: true,
                        ..RoundReport::default()
                    };
                }
                if done {
                    break;
                }
            }
        }

        let mut report = self.end_round();
        report.turns = turns;
        report
    }
}
