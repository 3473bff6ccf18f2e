//! Battle bridge
//!
//! `BattleState` is the occurrence state that carries a fight. Someone starts
//! it, someone steps it round by round, and when the resolver reports a
//! result the state hands back a `BattleResult` action. Feeding that action
//! through `transition` routes the occurrence on to its next state.

use super::state::{IncidentAction, OccurrenceState, TextState, Transition, Urgency};
use crate::combat::{CombatEvent, CombatOutcome, CombatResolver};
use crate::roster::Roster;
use std::fmt;

type OutcomeRouter = Box<dyn Fn(&CombatOutcome) -> Transition>;
type CompletionHook = Box<dyn FnOnce(&CombatOutcome)>;

pub struct BattleState {
    name: String,
    resolver: CombatResolver,
    pending: Option<(Roster, Roster)>,
    router: Option<OutcomeRouter>,
    on_complete: Option<CompletionHook>,
    started: bool,
    reported: bool,
}

impl BattleState {
    /// `player` fights as side A, `opponent` as side B
    pub fn new(
        name: impl Into<String>,
        resolver: CombatResolver,
        player: Roster,
        opponent: Roster,
    ) -> Self {
        Self {
            name: name.into(),
            resolver,
            pending: Some((player, opponent)),
            router: None,
            on_complete: None,
            started: false,
            reported: false,
        }
    }

    /// Replace the default Victory/Defeat routing
    pub fn with_router<F>(mut self, router: F) -> Self
    where
        F: Fn(&CombatOutcome) -> Transition + 'static,
    {
        self.router = Some(Box::new(router));
        self
    }

    /// Begin the fight. `on_complete` runs once, when the result is known.
    /// Returns false if the battle was already started.
    pub fn start<F>(&mut self, on_complete: F) -> bool
    where
        F: FnOnce(&CombatOutcome) + 'static,
    {
        let Some((player, opponent)) = self.pending.take() else {
            tracing::warn!(battle = %self.name, "Battle already started");
            return false;
        };
        self.resolver.initialize(player, opponent);
        self.on_complete = Some(Box::new(on_complete));
        self.started = true;
        tracing::debug!(battle = %self.name, "Battle started");
        true
    }

    /// Play one round. Returns the result action exactly once, on the step
    /// that finds the battle decided.
    pub fn step(&mut self) -> Option<IncidentAction> {
        if !self.started {
            tracing::warn!(battle = %self.name, "Battle stepped before start");
            return None;
        }
        if self.reported {
            return None;
        }

        self.resolver.step();
        if !self.resolver.is_finished() {
            return None;
        }

        self.reported = true;
        let outcome = self.resolver.outcome();
        if let Some(hook) = self.on_complete.take() {
            hook(&outcome);
        }
        tracing::debug!(battle = %self.name, status = ?outcome.status, rounds = outcome.rounds, "Battle finished");
        Some(IncidentAction::BattleResult(outcome))
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once the result action has been handed out
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn resolver(&self) -> &CombatResolver {
        &self.resolver
    }

    /// Narration records queued by the resolver
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.resolver.drain_events()
    }

    fn default_route(outcome: &CombatOutcome) -> Transition {
        let state = if outcome.side_a_won() {
            TextState::new("Victory", "The enemy has been routed.")
        } else {
            TextState::new("Defeat", "Your roster was forced to withdraw.")
        };
        Transition::Next(Box::new(state))
    }
}

impl fmt::Debug for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleState")
            .field("name", &self.name)
            .field("started", &self.started)
            .field("reported", &self.reported)
            .field("round", &self.resolver.current_round())
            .field("status", &self.resolver.status())
            .finish_non_exhaustive()
    }
}

impl OccurrenceState for BattleState {
    fn name(&self) -> &str {
        &self.name
    }

    fn urgency(&self) -> Urgency {
        if self.reported {
            Urgency::Deferrable
        } else {
            Urgency::Immediate
        }
    }

    fn transition(&mut self, action: &IncidentAction) -> Transition {
        let IncidentAction::BattleResult(outcome) = action else {
            return Transition::Ignore;
        };
        match &self.router {
            Some(router) => router(outcome),
            None => Self::default_route(outcome),
        }
    }

    fn as_battle_mut(&mut self) -> Option<&mut BattleState> {
        Some(self)
    }
}
