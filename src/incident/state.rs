//! Occurrence states
//!
//! An occurrence is always in exactly one state. Feeding it an action yields
//! a `Transition`: stay put, move on, or end the occurrence.

use super::battle::BattleState;
use crate::combat::CombatOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an occurrence holds up the weekly clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Must be dealt with before time moves on
    Immediate,
    /// Can sit in the tray until the player gets to it
    #[default]
    Deferrable,
}

/// Something the player (or the system) does to an occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentAction {
    /// Read and close a text state
    Acknowledge,
    /// Pick an option by label
    Choose(String),
    /// Synthesized by a battle state when its fight ends
    BattleResult(CombatOutcome),
}

impl IncidentAction {
    pub fn choose(label: impl Into<String>) -> Self {
        Self::Choose(label.into())
    }
}

#[derive(Debug)]
pub enum Transition {
    /// The occurrence is over
    End,
    /// Swap in this state
    Next(Box<dyn OccurrenceState>),
    /// Swap in the owning definition's state with this key
    Goto(String),
    /// The action means nothing here; nothing changes
    Ignore,
}

pub trait OccurrenceState: fmt::Debug {
    fn name(&self) -> &str;

    fn urgency(&self) -> Urgency;

    fn transition(&mut self, action: &IncidentAction) -> Transition;

    /// Options a presentation layer can offer; empty unless the state is a choice
    fn choices(&self) -> &[ChoiceOption] {
        &[]
    }

    /// Downcast hook for the battle bridge
    fn as_battle_mut(&mut self) -> Option<&mut BattleState> {
        None
    }
}

/// A page of text. Any action closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    name: String,
    body: String,
    urgency: Urgency,
}

impl TextState {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            urgency: Urgency::Deferrable,
        }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl OccurrenceState for TextState {
    fn name(&self) -> &str {
        &self.name
    }

    fn urgency(&self) -> Urgency {
        self.urgency
    }

    fn transition(&mut self, _action: &IncidentAction) -> Transition {
        Transition::End
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    /// Key of the state this option leads to; `None` ends the occurrence
    #[serde(default)]
    pub next: Option<String>,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, next: Option<&str>) -> Self {
        Self {
            label: label.into(),
            next: next.map(str::to_string),
        }
    }
}

/// A prompt with labelled options, each leading to a state key (or the end)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceState {
    name: String,
    prompt: String,
    urgency: Urgency,
    options: Vec<ChoiceOption>,
}

impl ChoiceState {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            urgency: Urgency::Deferrable,
            options: Vec::new(),
        }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn option(mut self, label: impl Into<String>, next: Option<&str>) -> Self {
        self.options.push(ChoiceOption::new(label, next));
        self
    }

    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }
}

impl OccurrenceState for ChoiceState {
    fn name(&self) -> &str {
        &self.name
    }

    fn urgency(&self) -> Urgency {
        self.urgency
    }

    fn transition(&mut self, action: &IncidentAction) -> Transition {
        let IncidentAction::Choose(label) = action else {
            return Transition::Ignore;
        };
        match self.options.iter().find(|o| &o.label == label) {
            Some(ChoiceOption {
                next: Some(key), ..
            }) => Transition::Goto(key.clone()),
            Some(_) => Transition::End,
            None => Transition::Ignore,
        }
    }

    fn choices(&self) -> &[ChoiceOption] {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_state_ends_on_any_action() {
        let mut state = TextState::new("Notice", "The harvest is in.");
        assert!(matches!(
            state.transition(&IncidentAction::Acknowledge),
            Transition::End
        ));
        assert!(matches!(
            state.transition(&IncidentAction::choose("whatever")),
            Transition::End
        ));
    }

    #[test]
    fn test_choice_routes_by_label() {
        let mut state = ChoiceState::new("Crossroads", "Which way?")
            .option("left", Some("forest"))
            .option("home", None);

        match state.transition(&IncidentAction::choose("left")) {
            Transition::Goto(key) => assert_eq!(key, "forest"),
            other => panic!("expected Goto, got {:?}", other),
        }
        assert!(matches!(
            state.transition(&IncidentAction::choose("home")),
            Transition::End
        ));
    }

    #[test]
    fn test_choice_ignores_unknown_label_and_other_actions() {
        let mut state = ChoiceState::new("Crossroads", "Which way?").option("left", None);
        assert!(matches!(
            state.transition(&IncidentAction::choose("right")),
            Transition::Ignore
        ));
        assert!(matches!(
            state.transition(&IncidentAction::Acknowledge),
            Transition::Ignore
        ));
    }

    #[test]
    fn test_default_urgency_is_deferrable() {
        assert_eq!(TextState::new("a", "b").urgency(), Urgency::Deferrable);
        assert_eq!(
            ChoiceState::new("a", "b")
                .with_urgency(Urgency::Immediate)
                .urgency(),
            Urgency::Immediate
        );
    }
}
