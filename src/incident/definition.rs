//! Incident definitions
//!
//! A definition says when an incident happens and what its first state is.
//! Occurrences are the live instances; see `manager`.

use super::state::OccurrenceState;
use crate::core::calendar::GameDate;
use crate::exploration::AreaAssignments;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tray icon tint for an occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    #[default]
    White,
}

pub trait IncidentDefinition: fmt::Debug {
    /// Stable id; at most one occurrence per id is active at a time
    fn id(&self) -> &str;

    /// Mandatory occurrences never expire on their own
    fn is_mandatory(&self) -> bool;

    /// Weeks an occurrence may stay open before it expires
    fn time_limit(&self) -> Option<u32>;

    fn icon_color(&self) -> IconColor;

    /// Checked once per week tick while no occurrence of this id is active
    fn should_trigger(&self, date: GameDate) -> bool;

    fn initial_state(&self) -> Box<dyn OccurrenceState>;

    /// Named state lookup, used when a state transitions by key
    fn state(&self, _key: &str) -> Option<Box<dyn OccurrenceState>> {
        None
    }

    /// Runs when an occurrence of this definition is resolved
    fn on_resolved(&self, _areas: &mut dyn AreaAssignments) {}
}

type StateFactory = Box<dyn Fn() -> Box<dyn OccurrenceState>>;
type TriggerFn = Box<dyn Fn(GameDate) -> bool>;
type ResolveHook = Box<dyn Fn(&mut dyn AreaAssignments)>;

/// Definition assembled from closures
///
/// ```
/// use roster_skirmish::incident::{BasicIncident, TextState};
///
/// let festival = BasicIncident::new("festival", || {
///     Box::new(TextState::new("Festival", "The village celebrates."))
/// })
/// .trigger(|date| date.month == 6 && date.week == 1)
/// .with_time_limit(2);
/// ```
pub struct BasicIncident {
    id: String,
    mandatory: bool,
    time_limit: Option<u32>,
    icon_color: IconColor,
    trigger: TriggerFn,
    initial: StateFactory,
    states: AHashMap<String, StateFactory>,
    on_resolved: Option<ResolveHook>,
}

impl BasicIncident {
    /// Never triggers on its own until `trigger` is set
    pub fn new<F>(id: impl Into<String>, initial: F) -> Self
    where
        F: Fn() -> Box<dyn OccurrenceState> + 'static,
    {
        Self {
            id: id.into(),
            mandatory: false,
            time_limit: None,
            icon_color: IconColor::default(),
            trigger: Box::new(|_| false),
            initial: Box::new(initial),
            states: AHashMap::new(),
            on_resolved: None,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_time_limit(mut self, weeks: u32) -> Self {
        self.time_limit = Some(weeks);
        self
    }

    pub fn with_icon_color(mut self, color: IconColor) -> Self {
        self.icon_color = color;
        self
    }

    pub fn trigger<F>(mut self, predicate: F) -> Self
    where
        F: Fn(GameDate) -> bool + 'static,
    {
        self.trigger = Box::new(predicate);
        self
    }

    pub fn with_state<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn OccurrenceState> + 'static,
    {
        self.states.insert(key.into(), Box::new(factory));
        self
    }

    pub fn when_resolved<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn AreaAssignments) + 'static,
    {
        self.on_resolved = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for BasicIncident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicIncident")
            .field("id", &self.id)
            .field("mandatory", &self.mandatory)
            .field("time_limit", &self.time_limit)
            .field("icon_color", &self.icon_color)
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl IncidentDefinition for BasicIncident {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    fn time_limit(&self) -> Option<u32> {
        self.time_limit
    }

    fn icon_color(&self) -> IconColor {
        self.icon_color
    }

    fn should_trigger(&self, date: GameDate) -> bool {
        (self.trigger)(date)
    }

    fn initial_state(&self) -> Box<dyn OccurrenceState> {
        (self.initial)()
    }

    fn state(&self, key: &str) -> Option<Box<dyn OccurrenceState>> {
        self.states.get(key).map(|factory| factory())
    }

    fn on_resolved(&self, areas: &mut dyn AreaAssignments) {
        if let Some(hook) = &self.on_resolved {
            hook(areas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemberId;
    use crate::exploration::AreaRegistry;
    use crate::incident::state::TextState;

    fn notice() -> BasicIncident {
        BasicIncident::new("notice", || Box::new(TextState::new("Notice", "")))
    }

    #[test]
    fn test_defaults() {
        let def = notice();
        assert_eq!(def.id(), "notice");
        assert!(!def.is_mandatory());
        assert_eq!(def.time_limit(), None);
        assert_eq!(def.icon_color(), IconColor::White);
        assert!(!def.should_trigger(GameDate::start()));
        assert_eq!(def.initial_state().name(), "Notice");
    }

    #[test]
    fn test_builder_settings() {
        let def = notice()
            .mandatory()
            .with_time_limit(3)
            .with_icon_color(IconColor::Red)
            .trigger(|date| date.week == 2)
            .with_state("after", || Box::new(TextState::new("After", "")));

        assert!(def.is_mandatory());
        assert_eq!(def.time_limit(), Some(3));
        assert!(def.should_trigger(GameDate::new(1, 1, 2)));
        assert!(!def.should_trigger(GameDate::new(1, 1, 3)));
        assert_eq!(def.state("after").unwrap().name(), "After");
        assert!(def.state("missing").is_none());
    }

    #[test]
    fn test_resolution_hook_gets_areas() {
        let def = notice().when_resolved(|areas| {
            areas.release("mine");
        });
        let mut registry = AreaRegistry::new();
        registry.assign("mine", MemberId(1));

        def.on_resolved(&mut registry);
        assert!(registry.assigned("mine").is_empty());
    }
}
