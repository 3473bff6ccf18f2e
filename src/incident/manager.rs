//! Incident lifecycle manager
//!
//! Owns every active occurrence. Each week tick it asks the catalog what
//! should start and retires whatever has run out of time. Between ticks it
//! only reacts to calls: actions, dismissals, direct registrations.
//!
//! Occurrences are keyed by `OccurrenceId`, never by state: a transition
//! swaps the state inside the record and the id stays put.

use super::battle::BattleState;
use super::catalog::IncidentCatalog;
use super::definition::{IconColor, IncidentDefinition};
use super::notice::IncidentNotice;
use super::state::{IncidentAction, OccurrenceState, Transition, Urgency};
use crate::core::calendar::GameDate;
use crate::core::config::IncidentConfig;
use crate::core::types::OccurrenceId;
use crate::exploration::{AreaAssignments, AreaRegistry};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Bookkeeping for one live occurrence
#[derive(Debug)]
pub struct ActiveOccurrence {
    id: OccurrenceId,
    state: Box<dyn OccurrenceState>,
    definition: Option<Rc<dyn IncidentDefinition>>,
    start_week: u32,
    expiry_week: Option<u32>,
    dismissed: bool,
}

impl ActiveOccurrence {
    pub fn id(&self) -> OccurrenceId {
        self.id
    }

    pub fn state(&self) -> &dyn OccurrenceState {
        self.state.as_ref()
    }

    pub fn definition(&self) -> Option<&Rc<dyn IncidentDefinition>> {
        self.definition.as_ref()
    }

    pub fn definition_id(&self) -> Option<&str> {
        self.definition.as_ref().map(|d| d.id())
    }

    pub fn start_week(&self) -> u32 {
        self.start_week
    }

    pub fn expiry_week(&self) -> Option<u32> {
        self.expiry_week
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_mandatory(&self) -> bool {
        self.definition.as_ref().is_some_and(|d| d.is_mandatory())
    }

    pub fn urgency(&self) -> Urgency {
        self.state.urgency()
    }

    /// Past its expiry week and allowed to lapse
    fn has_lapsed(&self, week: u32) -> bool {
        !self.is_mandatory() && self.expiry_week.is_some_and(|expiry| week >= expiry)
    }
}

/// What a week tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub occurred: Vec<OccurrenceId>,
    pub expired: Vec<OccurrenceId>,
}

/// What an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The occurrence ended and was removed
    Resolved,
    /// The occurrence moved to a new state
    Updated,
    /// The state ignored the action
    Ignored,
    /// No such active occurrence
    Inactive,
}

pub struct IncidentManager {
    config: IncidentConfig,
    catalog: IncidentCatalog,
    active: BTreeMap<OccurrenceId, ActiveOccurrence>,
    next_id: u32,
    current_week: u32,
    notices: Vec<IncidentNotice>,
    areas: Box<dyn AreaAssignments>,
}

impl IncidentManager {
    pub fn new(config: IncidentConfig, areas: Box<dyn AreaAssignments>) -> Self {
        Self {
            config,
            catalog: IncidentCatalog::new(),
            active: BTreeMap::new(),
            next_id: 1,
            current_week: 0,
            notices: Vec::new(),
            areas,
        }
    }

    pub fn with_config(config: IncidentConfig) -> Self {
        Self::new(config, Box::new(AreaRegistry::new()))
    }

    // === CATALOG ===

    /// Returns false on a duplicate id
    pub fn register_definition(&mut self, definition: Rc<dyn IncidentDefinition>) -> bool {
        let id = definition.id().to_string();
        if !self.catalog.register(definition) {
            tracing::warn!(definition = %id, "Incident definition already registered");
            return false;
        }
        true
    }

    pub fn catalog(&self) -> &IncidentCatalog {
        &self.catalog
    }

    // === WEEKLY TICK ===

    /// Start whatever is due this week, then retire what has lapsed
    pub fn on_week_tick(&mut self, date: GameDate) -> TickReport {
        let week = date.cumulative_week();
        self.current_week = week;
        let mut report = TickReport::default();

        let due: Vec<Rc<dyn IncidentDefinition>> = self
            .catalog
            .iter()
            .filter(|d| !self.is_definition_active(d.id()))
            .filter(|d| d.should_trigger(date))
            .cloned()
            .collect();

        for definition in due {
            let state = definition.initial_state();
            if let Some(id) = self.register(state, week, Some(definition)) {
                report.occurred.push(id);
            }
        }

        let lapsed: Vec<OccurrenceId> = self
            .active
            .values()
            .filter(|record| record.has_lapsed(week))
            .map(|record| record.id)
            .collect();

        for id in lapsed {
            if let Some(record) = self.active.remove(&id) {
                tracing::info!(occurrence = %id, definition = ?record.definition_id(), week, "Incident expired");
                self.notices.push(IncidentNotice::Expired {
                    id,
                    definition: record.definition_id().map(str::to_string),
                });
                report.expired.push(id);
            }
        }

        report
    }

    // === REGISTRATION ===

    /// Start an occurrence outside the weekly predicate path.
    /// Without an explicit state the definition's initial state is used.
    pub fn register_direct(
        &mut self,
        definition: Rc<dyn IncidentDefinition>,
        initial: Option<Box<dyn OccurrenceState>>,
        date: GameDate,
    ) -> Option<OccurrenceId> {
        if self.is_definition_active(definition.id()) {
            tracing::warn!(definition = %definition.id(), "Incident already active; direct trigger ignored");
            return None;
        }
        let state = initial.unwrap_or_else(|| definition.initial_state());
        self.register(state, date.cumulative_week(), Some(definition))
    }

    /// Track a new occurrence. Rejected if its definition already has one.
    pub fn register(
        &mut self,
        state: Box<dyn OccurrenceState>,
        start_week: u32,
        definition: Option<Rc<dyn IncidentDefinition>>,
    ) -> Option<OccurrenceId> {
        if let Some(def) = &definition {
            if self.is_definition_active(def.id()) {
                tracing::warn!(definition = %def.id(), "Incident already active; registration ignored");
                return None;
            }
        }

        let id = OccurrenceId(self.next_id);
        self.next_id += 1;

        let expiry_week = definition
            .as_ref()
            .and_then(|d| d.time_limit())
            .map(|limit| start_week.saturating_add(limit));
        let mandatory = definition.as_ref().is_some_and(|d| d.is_mandatory());
        let urgency = state.urgency();
        let icon = definition
            .as_ref()
            .map(|d| d.icon_color())
            .unwrap_or(IconColor::White);
        let definition_id = definition.as_ref().map(|d| d.id().to_string());

        tracing::info!(occurrence = %id, definition = ?definition_id, state = state.name(), start_week, ?expiry_week, "Incident occurred");

        self.active.insert(
            id,
            ActiveOccurrence {
                id,
                state,
                definition,
                start_week,
                expiry_week,
                dismissed: false,
            },
        );
        self.notices.push(IncidentNotice::Occurred {
            id,
            definition: definition_id,
            urgency,
            icon,
        });

        let any_immediate = self
            .active
            .values()
            .any(|record| record.urgency() == Urgency::Immediate);
        if (mandatory && self.config.pause_on_mandatory) || any_immediate {
            self.notices.push(IncidentNotice::PauseRequested { id });
        }

        Some(id)
    }

    // === ACTIONS ===

    pub fn apply_action(&mut self, id: OccurrenceId, action: IncidentAction) -> ActionOutcome {
        let Some(record) = self.active.get_mut(&id) else {
            tracing::warn!(occurrence = %id, ?action, "Action on inactive occurrence ignored");
            return ActionOutcome::Inactive;
        };

        match record.state.transition(&action) {
            Transition::End => {
                self.finish(id);
                ActionOutcome::Resolved
            }
            Transition::Next(state) => self.swap_state(id, state),
            Transition::Goto(key) => {
                let next = record.definition.as_ref().and_then(|d| d.state(&key));
                match next {
                    Some(state) => self.swap_state(id, state),
                    None => {
                        tracing::warn!(occurrence = %id, state = %key, "Unknown state key; resolving occurrence");
                        self.finish(id);
                        ActionOutcome::Resolved
                    }
                }
            }
            Transition::Ignore => {
                tracing::debug!(occurrence = %id, ?action, "Action ignored by state");
                ActionOutcome::Ignored
            }
        }
    }

    /// Resolve without going through an action. Returns false if inactive.
    pub fn resolve(&mut self, id: OccurrenceId) -> bool {
        if !self.active.contains_key(&id) {
            tracing::warn!(occurrence = %id, "Resolve on inactive occurrence ignored");
            return false;
        }
        self.finish(id);
        true
    }

    /// Close the presentation but keep the occurrence open (postpone)
    pub fn dismiss(&mut self, id: OccurrenceId) -> bool {
        let Some(record) = self.active.get_mut(&id) else {
            tracing::warn!(occurrence = %id, "Dismiss on inactive occurrence ignored");
            return false;
        };
        record.dismissed = true;
        self.notices.push(IncidentNotice::Dismissed { id });
        true
    }

    /// Advance a battle occurrence by one round. Starts the fight if nobody
    /// has yet. Once the battle is decided its result is applied as an
    /// action and that outcome is returned; `None` while still fighting.
    pub fn step_battle(&mut self, id: OccurrenceId) -> Option<ActionOutcome> {
        let Some(battle) = self.battle_mut(id) else {
            tracing::warn!(occurrence = %id, "step_battle on a non-battle occurrence");
            return None;
        };
        if !battle.is_started() {
            battle.start(|_| {});
        }
        let action = battle.step()?;
        Some(self.apply_action(id, action))
    }

    fn swap_state(&mut self, id: OccurrenceId, state: Box<dyn OccurrenceState>) -> ActionOutcome {
        let Some(record) = self.active.get_mut(&id) else {
            return ActionOutcome::Inactive;
        };
        let name = state.name().to_string();
        tracing::debug!(occurrence = %id, from = record.state.name(), to = %name, "Incident state changed");
        record.state = state;
        record.dismissed = false;
        self.notices.push(IncidentNotice::Updated { id, state: name });
        ActionOutcome::Updated
    }

    /// Hook, then removal, then the notice
    fn finish(&mut self, id: OccurrenceId) {
        let definition = self.active.get(&id).and_then(|r| r.definition.clone());
        if let Some(def) = &definition {
            def.on_resolved(self.areas.as_mut());
        }
        if self.active.remove(&id).is_some() {
            tracing::info!(occurrence = %id, definition = ?definition.as_ref().map(|d| d.id()), "Incident resolved");
            self.notices.push(IncidentNotice::Resolved {
                id,
                definition: definition.map(|d| d.id().to_string()),
            });
        }
    }

    // === QUERIES ===

    pub fn is_active(&self, id: OccurrenceId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn is_definition_active(&self, definition_id: &str) -> bool {
        self.active_for(definition_id).is_some()
    }

    /// The live occurrence of a definition, if any
    pub fn active_for(&self, definition_id: &str) -> Option<OccurrenceId> {
        self.active
            .values()
            .find(|record| record.definition_id() == Some(definition_id))
            .map(|record| record.id)
    }

    pub fn occurrence(&self, id: OccurrenceId) -> Option<&ActiveOccurrence> {
        self.active.get(&id)
    }

    /// Active occurrences in creation order
    pub fn occurrences(&self) -> impl Iterator<Item = &ActiveOccurrence> {
        self.active.values()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn battle_mut(&mut self, id: OccurrenceId) -> Option<&mut BattleState> {
        self.active.get_mut(&id)?.state.as_battle_mut()
    }

    /// Cumulative week of the last tick
    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    /// Something active should be holding the clock
    pub fn wants_pause(&self) -> bool {
        self.active.values().any(|record| {
            record.urgency() == Urgency::Immediate
                || (record.is_mandatory() && self.config.pause_on_mandatory)
        })
    }

    /// Take every notice queued since the last drain, oldest first
    pub fn drain_notices(&mut self) -> Vec<IncidentNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn areas(&self) -> &dyn AreaAssignments {
        self.areas.as_ref()
    }

    pub fn areas_mut(&mut self) -> &mut dyn AreaAssignments {
        self.areas.as_mut()
    }
}

impl Default for IncidentManager {
    fn default() -> Self {
        Self::with_config(IncidentConfig::default())
    }
}

impl fmt::Debug for IncidentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncidentManager")
            .field("catalog", &self.catalog.len())
            .field("active", &self.active.len())
            .field("current_week", &self.current_week)
            .field("pending_notices", &self.notices.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemberId;
    use crate::incident::definition::BasicIncident;
    use crate::incident::state::{ChoiceState, TextState};

    fn text(name: &str) -> Box<dyn OccurrenceState> {
        Box::new(TextState::new(name, ""))
    }

    fn at_week(week: u32) -> GameDate {
        GameDate::from_cumulative_week(week)
    }

    fn definition(id: &'static str) -> BasicIncident {
        BasicIncident::new(id, move || text(id))
    }

    #[test]
    fn test_predicate_starts_occurrence_once() {
        let mut manager = IncidentManager::default();
        manager.register_definition(Rc::new(definition("harvest").trigger(|_| true)));

        let first = manager.on_week_tick(at_week(0));
        assert_eq!(first.occurred.len(), 1);
        let second = manager.on_week_tick(at_week(1));
        assert!(second.occurred.is_empty());
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut manager = IncidentManager::default();
        assert!(manager.register_definition(Rc::new(definition("a"))));
        assert!(!manager.register_definition(Rc::new(definition("a"))));
        assert_eq!(manager.catalog().len(), 1);
    }

    #[test]
    fn test_same_definition_registered_twice_in_one_tick() {
        let mut manager = IncidentManager::default();
        let def: Rc<dyn IncidentDefinition> = Rc::new(definition("raid"));

        let first = manager.register_direct(Rc::clone(&def), None, at_week(3));
        let second = manager.register_direct(Rc::clone(&def), None, at_week(3));
        let third = manager.register(text("raid"), 3, Some(def));
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(third.is_none());
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_expiry_fires_exactly_at_limit() {
        let mut manager = IncidentManager::default();
        let def: Rc<dyn IncidentDefinition> = Rc::new(definition("trader").with_time_limit(2));
        let id = manager.register_direct(def, None, at_week(10)).unwrap();
        assert_eq!(manager.occurrence(id).unwrap().expiry_week(), Some(12));

        assert!(manager.on_week_tick(at_week(11)).expired.is_empty());
        assert!(manager.is_active(id));

        let report = manager.on_week_tick(at_week(12));
        assert_eq!(report.expired, vec![id]);
        assert!(!manager.is_active(id));
        assert!(manager
            .drain_notices()
            .contains(&IncidentNotice::Expired {
                id,
                definition: Some("trader".into())
            }));
    }

    #[test]
    fn test_mandatory_never_expires() {
        let mut manager = IncidentManager::default();
        let def: Rc<dyn IncidentDefinition> =
            Rc::new(definition("tax").mandatory().with_time_limit(1));
        let id = manager.register_direct(def, None, at_week(0)).unwrap();

        for week in 1..200 {
            assert!(manager.on_week_tick(at_week(week)).expired.is_empty());
        }
        assert!(manager.is_active(id));
    }

    #[test]
    fn test_no_time_limit_never_expires() {
        let mut manager = IncidentManager::default();
        let id = manager
            .register_direct(Rc::new(definition("rumor")), None, at_week(0))
            .unwrap();
        manager.on_week_tick(at_week(500));
        assert!(manager.is_active(id));
    }

    #[test]
    fn test_end_transition_resolves_once() {
        let mut manager = IncidentManager::default();
        let id = manager
            .register_direct(Rc::new(definition("letter")), None, at_week(0))
            .unwrap();
        manager.drain_notices();

        assert_eq!(
            manager.apply_action(id, IncidentAction::Acknowledge),
            ActionOutcome::Resolved
        );
        assert!(!manager.is_active(id));
        assert_eq!(
            manager.apply_action(id, IncidentAction::Acknowledge),
            ActionOutcome::Inactive
        );

        let resolved = manager
            .drain_notices()
            .into_iter()
            .filter(|n| matches!(n, IncidentNotice::Resolved { .. }))
            .count();
        assert_eq!(resolved, 1);
    }

    #[test]
    fn test_goto_swaps_state_and_keeps_id() {
        let mut manager = IncidentManager::default();
        let def = BasicIncident::new("fork", || {
            Box::new(
                ChoiceState::new("Fork", "Which way?")
                    .option("left", Some("forest"))
                    .option("right", Some("nowhere")),
            )
        })
        .with_state("forest", || text("Forest"))
        .with_time_limit(5);
        let id = manager
            .register_direct(Rc::new(def), None, at_week(4))
            .unwrap();
        manager.dismiss(id);
        manager.drain_notices();

        assert_eq!(
            manager.apply_action(id, IncidentAction::choose("left")),
            ActionOutcome::Updated
        );
        let record = manager.occurrence(id).unwrap();
        assert_eq!(record.state().name(), "Forest");
        assert_eq!(record.start_week(), 4);
        assert_eq!(record.expiry_week(), Some(9));
        assert!(!record.is_dismissed());
        assert_eq!(
            manager.drain_notices(),
            vec![IncidentNotice::Updated {
                id,
                state: "Forest".into()
            }]
        );
    }

    #[test]
    fn test_goto_unknown_key_resolves() {
        let mut manager = IncidentManager::default();
        let def = BasicIncident::new("fork", || {
            Box::new(ChoiceState::new("Fork", "?").option("right", Some("nowhere")))
        });
        let id = manager
            .register_direct(Rc::new(def), None, at_week(0))
            .unwrap();
        assert_eq!(
            manager.apply_action(id, IncidentAction::choose("right")),
            ActionOutcome::Resolved
        );
    }

    #[test]
    fn test_ignored_action_changes_nothing() {
        let mut manager = IncidentManager::default();
        let def = BasicIncident::new("fork", || {
            Box::new(ChoiceState::new("Fork", "?").option("left", None))
        });
        let id = manager
            .register_direct(Rc::new(def), None, at_week(0))
            .unwrap();
        manager.drain_notices();

        assert_eq!(
            manager.apply_action(id, IncidentAction::Acknowledge),
            ActionOutcome::Ignored
        );
        assert!(manager.is_active(id));
        assert!(manager.drain_notices().is_empty());
    }

    #[test]
    fn test_dismiss_keeps_occurrence_active() {
        let mut manager = IncidentManager::default();
        let id = manager
            .register_direct(Rc::new(definition("mail")), None, at_week(0))
            .unwrap();
        assert!(manager.dismiss(id));
        assert!(manager.is_active(id));
        assert!(manager.occurrence(id).unwrap().is_dismissed());
        assert!(!manager.dismiss(OccurrenceId(999)));
    }

    #[test]
    fn test_explicit_resolve_runs_hook() {
        let mut manager = IncidentManager::default();
        manager.areas_mut().assign("mine", MemberId(7));
        let def = definition("cave_in").when_resolved(|areas| {
            areas.release("mine");
        });
        let id = manager
            .register_direct(Rc::new(def), None, at_week(0))
            .unwrap();

        assert!(manager.resolve(id));
        assert!(manager.areas().assigned("mine").is_empty());
        assert!(!manager.resolve(id));
    }

    #[test]
    fn test_pause_requested_for_mandatory_and_immediate() {
        let mut manager = IncidentManager::default();
        let calm = manager
            .register_direct(Rc::new(definition("calm")), None, at_week(0))
            .unwrap();
        let urgent = manager
            .register_direct(
                Rc::new(BasicIncident::new("urgent", || {
                    Box::new(TextState::new("Fire!", "").with_urgency(Urgency::Immediate))
                })),
                None,
                at_week(0),
            )
            .unwrap();
        let duty = manager
            .register_direct(Rc::new(definition("duty").mandatory()), None, at_week(0))
            .unwrap();

        let pauses: Vec<OccurrenceId> = manager
            .drain_notices()
            .into_iter()
            .filter_map(|n| match n {
                IncidentNotice::PauseRequested { id } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(pauses, vec![urgent, duty]);
        assert!(!pauses.contains(&calm));
        assert!(manager.wants_pause());
    }

    #[test]
    fn test_notices_in_call_order() {
        let mut manager = IncidentManager::default();
        let id = manager
            .register_direct(Rc::new(definition("note")), None, at_week(0))
            .unwrap();
        manager.dismiss(id);
        manager.apply_action(id, IncidentAction::Acknowledge);

        let kinds: Vec<&str> = manager
            .drain_notices()
            .iter()
            .map(|n| match n {
                IncidentNotice::Occurred { .. } => "occurred",
                IncidentNotice::Dismissed { .. } => "dismissed",
                IncidentNotice::Resolved { .. } => "resolved",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["occurred", "dismissed", "resolved"]);
    }

    #[test]
    fn test_unbounded_time_limit_never_lapses() {
        let mut manager = IncidentManager::default();
        manager.register_definition(Rc::new(
            definition("siege").trigger(|_| true).with_time_limit(u32::MAX),
        ));

        let report = manager.on_week_tick(at_week(1));
        assert_eq!(report.occurred.len(), 1);
        let id = report.occurred[0];
        assert_eq!(manager.occurrence(id).unwrap().expiry_week(), Some(u32::MAX));

        let later = manager.on_week_tick(at_week(5_000));
        assert!(later.expired.is_empty());
        assert!(manager.is_active(id));
    }

    #[test]
    fn test_definitionless_occurrence() {
        let mut manager = IncidentManager::default();
        let a = manager.register(text("loose"), 0, None).unwrap();
        let b = manager.register(text("loose"), 0, None).unwrap();
        assert_ne!(a, b);
        assert_eq!(manager.occurrence(a).unwrap().definition_id(), None);
        manager.on_week_tick(at_week(100));
        assert_eq!(manager.active_count(), 2);
    }
}
