//! Incident system
//!
//! Definitions describe what can happen; the manager tracks what is
//! happening. Each live occurrence walks a small state machine driven by
//! player actions and, for battles, by the combat resolver.

pub mod battle;
pub mod catalog;
pub mod chance;
pub mod definition;
pub mod manager;
pub mod notice;
pub mod script;
pub mod state;

pub use battle::BattleState;
pub use catalog::IncidentCatalog;
pub use chance::WeeklyChance;
pub use definition::{BasicIncident, IconColor, IncidentDefinition};
pub use manager::{ActionOutcome, ActiveOccurrence, IncidentManager, TickReport};
pub use notice::IncidentNotice;
pub use script::{
    load_incidents_toml, parse_incidents_toml, ScriptedIncident, StateScript, TriggerRule,
};
pub use state::{
    ChoiceOption, ChoiceState, IncidentAction, OccurrenceState, TextState, Transition, Urgency,
};
