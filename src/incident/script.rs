//! Scripted incidents - definitions loaded from TOML
//!
//! ```toml
//! [[incident]]
//! id = "merchant"
//! time_limit = 2
//! initial = "arrival"
//! trigger = { kind = "monthly", week = 2 }
//!
//! [incident.states.arrival]
//! kind = "choice"
//! name = "Merchant"
//! body = "A merchant waits at the gate."
//! options = [{ label = "Trade", next = "trade" }, { label = "Send away" }]
//!
//! [incident.states.trade]
//! kind = "text"
//! name = "Trade"
//! body = "Coins change hands."
//! ```

use super::definition::{IconColor, IncidentDefinition};
use super::state::{ChoiceOption, ChoiceState, OccurrenceState, TextState, Urgency};
use crate::core::calendar::GameDate;
use crate::core::error::{Result, RosterError};
use crate::exploration::AreaAssignments;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// When a scripted incident fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerRule {
    /// Only through direct registration
    #[default]
    Never,
    /// Every week it is not already active
    Always,
    OnDate { year: u32, month: u32, week: u32 },
    /// Same month and week of every year
    Yearly { month: u32, week: u32 },
    /// Same week of every month
    Monthly { week: u32 },
    /// Any week from this cumulative week on
    FromWeek { week: u32 },
}

impl TriggerRule {
    pub fn matches(&self, date: GameDate) -> bool {
        match *self {
            TriggerRule::Never => false,
            TriggerRule::Always => true,
            TriggerRule::OnDate { year, month, week } => {
                date == GameDate::new(year, month, week)
            }
            TriggerRule::Yearly { month, week } => date.month == month && date.week == week,
            TriggerRule::Monthly { week } => date.week == week,
            TriggerRule::FromWeek { week } => date.cumulative_week() >= week,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateScript {
    Text {
        name: String,
        #[serde(default)]
        urgency: Urgency,
        #[serde(default)]
        body: String,
    },
    Choice {
        name: String,
        #[serde(default)]
        urgency: Urgency,
        #[serde(default)]
        body: String,
        #[serde(default)]
        options: Vec<ChoiceOption>,
    },
}

impl StateScript {
    pub fn build(&self) -> Box<dyn OccurrenceState> {
        match self {
            StateScript::Text {
                name,
                urgency,
                body,
            } => Box::new(TextState::new(name.as_str(), body.as_str()).with_urgency(*urgency)),
            StateScript::Choice {
                name,
                urgency,
                body,
                options,
            } => Box::new(
                ChoiceState::new(name.as_str(), body.as_str())
                    .with_urgency(*urgency)
                    .with_options(options.clone()),
            ),
        }
    }

    fn options(&self) -> &[ChoiceOption] {
        match self {
            StateScript::Text { .. } => &[],
            StateScript::Choice { options, .. } => options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedIncident {
    pub id: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub icon_color: IconColor,
    #[serde(default)]
    pub trigger: TriggerRule,
    /// Key of the first state
    pub initial: String,
    pub states: BTreeMap<String, StateScript>,
    /// Exploration area emptied when an occurrence resolves
    #[serde(default)]
    pub release_area: Option<String>,
}

impl ScriptedIncident {
    /// Every state key the script refers to must exist
    pub fn validate(&self) -> Result<()> {
        if !self.states.contains_key(&self.initial) {
            return Err(RosterError::script(
                &self.id,
                format!("initial state '{}' is not defined", self.initial),
            ));
        }
        for (key, state) in &self.states {
            for option in state.options() {
                if let Some(next) = &option.next {
                    if !self.states.contains_key(next) {
                        return Err(RosterError::script(
                            &self.id,
                            format!(
                                "option '{}' in state '{}' points at unknown state '{}'",
                                option.label, key, next
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl IncidentDefinition for ScriptedIncident {
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
        self.trigger.matches(date)
    }

    fn initial_state(&self) -> Box<dyn OccurrenceState> {
        match self.states.get(&self.initial) {
            Some(script) => script.build(),
            None => {
                tracing::warn!(incident = %self.id, state = %self.initial, "Initial state missing; using blank text state");
                Box::new(TextState::new(self.initial.as_str(), ""))
            }
        }
    }

    fn state(&self, key: &str) -> Option<Box<dyn OccurrenceState>> {
        self.states.get(key).map(StateScript::build)
    }

    fn on_resolved(&self, areas: &mut dyn AreaAssignments) {
        if let Some(area) = &self.release_area {
            let freed = areas.release(area);
            tracing::info!(incident = %self.id, area = %area, freed = freed.len(), "Released exploration area");
        }
    }
}

/// TOML representation of an incidents file
#[derive(Debug, Deserialize)]
struct TomlIncidents {
    #[serde(default, rename = "incident")]
    incidents: Vec<ScriptedIncident>,
}

/// Parse and validate `[[incident]]` entries. Ids must be unique.
pub fn parse_incidents_toml(content: &str) -> Result<Vec<ScriptedIncident>> {
    let toml_data: TomlIncidents = toml::from_str(content)?;
    let mut seen = AHashSet::new();
    for incident in &toml_data.incidents {
        if !seen.insert(incident.id.clone()) {
            return Err(RosterError::script(&incident.id, "duplicate incident id"));
        }
        incident.validate()?;
    }
    Ok(toml_data.incidents)
}

pub fn load_incidents_toml(path: &Path) -> Result<Vec<ScriptedIncident>> {
    let content = std::fs::read_to_string(path)?;
    parse_incidents_toml(&content)
}
