//! Lifecycle notices
//!
//! The manager queues one notice per lifecycle change, in the order the
//! changes happen. Presentation and exploration layers drain the queue.

use super::definition::IconColor;
use super::state::Urgency;
use crate::core::types::OccurrenceId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentNotice {
    Occurred {
        id: OccurrenceId,
        definition: Option<String>,
        urgency: Urgency,
        icon: IconColor,
    },
    /// The occurrence moved to a new state; refresh its icon
    Updated {
        id: OccurrenceId,
        state: String,
    },
    Resolved {
        id: OccurrenceId,
        definition: Option<String>,
    },
    /// Presentation closed; the occurrence is still active
    Dismissed {
        id: OccurrenceId,
    },
    Expired {
        id: OccurrenceId,
        definition: Option<String>,
    },
    /// The clock should stop until this is dealt with
    PauseRequested {
        id: OccurrenceId,
    },
}

impl IncidentNotice {
    pub fn occurrence(&self) -> OccurrenceId {
        match self {
            IncidentNotice::Occurred { id, .. }
            | IncidentNotice::Updated { id, .. }
            | IncidentNotice::Resolved { id, .. }
            | IncidentNotice::Dismissed { id }
            | IncidentNotice::Expired { id, .. }
            | IncidentNotice::PauseRequested { id } => *id,
        }
    }
}
