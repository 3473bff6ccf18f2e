//! Weekly chance roller
//!
//! Some incidents are not tied to a date but have a flat chance of showing
//! up each week. The roller keeps its own seeded generator so a campaign
//! replays identically from the same config.

use super::definition::IncidentDefinition;
use super::manager::IncidentManager;
use crate::core::calendar::GameDate;
use crate::core::config::IncidentConfig;
use crate::core::types::OccurrenceId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::rc::Rc;

#[derive(Debug)]
struct ChanceEntry {
    definition: Rc<dyn IncidentDefinition>,
    probability: f64,
}

#[derive(Debug)]
pub struct WeeklyChance {
    rng: ChaCha8Rng,
    entries: Vec<ChanceEntry>,
}

impl WeeklyChance {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            entries: Vec::new(),
        }
    }

    pub fn from_config(config: &IncidentConfig) -> Self {
        Self::seeded(config.chance_seed)
    }

    /// Probability is clamped to 0..=1; anything non-finite counts as 0
    pub fn add(&mut self, definition: Rc<dyn IncidentDefinition>, probability: f64) {
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.entries.push(ChanceEntry {
            definition,
            probability,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One draw per entry whose definition is not already active.
    /// Successful draws are registered directly with the manager.
    pub fn roll(&mut self, manager: &mut IncidentManager, date: GameDate) -> Vec<OccurrenceId> {
        let mut started = Vec::new();
        for entry in &self.entries {
            if manager.is_definition_active(entry.definition.id()) {
                continue;
            }
            if !self.rng.gen_bool(entry.probability) {
                continue;
            }
            tracing::debug!(definition = %entry.definition.id(), probability = entry.probability, "Chance incident rolled");
            if let Some(id) = manager.register_direct(Rc::clone(&entry.definition), None, date) {
                started.push(id);
            }
        }
        started
    }
}
