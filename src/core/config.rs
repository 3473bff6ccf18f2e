//! Game configuration with documented constants
//!
//! Every tunable number the core reads lives here. Configs are plain values
//! passed to the systems that need them; there is no global instance.

use crate::core::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat: CombatConfig,
    pub incidents: IncidentConfig,
}

/// Combat resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Rounds a battle may run before it is forced to a result
    ///
    /// When the budget runs out with both sides standing, side A loses.
    pub turn_limit: u32,

    /// Seed for the turn-order tie-break generator
    ///
    /// Same seed + same rosters = same battle, round for round.
    pub seed: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            turn_limit: 10,
            seed: 0x5EED,
        }
    }
}

/// Incident lifecycle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentConfig {
    /// Seed for the weekly chance roller
    pub chance_seed: u64,

    /// Ask for a pause whenever a mandatory incident occurs
    ///
    /// Immediate-urgency occurrences always request a pause.
    pub pause_on_mandatory: bool,
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            chance_seed: 42,
            pause_on_mandatory: true,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML string. Missing fields take defaults.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.combat.turn_limit == 0 {
            return Err(RosterError::InvalidConfig(
                "combat.turn_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
