//! Ability catalog - every ability the game knows, keyed by id

use super::Ability;
use crate::core::error::{Result, RosterError};
use crate::stats::StatKind;
use ahash::AHashMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    abilities: AHashMap<String, Ability>,
}

/// TOML representation of an abilities file
#[derive(Debug, Deserialize)]
struct TomlAbilities {
    #[serde(default, rename = "ability")]
    abilities: Vec<Ability>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small built-in set used by tests and the headless driver
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for ability in [
            Ability::strike("strike", "Strike", 40),
            Ability::strike("heavy_blow", "Heavy Blow", 80).with_cooldown(2),
            Ability::sweep("sweep", "Sweep", 25),
            Ability::modifier("focus", "Focus", StatKind::Attack, 10),
            Ability::modifier("brace", "Brace", StatKind::Defense, 10),
        ] {
            catalog.insert(ability);
        }
        catalog
    }

    fn insert(&mut self, ability: Ability) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    /// Add an ability. Ids must be unique.
    pub fn add(&mut self, ability: Ability) -> Result<()> {
        if self.abilities.contains_key(&ability.id) {
            return Err(RosterError::DuplicateAbility(ability.id));
        }
        self.insert(ability);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Ability> {
        self.abilities.get(id)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Clone the named abilities, in the order given, for equipping
    pub fn loadout(&self, ids: &[&str]) -> Result<Vec<Ability>> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| RosterError::AbilityNotFound((*id).to_string()))
            })
            .collect()
    }

    /// Parse abilities from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlAbilities = toml::from_str(content)?;
        let mut catalog = Self::new();
        for ability in toml_data.abilities {
            catalog.add(ability)?;
        }
        Ok(catalog)
    }

    /// Load abilities from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}
