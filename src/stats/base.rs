//! Species templates

use super::StatKind;
use serde::{Deserialize, Serialize};

/// Base stats shared by every individual of a kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn new(name: impl Into<String>, hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            attack,
            defense,
            speed,
        }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}
