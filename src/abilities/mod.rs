//! Abilities: what a combatant can do on its turn
//!
//! Two kinds exist. Damaging abilities hit one enemy or all of them;
//! stat-modifying abilities shift one of the user's stats for the rest of
//! the battle. Both can carry an activation cost and a cooldown.

pub mod catalog;

pub use catalog::AbilityCatalog;

use crate::stats::StatKind;
use serde::{Deserialize, Serialize};

/// Elemental tag carried by damaging abilities
///
/// Purely descriptive for now: damage does not read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Wind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamagingAbility {
    pub power: u32,
    /// 1 = single target; anything higher hits every living enemy
    #[serde(default = "single_target")]
    pub targets: u32,
    /// Declared selection priority. The resolver currently picks the first
    /// ready ability in equip order and does not consult this.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub affinity: Affinity,
}

fn single_target() -> u32 {
    1
}

impl DamagingAbility {
    pub fn hits_all(&self) -> bool {
        self.targets > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatKind,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbilityKind {
    Damaging(DamagingAbility),
    StatModifying(StatModifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    /// Activation cost, carried as data for the roster layer
    #[serde(default)]
    pub cost: u32,
    /// Turns the ability stays locked after use
    ///
    /// The user's counter is set to this on use and ticks down by one at the
    /// start of each of its turns; the ability is ready again at zero.
    #[serde(default)]
    pub cooldown: u32,
    #[serde(flatten)]
    pub kind: AbilityKind,
}

impl Ability {
    /// Single-target damaging ability
    pub fn strike(id: impl Into<String>, name: impl Into<String>, power: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: 0,
            cooldown: 0,
            kind: AbilityKind::Damaging(DamagingAbility {
                power,
                targets: 1,
                priority: 0,
                affinity: Affinity::Neutral,
            }),
        }
    }

    /// Damaging ability that hits every living enemy
    pub fn sweep(id: impl Into<String>, name: impl Into<String>, power: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: 0,
            cooldown: 0,
            kind: AbilityKind::Damaging(DamagingAbility {
                power,
                targets: 3,
                priority: 0,
                affinity: Affinity::Neutral,
            }),
        }
    }

    /// Self-targeted stat shift
    pub fn modifier(
        id: impl Into<String>,
        name: impl Into<String>,
        stat: StatKind,
        delta: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: 0,
            cooldown: 0,
            kind: AbilityKind::StatModifying(StatModifier { stat, delta }),
        }
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        if let AbilityKind::Damaging(damaging) = &mut self.kind {
            damaging.affinity = affinity;
        }
        self
    }

    pub fn is_damaging(&self) -> bool {
        matches!(self.kind, AbilityKind::Damaging(_))
    }
}
