//! Rosters: the small teams that fight battles and staff incidents

pub mod combatant;

pub use combatant::{BattleModifiers, Combatant};

use crate::core::error::{Result, RosterError};
use serde::{Deserialize, Serialize};

/// Most combatants a roster can field
pub const MAX_ROSTER_SIZE: usize = 3;

/// An ordered team of up to `MAX_ROSTER_SIZE` combatants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: Vec<Combatant>) -> Result<Self> {
        if members.len() > MAX_ROSTER_SIZE {
            return Err(RosterError::RosterFull(MAX_ROSTER_SIZE));
        }
        Ok(Self { members })
    }

    pub fn add(&mut self, combatant: Combatant) -> Result<()> {
        if self.members.len() >= MAX_ROSTER_SIZE {
            return Err(RosterError::RosterFull(MAX_ROSTER_SIZE));
        }
        self.members.push(combatant);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index)
    }

    /// True when no one is left standing. An empty roster is defeated.
    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(Combatant::is_defeated)
    }

    /// Index of the first member still standing
    pub fn first_standing(&self) -> Option<usize> {
        self.members.iter().position(|c| !c.is_defeated())
    }

    /// Indices of every member still standing, in roster order
    pub fn standing(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_defeated())
            .map(|(i, _)| i)
    }

    pub fn reset_for_battle(&mut self) {
        self.members.iter_mut().for_each(Combatant::reset_for_battle);
    }

    /// Current HP of each member, in roster order
    pub fn hp_snapshot(&self) -> Vec<u32> {
        self.members.iter().map(Combatant::current_hp).collect()
    }
}
