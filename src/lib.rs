//! Roster Skirmish - turn-based roster combat and weekly incidents

pub mod abilities;
pub mod combat;
pub mod core;
pub mod exploration;
pub mod incident;
pub mod roster;
pub mod stats;
