pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{GameDate, WeekClock};
pub use config::{CombatConfig, GameConfig, IncidentConfig};
pub use error::{Result, RosterError};
pub use types::{MemberId, OccurrenceId};
