//! Stat model
//!
//! Effective stats are always derived from four inputs: the species
//! template, individual variance, training points and level. Nothing here
//! caches a derived value.

pub mod base;
pub mod derived;
pub mod level;
pub mod training;
pub mod variance;

pub use base::BaseStats;
pub use derived::{derive_stats, DerivedStats};
pub use level::LevelProgress;
pub use training::TrainingPoints;
pub use variance::IndividualVariance;

use serde::{Deserialize, Serialize};

/// One of the four combat stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::Speed,
    ];
}
