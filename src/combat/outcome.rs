//! Battle status and outcome snapshots

use super::order::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattleStatus {
    #[default]
    InProgress,
    SideAWins,
    SideBWins,
}

impl BattleStatus {
    pub fn is_finished(self) -> bool {
        self != BattleStatus::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattleStatus::InProgress => None,
            BattleStatus::SideAWins => Some(Side::A),
            BattleStatus::SideBWins => Some(Side::B),
        }
    }

    pub fn won_by(side: Side) -> Self {
        match side {
            Side::A => BattleStatus::SideAWins,
            Side::B => BattleStatus::SideBWins,
        }
    }
}

/// Snapshot of a battle at some point in time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub status: BattleStatus,
    /// Current HP of each side-A member, roster order
    pub side_a_hp: Vec<u32>,
    /// Current HP of each side-B member, roster order
    pub side_b_hp: Vec<u32>,
    /// Rounds played so far
    pub rounds: u32,
    /// Decided by the turn limit rather than a knockout
    pub timed_out: bool,
}

impl CombatOutcome {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn side_a_won(&self) -> bool {
        self.status == BattleStatus::SideAWins
    }
}
