//! Narration log
//!
//! The resolver appends one record per thing that happened, in order. The
//! commentary layer drains them after each step.

use super::order::Slot;
use super::outcome::BattleStatus;
use crate::stats::StatKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    AbilityUsed {
        actor: Slot,
        ability: String,
        target: Slot,
    },
    DamageDealt {
        attacker: Slot,
        target: Slot,
        amount: u32,
        remaining_hp: u32,
    },
    StatModified {
        actor: Slot,
        stat: StatKind,
        delta: i32,
    },
    /// Every equipped ability was cooling down (or none equipped)
    NoAbilityReady {
        actor: Slot,
    },
    CombatantDefeated {
        slot: Slot,
    },
    BattleEnded {
        status: BattleStatus,
        timed_out: bool,
    },
}
