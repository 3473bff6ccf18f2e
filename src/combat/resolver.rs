//! Combat resolver
//!
//! Drives a battle between two rosters one round per `step()`. The caller
//! owns the loop; the resolver never blocks and never fails.
//!
//! Policies are deliberately simple: each combatant uses its first ready
//! ability in equip order against the first standing enemy.

use super::damage::compute_damage;
use super::events::CombatEvent;
use super::order::{action_order, Side, Slot};
use super::outcome::{BattleStatus, CombatOutcome};
use crate::abilities::AbilityKind;
use crate::core::config::CombatConfig;
use crate::roster::Roster;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct CombatResolver<R = ChaCha8Rng> {
    rng: R,
    turn_limit: u32,
    side_a: Roster,
    side_b: Roster,
    order: Vec<Slot>,
    round: u32,
    status: BattleStatus,
    timed_out: bool,
    initialized: bool,
    events: Vec<CombatEvent>,
}

impl CombatResolver<ChaCha8Rng> {
    /// Resolver seeded from config
    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(config.seed), config.turn_limit)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_config(&CombatConfig {
            seed,
            ..CombatConfig::default()
        })
    }
}

impl<R: Rng> CombatResolver<R> {
    /// A zero `turn_limit` is raised to 1
    pub fn new(rng: R, turn_limit: u32) -> Self {
        Self {
            rng,
            turn_limit: turn_limit.max(1),
            side_a: Roster::new(),
            side_b: Roster::new(),
            order: Vec::new(),
            round: 0,
            status: BattleStatus::InProgress,
            timed_out: false,
            initialized: false,
            events: Vec::new(),
        }
    }

    /// Take both rosters, reset them for battle and compute the opening order.
    /// An empty (or already beaten) side loses on the spot.
    pub fn initialize(&mut self, side_a: Roster, side_b: Roster) {
        self.side_a = side_a;
        self.side_b = side_b;
        self.side_a.reset_for_battle();
        self.side_b.reset_for_battle();
        self.round = 0;
        self.status = BattleStatus::InProgress;
        self.timed_out = false;
        self.initialized = true;
        self.events.clear();

        self.check_termination();
        self.order = action_order(&self.side_a, &self.side_b, &mut self.rng);

        tracing::debug!(
            side_a = self.side_a.len(),
            side_b = self.side_b.len(),
            status = ?self.status,
            "Battle initialized"
        );
    }

    /// Play one round. No-op once the battle is decided.
    pub fn step(&mut self) {
        if !self.initialized {
            tracing::warn!("step() called before initialize(); ignoring");
            return;
        }
        if self.status.is_finished() {
            return;
        }

        self.round += 1;
        self.events.push(CombatEvent::RoundStarted { round: self.round });
        self.order = action_order(&self.side_a, &self.side_b, &mut self.rng);

        for slot in self.order.clone() {
            if self.status.is_finished() {
                break;
            }
            self.take_turn(slot);
            self.check_termination();
        }

        if !self.status.is_finished() && self.round >= self.turn_limit {
            // Out of time: side A loses, not a draw
            self.status = BattleStatus::SideBWins;
            self.timed_out = true;
            self.events.push(CombatEvent::BattleEnded {
                status: self.status,
                timed_out: true,
            });
            tracing::debug!(round = self.round, "Turn limit reached, side A forfeits");
        }
    }

    /// Step until decided. Bounded by the turn limit.
    pub fn run_to_completion(&mut self) -> CombatOutcome {
        while self.initialized && !self.status.is_finished() {
            self.step();
        }
        self.outcome()
    }

    fn take_turn(&mut self, slot: Slot) {
        let Some(actor) = self.roster_mut(slot.side).member_mut(slot.index) else {
            return;
        };
        if actor.is_defeated() {
            return;
        }

        actor.tick_cooldowns();
        let Some(ability_slot) = actor.ready_ability() else {
            self.events.push(CombatEvent::NoAbilityReady { actor: slot });
            return;
        };
        let Some(ability) = actor.ability(ability_slot).cloned() else {
            return;
        };
        let attack = actor.battle_stats().attack;

        let opponent = slot.side.opponent();
        let Some(target_index) = self.roster(opponent).first_standing() else {
            return;
        };
        let target = Slot::new(opponent, target_index);

        if let Some(actor) = self.roster_mut(slot.side).member_mut(slot.index) {
            actor.set_cooldown(ability_slot, ability.cooldown);
        }
        self.events.push(CombatEvent::AbilityUsed {
            actor: slot,
            ability: ability.id.clone(),
            target,
        });
        tracing::debug!(round = self.round, ?slot, ability = %ability.id, ?target, "Ability used");

        match ability.kind {
            AbilityKind::Damaging(damaging) => {
                let mut targets = vec![target_index];
                if damaging.hits_all() {
                    targets.extend(
                        self.roster(opponent)
                            .standing()
                            .filter(|&i| i != target_index),
                    );
                }
                for index in targets {
                    self.strike(slot, Slot::new(opponent, index), attack, damaging.power);
                }
            }
            AbilityKind::StatModifying(modifier) => {
                if let Some(actor) = self.roster_mut(slot.side).member_mut(slot.index) {
                    actor.apply_modifier(modifier);
                }
                self.events.push(CombatEvent::StatModified {
                    actor: slot,
                    stat: modifier.stat,
                    delta: modifier.delta,
                });
            }
        }
    }

    /// Damage computed per target against that target's own Defense
    fn strike(&mut self, attacker: Slot, target: Slot, attack: u32, power: u32) {
        let Some(defender) = self.roster_mut(target.side).member_mut(target.index) else {
            return;
        };
        let amount = compute_damage(attack, power, defender.battle_stats().defense);
        defender.take_damage(amount);
        let remaining_hp = defender.current_hp();

        self.events.push(CombatEvent::DamageDealt {
            attacker,
            target,
            amount,
            remaining_hp,
        });
        if remaining_hp == 0 {
            self.events.push(CombatEvent::CombatantDefeated { slot: target });
        }
    }

    fn check_termination(&mut self) {
        if self.status.is_finished() {
            return;
        }
        let status = if self.side_a.is_defeated() {
            BattleStatus::won_by(Side::B)
        } else if self.side_b.is_defeated() {
            BattleStatus::won_by(Side::A)
        } else {
            return;
        };
        self.status = status;
        self.events.push(CombatEvent::BattleEnded {
            status,
            timed_out: false,
        });
        tracing::debug!(round = self.round, ?status, "Battle decided");
    }

    pub fn outcome(&self) -> CombatOutcome {
        CombatOutcome {
            status: self.status,
            side_a_hp: self.side_a.hp_snapshot(),
            side_b_hp: self.side_b.hp_snapshot(),
            rounds: self.round,
            timed_out: self.timed_out,
        }
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Order used for the current (or opening) round
    pub fn action_order(&self) -> &[Slot] {
        &self.order
    }

    pub fn current_round(&self) -> u32 {
        self.round
    }

    pub fn turn_limit(&self) -> u32 {
        self.turn_limit
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }

    /// Take every narration record queued since the last drain
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand the rosters back, battle damage included
    pub fn into_rosters(self) -> (Roster, Roster) {
        (self.side_a, self.side_b)
    }
}
