//! Turn order
//!
//! Fastest acts first. Equal speeds are broken by a key drawn from the
//! resolver's generator, so the order is fixed for a given seed.

use crate::roster::Roster;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A combatant's position: which side, which roster index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub side: Side,
    pub index: usize,
}

impl Slot {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Standing combatants from both rosters, by descending battle Speed.
///
/// One tie-break key is drawn per standing combatant, side A first, in
/// roster order.
pub fn action_order<R: Rng + ?Sized>(side_a: &Roster, side_b: &Roster, rng: &mut R) -> Vec<Slot> {
    let mut entries: Vec<(u32, u32, Slot)> = [(Side::A, side_a), (Side::B, side_b)]
        .into_iter()
        .flat_map(|(side, roster)| roster.standing().map(move |i| (side, roster, i)))
        .map(|(side, roster, index)| {
            let speed = roster
                .member(index)
                .map(|c| c.battle_stats().speed)
                .unwrap_or(0);
            (speed, rng.gen::<u32>(), Slot::new(side, index))
        })
        .collect();

    entries.sort_by_key(|&(speed, key, _)| (Reverse(speed), key));
    entries.into_iter().map(|(_, _, slot)| slot).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Combatant;
    use crate::stats::{BaseStats, IndividualVariance, TrainingPoints};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn runner(speed: u32) -> Combatant {
        Combatant::new(
            BaseStats::new("Runner", 50, 50, 50, speed),
            IndividualVariance::default(),
            TrainingPoints::new(),
            50,
        )
    }

    #[test]
    fn test_faster_acts_first() {
        let a = Roster::with_members(vec![runner(10), runner(90)]).unwrap();
        let b = Roster::with_members(vec![runner(50)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let order = action_order(&a, &b, &mut rng);
        assert_eq!(
            order,
            vec![Slot::new(Side::A, 1), Slot::new(Side::B, 0), Slot::new(Side::A, 0)]
        );
    }

    #[test]
    fn test_defeated_excluded() {
        let mut a = Roster::with_members(vec![runner(10), runner(90)]).unwrap();
        a.member_mut(1).unwrap().take_damage(u32::MAX);
        let b = Roster::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(action_order(&a, &b, &mut rng), vec![Slot::new(Side::A, 0)]);
    }

    #[test]
    fn test_ties_are_seed_deterministic() {
        let a = Roster::with_members(vec![runner(50), runner(50), runner(50)]).unwrap();
        let b = Roster::with_members(vec![runner(50), runner(50), runner(50)]).unwrap();

        let first = action_order(&a, &b, &mut ChaCha8Rng::seed_from_u64(77));
        let second = action_order(&a, &b, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
