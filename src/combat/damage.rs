//! Damage formula

/// Every hit lands for at least this much
pub const MIN_DAMAGE: u32 = 1;

/// `max(1, attack + power - defense)`
pub fn compute_damage(attack: u32, power: u32, defense: u32) -> u32 {
    let raw = i64::from(attack) + i64::from(power) - i64::from(defense);
    raw.clamp(i64::from(MIN_DAMAGE), i64::from(u32::MAX)) as u32
}
