//! Damage and healing magnitudes.

use crate::stats::round_stat;

/// Every landed hit removes at least this much health.
pub const MIN_DAMAGE: u32 = 1;

/// Health actually removed by a raw hit.
///
/// # Formula
///
/// ```text
/// reduced = max(1, raw - defense)
/// if defending:
///     reduced = ceil(reduced * defense_multiplier)
/// final = max(1, reduced)
/// ```
pub fn mitigate_damage(raw: u32, defense: u32, defense_multiplier: Option<f64>) -> u32 {
    let reduced = raw.saturating_sub(defense).max(MIN_DAMAGE);

    match defense_multiplier {
        Some(multiplier) => {
            let scaled = (f64::from(reduced) * multiplier.clamp(0.0, 1.0)).ceil();
            (scaled as u32).max(MIN_DAMAGE)
        }
        None => reduced,
    }
}

/// Damage of a landed damage skill before the target's own mitigation.
///
/// `round(max(1, base_power + attack - defense) × variance)`
pub fn skill_damage(base_power: u32, attack: u32, defense: u32, variance: f64) -> u32 {
    let raw = i64::from(base_power) + i64::from(attack) - i64::from(defense);
    let floored = raw.max(i64::from(MIN_DAMAGE));
    round_stat(floored as f64 * variance)
}

/// `round(damage × multiplier)`
pub fn apply_critical(damage: u32, multiplier: f64) -> u32 {
    round_stat(f64::from(damage) * multiplier)
}

/// `round((base_power + attack) × variance)`
pub fn skill_healing(base_power: u32, attack: u32, variance: f64) -> u32 {
    round_stat((f64::from(base_power) + f64::from(attack)) * variance)
}

/// Health restored by the basic heal action: `round(max_health × fraction)`.
pub fn basic_heal_amount(max_health: u32, fraction: f64) -> u32 {
    round_stat(f64::from(max_health) * fraction)
}
