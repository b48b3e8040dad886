//! Level scaling formulas.
//!
//! All scaled values are rounded half-to-even.

use super::block::StatBlock;

/// Per-level multiplicative growth of each stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthRates {
    pub health: f64,
    pub mana: f64,
    pub attack: f64,
    pub defense: f64,
    pub accuracy: f64,
}

impl GrowthRates {
    /// No growth: every level has the level-1 stats.
    pub const fn flat() -> Self {
        Self {
            health: 1.0,
            mana: 1.0,
            attack: 1.0,
            defense: 1.0,
            accuracy: 1.0,
        }
    }

    /// Scale `base` to `level`.
    ///
    /// Accuracy is clamped to `[1, 100]` after scaling.
    pub fn apply(&self, base: &StatBlock, level: u32) -> StatBlock {
        let accuracy = scale_stat(base.accuracy, self.accuracy, level)
            .clamp(StatBlock::MIN_ACCURACY, StatBlock::MAX_ACCURACY);

        StatBlock {
            max_health: scale_stat(base.max_health, self.health, level),
            max_mana: scale_stat(base.max_mana, self.mana, level),
            attack: scale_stat(base.attack, self.attack, level),
            defense: scale_stat(base.defense, self.defense, level),
            accuracy,
        }
    }
}

impl Default for GrowthRates {
    fn default() -> Self {
        Self {
            health: 1.1,
            mana: 1.05,
            attack: 1.1,
            defense: 1.05,
            accuracy: 1.01,
        }
    }
}

/// `round(base × rate^(level − 1))`.
pub fn scale_stat(base: u32, rate: f64, level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    round_stat(f64::from(base) * rate.powi(exponent))
}

/// Round to the nearest integer (ties to even), saturating into `u32`.
pub fn round_stat(value: f64) -> u32 {
    let rounded = value.round_ties_even();
    if rounded <= 0.0 || rounded.is_nan() {
        0
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_keeps_base_stats() {
        let base = StatBlock::default();
        assert_eq!(GrowthRates::default().apply(&base, 1), base);
    }

    #[test]
    fn default_growth_at_level_three() {
        let stats = GrowthRates::default().apply(&StatBlock::default(), 3);
        // 100 × 1.1² = 121, 50 × 1.05² = 55.125, 10 × 1.1² = 12.1
        assert_eq!(stats.max_health, 121);
        assert_eq!(stats.max_mana, 55);
        assert_eq!(stats.attack, 12);
        // 5 × 1.05² = 5.5125, 95 × 1.01² = 96.9095
        assert_eq!(stats.defense, 6);
        assert_eq!(stats.accuracy, 97);
    }

    #[test]
    fn accuracy_is_clamped_to_hundred() {
        let mut growth = GrowthRates::flat();
        growth.accuracy = 1.5;
        let stats = growth.apply(&StatBlock::default(), 10);
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn accuracy_never_drops_below_one() {
        let mut growth = GrowthRates::flat();
        growth.accuracy = 0.5;
        let stats = growth.apply(&StatBlock::new(10, 0, 1, 1, 1), 20);
        assert_eq!(stats.accuracy, 1);
    }

    #[test]
    fn rounding_ties_to_even() {
        assert_eq!(round_stat(2.5), 2);
        assert_eq!(round_stat(3.5), 4);
        assert_eq!(round_stat(-4.0), 0);
    }
}
