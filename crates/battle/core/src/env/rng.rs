//! RNG oracle for deterministic random number generation.
//!
//! All randomness in a battle (accuracy checks, damage variance, critical
//! rolls) flows through [`Dice`], which derives a fresh seed for every roll
//! from the battle seed and a roll counter. Given the same seed and the same
//! sequence of inputs, a battle always resolves identically.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::config::VarianceRange;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a uniform integer in `[0, 100)`.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Generate a uniform float in `[0, 1)`.
    fn unit_interval(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }
}

impl<T: RngOracle + ?Sized> RngOracle for Box<T> {
    fn next_u32(&self, seed: u64) -> u32 {
        (**self).next_u32(seed)
    }

    fn roll_percent(&self, seed: u64) -> u32 {
        (**self).roll_percent(seed)
    }

    fn unit_interval(&self, seed: u64) -> f64 {
        (**self).unit_interval(seed)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Oracle that returns the same raw value for every roll.
///
/// `FixedRng(FixedRng::MIDPOINT)` yields a percent roll of 48 and a unit roll of
/// exactly 0.5, which makes variance collapse to the middle of its range.
#[derive(Clone, Copy, Debug)]
pub struct FixedRng(pub u32);

impl FixedRng {
    pub const MIDPOINT: u32 = 1 << 31;
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Oracle that replays a scripted list of raw values, repeating the last one
/// once the script is exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    values: Mutex<VecDeque<u32>>,
    last: u32,
}

impl SequenceRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let values: VecDeque<u32> = values.into_iter().collect();
        let last = values.back().copied().unwrap_or(0);
        Self {
            values: Mutex::new(values),
            last,
        }
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        match self.values.lock() {
            Ok(mut values) => values.pop_front().unwrap_or(self.last),
            Err(poisoned) => poisoned.into_inner().pop_front().unwrap_or(self.last),
        }
    }
}

/// Which roll of a resolution a seed is derived for.
///
/// Distinct contexts keep rolls made within the same resolution independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollKind {
    Accuracy = 0,
    Variance = 1,
    Critical = 2,
}

/// Compute deterministic seed from battle components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed set at battle creation (for replay/determinism)
/// * `nonce` - Roll sequence number (increments each roll)
/// * `context` - Which roll within a resolution this seed feeds
pub fn compute_seed(battle_seed: u64, nonce: u64, context: RollKind) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Stateful roller handed to skill resolution.
pub struct Dice {
    oracle: Box<dyn RngOracle>,
    seed: u64,
    nonce: u64,
}

impl Dice {
    /// Creates dice backed by [`PcgRng`].
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(seed, PcgRng)
    }

    pub fn with_oracle(seed: u64, oracle: impl RngOracle + 'static) -> Self {
        Self {
            oracle: Box::new(oracle),
            seed,
            nonce: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls made so far.
    pub fn rolls(&self) -> u64 {
        self.nonce
    }

    /// Uniform integer in `[0, 100)`.
    pub fn percent(&mut self, kind: RollKind) -> u32 {
        let seed = self.next_seed(kind);
        self.oracle.roll_percent(seed)
    }

    /// Uniform multiplier within `range`.
    pub fn variance(&mut self, range: VarianceRange) -> f64 {
        let seed = self.next_seed(RollKind::Variance);
        let unit = self.oracle.unit_interval(seed);
        range.min + (range.max - range.min) * unit
    }

    fn next_seed(&mut self, kind: RollKind) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, kind);
        self.nonce += 1;
        seed
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = Dice::new(42);
        let mut b = Dice::new(42);
        for _ in 0..32 {
            assert_eq!(a.percent(RollKind::Accuracy), b.percent(RollKind::Accuracy));
        }
        assert_eq!(a.rolls(), 32);
    }

    #[test]
    fn percent_stays_below_hundred() {
        let mut dice = Dice::new(7);
        for _ in 0..1_000 {
            assert!(dice.percent(RollKind::Critical) < 100);
        }
    }

    #[test]
    fn variance_stays_within_range() {
        let mut dice = Dice::new(99);
        let range = VarianceRange::default();
        for _ in 0..1_000 {
            let v = dice.variance(range);
            assert!((range.min..=range.max).contains(&v), "variance {v} escaped range");
        }
    }

    #[test]
    fn fixed_midpoint_centres_variance() {
        let mut dice = Dice::with_oracle(0, FixedRng(FixedRng::MIDPOINT));
        let v = dice.variance(VarianceRange::new(0.5, 1.5));
        assert_eq!(v, 1.0);
        assert_eq!(dice.percent(RollKind::Accuracy), 48);
    }

    #[test]
    fn sequence_repeats_last_value() {
        let rng = SequenceRng::new([3, 99]);
        assert_eq!(rng.next_u32(0), 3);
        assert_eq!(rng.next_u32(0), 99);
        assert_eq!(rng.next_u32(0), 99);
    }
}
