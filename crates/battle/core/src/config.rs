use core::time::Duration;

/// Battle rules and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Fraction of incoming damage removed while defending, in `[0, 1]`.
    pub defense_reduction: f64,
    /// Number of hits a defensive stance absorbs before it ends.
    pub defense_duration: u32,
    /// Fraction of maximum health restored by the basic heal action.
    pub heal_fraction: f64,
    /// Damage multiplier applied on a critical skill hit.
    pub critical_multiplier: f64,
    /// Random spread applied to skill damage and healing.
    pub damage_variance: VarianceRange,
    /// Presentation pacing between battle steps.
    pub pacing: PacingConfig,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of skill slots a unit can equip.
    pub const MAX_EQUIPPED_SKILLS: usize = 4;

    // ===== formula constants =====
    /// Experience reward grows by this fraction per level of the defeated unit.
    pub const LEVEL_REWARD_STEP: f64 = 0.1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DEFENSE_REDUCTION: f64 = 0.5;
    pub const DEFAULT_DEFENSE_DURATION: u32 = 1;
    pub const DEFAULT_HEAL_FRACTION: f64 = 0.3;
    pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 1.5;

    pub fn new() -> Self {
        Self {
            defense_reduction: Self::DEFAULT_DEFENSE_REDUCTION,
            defense_duration: Self::DEFAULT_DEFENSE_DURATION,
            heal_fraction: Self::DEFAULT_HEAL_FRACTION,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            damage_variance: VarianceRange::default(),
            pacing: PacingConfig::default(),
        }
    }

    /// Returns the same rules with every pacing delay set to zero.
    ///
    /// Useful for headless simulation where presentation timing is irrelevant.
    #[must_use]
    pub fn without_pacing(mut self) -> Self {
        self.pacing = PacingConfig::instant();
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusive bounds of a uniform random multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceRange {
    pub min: f64,
    pub max: f64,
}

impl VarianceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that always yields exactly `1.0`.
    pub const fn none() -> Self {
        Self { min: 1.0, max: 1.0 }
    }
}

impl Default for VarianceRange {
    fn default() -> Self {
        Self::new(0.9, 1.1)
    }
}

/// Delays inserted between battle steps, in milliseconds.
///
/// These only pace presentation. The battle outcome never depends on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PacingConfig {
    pub start_transition_ms: u64,
    pub attack_buffer_ms: u64,
    pub exp_display_ms: u64,
    pub level_up_display_ms: u64,
    pub skill_learned_display_ms: u64,
    pub end_delay_ms: u64,
}

impl PacingConfig {
    pub const fn instant() -> Self {
        Self {
            start_transition_ms: 0,
            attack_buffer_ms: 0,
            exp_display_ms: 0,
            level_up_display_ms: 0,
            skill_learned_display_ms: 0,
            end_delay_ms: 0,
        }
    }

    pub fn start_transition(&self) -> Duration {
        Duration::from_millis(self.start_transition_ms)
    }

    pub fn attack_buffer(&self) -> Duration {
        Duration::from_millis(self.attack_buffer_ms)
    }

    /// Half of the attack buffer, used around each hit.
    pub fn half_attack_buffer(&self) -> Duration {
        Duration::from_millis(self.attack_buffer_ms / 2)
    }

    pub fn exp_display(&self) -> Duration {
        Duration::from_millis(self.exp_display_ms)
    }

    pub fn level_up_display(&self) -> Duration {
        Duration::from_millis(self.level_up_display_ms)
    }

    pub fn skill_learned_display(&self) -> Duration {
        Duration::from_millis(self.skill_learned_display_ms)
    }

    pub fn end_delay(&self) -> Duration {
        Duration::from_millis(self.end_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            start_transition_ms: 1_000,
            attack_buffer_ms: 1_000,
            exp_display_ms: 1_500,
            level_up_display_ms: 3_000,
            skill_learned_display_ms: 2_000,
            end_delay_ms: 2_000,
        }
    }
}
