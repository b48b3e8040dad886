//! Authored unit templates ("inherited stats").

use crate::config::BattleConfig;
use crate::skill::Skill;

use super::block::StatBlock;
use super::growth::{GrowthRates, round_stat};

/// A skill unlocked when a unit reaches a given level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSkill {
    pub level: u32,
    pub skill: Skill,
}

impl LevelSkill {
    pub fn new(level: u32, skill: Skill) -> Self {
        Self { level, skill }
    }
}

/// Immutable template a [`crate::unit::CombatUnit`] is built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitTemplate {
    pub name: String,
    /// Level the unit starts at.
    pub level: u32,
    pub max_level: u32,
    /// Experience the unit starts with.
    pub current_exp: u32,
    /// Experience needed to leave level 1; later thresholds grow from it.
    pub base_exp_threshold: u32,
    /// Level-1 stats.
    pub base: StatBlock,
    pub growth: GrowthRates,
    pub exp_growth_multiplier: f64,
    /// Reward granted for defeating a level-0 unit of this template.
    pub base_exp_reward: u32,
    /// Skills known from the start, in preferred slot order.
    pub skills: Vec<Skill>,
    /// Skills learned on reaching a level.
    pub level_skills: Vec<LevelSkill>,
}

impl UnitTemplate {
    pub const DEFAULT_MAX_LEVEL: u32 = 100;
    pub const DEFAULT_EXP_THRESHOLD: u32 = 100;
    pub const DEFAULT_EXP_GROWTH: f64 = 1.5;
    pub const DEFAULT_EXP_REWARD: u32 = 200;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            max_level: Self::DEFAULT_MAX_LEVEL,
            current_exp: 0,
            base_exp_threshold: Self::DEFAULT_EXP_THRESHOLD,
            base: StatBlock::default(),
            growth: GrowthRates::default(),
            exp_growth_multiplier: Self::DEFAULT_EXP_GROWTH,
            base_exp_reward: Self::DEFAULT_EXP_REWARD,
            skills: Vec::new(),
            level_skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: StatBlock) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_growth(mut self, growth: GrowthRates) -> Self {
        self.growth = growth;
        self
    }

    #[must_use]
    pub fn with_exp_curve(mut self, base_threshold: u32, growth_multiplier: f64) -> Self {
        self.base_exp_threshold = base_threshold;
        self.exp_growth_multiplier = growth_multiplier;
        self
    }

    #[must_use]
    pub fn with_exp_reward(mut self, base_reward: u32) -> Self {
        self.base_exp_reward = base_reward;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_level_skill(mut self, level: u32, skill: Skill) -> Self {
        self.level_skills.push(LevelSkill::new(level, skill));
        self
    }

    /// Stats of this template at `level`.
    pub fn stats_at(&self, level: u32) -> StatBlock {
        self.growth.apply(&self.base, level)
    }

    /// Experience needed to advance from `level` to the next one:
    /// `round(base_threshold × growth^(level − 1))`.
    pub fn exp_threshold_at(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1) as i32;
        round_stat(f64::from(self.base_exp_threshold) * self.exp_growth_multiplier.powi(exponent))
    }

    /// Experience granted for defeating a unit of this template at `level`:
    /// `round(base_reward × (1 + level × 0.1))`.
    pub fn exp_reward_at(&self, level: u32) -> u32 {
        let scale = 1.0 + f64::from(level) * BattleConfig::LEVEL_REWARD_STEP;
        round_stat(f64::from(self.base_exp_reward) * scale)
    }

    /// Level-linked skills unlocked exactly at `level`, in table order.
    pub fn skills_unlocked_at(&self, level: u32) -> impl Iterator<Item = &Skill> {
        self.level_skills
            .iter()
            .filter(move |entry| entry.level == level)
            .map(|entry| &entry.skill)
    }

    /// Level-linked skills unlocked at or below `level`, in table order.
    pub fn skills_unlocked_through(&self, level: u32) -> impl Iterator<Item = &Skill> {
        self.level_skills
            .iter()
            .filter(move |entry| entry.level <= level)
            .map(|entry| &entry.skill)
    }
}

impl Default for UnitTemplate {
    fn default() -> Self {
        Self::new("Unit")
    }
}
