//! Skill definitions and the result of using one.
//!
//! A [`Skill`] is authored once (usually loaded by `battle-content`) and never
//! mutated afterwards. Units refer to skills by [`SkillId`] for cooldown
//! bookkeeping and slot management.

use core::fmt;

/// Stable identifier of an authored skill.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SkillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What a skill does when it resolves.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SkillKind {
    Damage,
    Heal,
    /// Reserved: resolves successfully with no numeric effect.
    Buff,
    /// Reserved: resolves successfully with no numeric effect.
    Debuff,
}

/// Which units a skill may legally be aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TargetRule {
    /// The caster only.
    #[strum(serialize = "SELF")]
    #[cfg_attr(feature = "serde", serde(rename = "SELF"))]
    Caster,
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
}

impl TargetRule {
    /// Whether the player must pick a target before the skill resolves.
    pub const fn needs_selection(&self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly)
    }
}

/// Immutable description of an action's cost, target rule and effect formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: SkillKind,
    pub target: TargetRule,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub health_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_turns: u32,
    #[cfg_attr(feature = "serde", serde(default = "Skill::default_base_power"))]
    pub base_power: u32,
    /// Hit chance in percent, `[0, 100]`.
    #[cfg_attr(feature = "serde", serde(default = "Skill::default_accuracy"))]
    pub accuracy: u8,
    /// Critical chance in percent, `[0, 100]`.
    #[cfg_attr(feature = "serde", serde(default = "Skill::default_critical_chance"))]
    pub critical_chance: u8,
}

impl Skill {
    pub const DEFAULT_BASE_POWER: u32 = 10;
    pub const DEFAULT_ACCURACY: u8 = 100;
    pub const DEFAULT_CRITICAL_CHANCE: u8 = 5;

    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        kind: SkillKind,
        target: TargetRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            target,
            mana_cost: 0,
            health_cost: 0,
            cooldown_turns: 0,
            base_power: Self::DEFAULT_BASE_POWER,
            accuracy: Self::DEFAULT_ACCURACY,
            critical_chance: Self::DEFAULT_CRITICAL_CHANCE,
        }
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    #[must_use]
    pub fn with_health_cost(mut self, health_cost: u32) -> Self {
        self.health_cost = health_cost;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown_turns = turns;
        self
    }

    #[must_use]
    pub fn with_power(mut self, base_power: u32) -> Self {
        self.base_power = base_power;
        self
    }

    /// Percent values above 100 are clamped.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: u8) -> Self {
        self.accuracy = accuracy.min(100);
        self
    }

    /// Percent values above 100 are clamped.
    #[must_use]
    pub fn with_critical_chance(mut self, chance: u8) -> Self {
        self.critical_chance = chance.min(100);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[cfg(feature = "serde")]
    fn default_base_power() -> u32 {
        Self::DEFAULT_BASE_POWER
    }

    #[cfg(feature = "serde")]
    fn default_accuracy() -> u8 {
        Self::DEFAULT_ACCURACY
    }

    #[cfg(feature = "serde")]
    fn default_critical_chance() -> u8 {
        Self::DEFAULT_CRITICAL_CHANCE
    }
}

/// Outcome of a single skill use. Produced once, never retained by the rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillResult {
    /// The skill was paid for and resolved (a miss still counts).
    pub success: bool,
    pub message: String,
    pub damage_dealt: u32,
    pub healing_done: u32,
    pub was_critical: bool,
    pub target_killed: bool,
}

impl SkillResult {
    /// A refused use: nothing was paid and nothing changed.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    pub(crate) fn resolved(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }
}
