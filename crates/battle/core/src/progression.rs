//! Experience and level-up progression for [`CombatUnit`].

use tracing::debug;

use crate::skill::Skill;
use crate::stats::StatBlock;
use crate::unit::CombatUnit;

/// Level and stats captured before a level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSnapshot {
    pub level: u32,
    pub stats: StatBlock,
}

/// Record of one level gained.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpResult {
    pub new_level: u32,
    pub old_stats: StatSnapshot,
    pub new_stats: StatBlock,
    /// Skills newly learned at `new_level`, in template order.
    pub learned_skills: Vec<Skill>,
}

impl LevelUpResult {
    pub fn stat_increases(&self) -> StatIncreases {
        StatIncreases::between(&self.old_stats.stats, &self.new_stats)
    }
}

/// Per-stat change across one level-up. Growth never lowers a stat, but the
/// deltas are signed so templates with growth below 1.0 stay representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatIncreases {
    pub health: i64,
    pub mana: i64,
    pub attack: i64,
    pub defense: i64,
    pub accuracy: i64,
}

impl StatIncreases {
    pub fn between(old: &StatBlock, new: &StatBlock) -> Self {
        let delta = |old: u32, new: u32| i64::from(new) - i64::from(old);
        Self {
            health: delta(old.max_health, new.max_health),
            mana: delta(old.max_mana, new.max_mana),
            attack: delta(old.attack, new.attack),
            defense: delta(old.defense, new.defense),
            accuracy: delta(old.accuracy, new.accuracy),
        }
    }

    /// Display lines for the stats that went up, e.g. `"HP +10"`.
    pub fn summary_lines(&self) -> Vec<String> {
        [
            ("HP", self.health),
            ("MP", self.mana),
            ("ATK", self.attack),
            ("DEF", self.defense),
            ("ACC", self.accuracy),
        ]
        .into_iter()
        .filter(|(_, delta)| *delta > 0)
        .map(|(label, delta)| format!("{label} +{delta}"))
        .collect()
    }
}

impl CombatUnit {
    /// Adds experience and performs every level-up it pays for.
    ///
    /// Leftover experience carries into the next level. Units at the level
    /// cap gain nothing.
    pub fn add_experience(&mut self, amount: u32) -> Vec<LevelUpResult> {
        if self.is_max_level() {
            return Vec::new();
        }

        self.current_exp = self.current_exp.saturating_add(amount);

        let mut results = Vec::new();
        while !self.is_max_level() && self.current_exp >= self.exp_to_next_level {
            results.push(self.level_up());
        }
        results
    }

    fn level_up(&mut self) -> LevelUpResult {
        let old_stats = StatSnapshot {
            level: self.level,
            stats: self.stats,
        };

        self.current_exp = self.current_exp.saturating_sub(self.exp_to_next_level);
        self.level += 1;
        self.stats = self.template.stats_at(self.level);
        self.health = self.stats.max_health;
        self.mana = self.stats.max_mana;
        self.exp_to_next_level = self.template.exp_threshold_at(self.level);

        let unlocked: Vec<Skill> = self.template.skills_unlocked_at(self.level).cloned().collect();
        let mut learned_skills = Vec::new();
        for skill in unlocked {
            if self.learn_skill(skill.clone()) {
                self.equip_into_free_slot(&skill);
                learned_skills.push(skill);
            }
        }

        debug!(
            unit = self.name(),
            level = self.level,
            learned = learned_skills.len(),
            "level up"
        );

        LevelUpResult {
            new_level: self.level,
            old_stats,
            new_stats: self.stats,
            learned_skills,
        }
    }
}
