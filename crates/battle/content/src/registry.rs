//! Skill registry and the authored form of unit templates.

use std::collections::BTreeMap;

use battle_core::{
    GrowthRates, LevelSkill, Skill, SkillId, StatBlock, UnitTemplate,
};

/// Every authored skill, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    skills: BTreeMap<SkillId, Skill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `skill`, returning the definition it replaced, if any.
    pub fn insert(&mut self, skill: Skill) -> Option<Skill> {
        self.skills.insert(skill.id.clone(), skill)
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Looks up a skill by id.
    ///
    /// # Errors
    ///
    /// Returns a message naming the id when it is not registered.
    pub fn resolve(&self, id: &SkillId) -> Result<Skill, String> {
        self.get(id)
            .cloned()
            .ok_or_else(|| format!("unknown skill '{id}'"))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }
}

impl FromIterator<Skill> for SkillRegistry {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        let mut registry = Self::new();
        for skill in iter {
            registry.insert(skill);
        }
        registry
    }
}

/// A skill unlocked at `level`, referenced by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSkillSpec {
    pub level: u32,
    pub skill: SkillId,
}

/// Authored unit template. Skills are named by id and resolved against a
/// [`SkillRegistry`]; omitted fields take the [`UnitTemplate`] defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitSpec {
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub current_exp: u32,
    pub base_exp_threshold: u32,
    pub base: StatBlock,
    pub growth: GrowthRates,
    pub exp_growth_multiplier: f64,
    pub base_exp_reward: u32,
    pub skills: Vec<SkillId>,
    pub level_skills: Vec<LevelSkillSpec>,
}

impl Default for UnitSpec {
    fn default() -> Self {
        let template = UnitTemplate::default();
        Self {
            name: template.name,
            level: template.level,
            max_level: template.max_level,
            current_exp: template.current_exp,
            base_exp_threshold: template.base_exp_threshold,
            base: template.base,
            growth: template.growth,
            exp_growth_multiplier: template.exp_growth_multiplier,
            base_exp_reward: template.base_exp_reward,
            skills: Vec::new(),
            level_skills: Vec::new(),
        }
    }
}

impl UnitSpec {
    /// Resolves skill ids into a [`UnitTemplate`].
    ///
    /// # Errors
    ///
    /// Fails on the first skill id missing from `registry`.
    pub fn resolve(&self, registry: &SkillRegistry) -> Result<UnitTemplate, String> {
        let skills = self
            .skills
            .iter()
            .map(|id| registry.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;

        let level_skills = self
            .level_skills
            .iter()
            .map(|spec| {
                registry
                    .resolve(&spec.skill)
                    .map(|skill| LevelSkill::new(spec.level, skill))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UnitTemplate {
            name: self.name.clone(),
            level: self.level,
            max_level: self.max_level,
            current_exp: self.current_exp,
            base_exp_threshold: self.base_exp_threshold,
            base: self.base,
            growth: self.growth,
            exp_growth_multiplier: self.exp_growth_multiplier,
            base_exp_reward: self.base_exp_reward,
            skills,
            level_skills,
        })
    }
}
