//! Skill catalog loader.

use std::path::Path;

use battle_core::Skill;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};
use crate::registry::SkillRegistry;

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    ///
    /// Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<SkillRegistry> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse skill catalog RON {}: {}", path.display(), e)
        })?;

        let mut registry = SkillRegistry::new();
        for skill in catalog.skills {
            validate(&skill)?;
            let id = skill.id.clone();
            if registry.insert(skill).is_some() {
                anyhow::bail!("Duplicate skill id '{}' in {}", id, path.display());
            }
        }

        debug!(path = %path.display(), count = registry.len(), "skill catalog loaded");
        Ok(registry)
    }
}

fn validate(skill: &Skill) -> LoadResult<()> {
    if skill.accuracy > 100 || skill.critical_chance > 100 {
        anyhow::bail!(
            "Skill '{}': accuracy and critical_chance must be within [0, 100]",
            skill.id
        );
    }
    Ok(())
}
