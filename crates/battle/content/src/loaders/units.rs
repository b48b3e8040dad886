//! Unit template loader.

use std::path::Path;

use battle_core::UnitTemplate;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};
use crate::registry::{SkillRegistry, UnitSpec};

/// Loader for unit templates from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load unit templates from a RON file and resolve their skills.
    ///
    /// RON format: `Vec<(String, UnitSpec)>`, keyed by unit id.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file
    /// * `skills` - Registry the skill ids are resolved against
    ///
    /// # Returns
    ///
    /// Returns a Vec of (unit_id, UnitTemplate) in file order.
    pub fn load(path: &Path, skills: &SkillRegistry) -> LoadResult<Vec<(String, UnitTemplate)>> {
        let content = read_file(path)?;

        let raw_data: Vec<(String, UnitSpec)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;

        let mut units: Vec<(String, UnitTemplate)> = Vec::with_capacity(raw_data.len());
        for (unit_id, spec) in raw_data {
            if units.iter().any(|(id, _)| *id == unit_id) {
                anyhow::bail!("Duplicate unit id '{}' in {}", unit_id, path.display());
            }
            let template = spec.resolve(skills).map_err(|e| {
                anyhow::anyhow!("Failed to resolve skills for unit '{}': {}", unit_id, e)
            })?;
            units.push((unit_id, template));
        }

        debug!(path = %path.display(), count = units.len(), "unit catalog loaded");
        Ok(units)
    }
}
