//! Content factory for building battle inputs from a data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader, UnitLoader};
use crate::registry::SkillRegistry;
use crate::roster::Roster;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── skills.ron
/// └── units.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "battle.toml";
    pub const SKILLS_FILE: &'static str = "skills.ron";
    pub const UNITS_FILE: &'static str = "units.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or defaults when the file
    /// is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillRegistry> {
        let path = self.data_dir.join(Self::SKILLS_FILE);
        SkillLoader::load(&path)
    }

    /// Load unit templates from `units.ron`.
    pub fn load_roster(&self, skills: &SkillRegistry) -> LoadResult<Roster> {
        let path = self.data_dir.join(Self::UNITS_FILE);
        UnitLoader::load(&path, skills).map(Roster::new)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
