//! Content loaders for reading battle data from files.

pub mod config;
pub mod factory;
pub mod skills;
pub mod units;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use skills::{SkillCatalog, SkillLoader};
pub use units::UnitLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a whole data file, naming the path on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
