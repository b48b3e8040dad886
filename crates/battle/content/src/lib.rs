//! Data-driven battle content and its loaders.
//!
//! This crate turns authored data files into `battle-core` types:
//! - Skill catalogs (RON)
//! - Unit templates that reference skills by id (RON)
//! - Battle rules and pacing (TOML)
//!
//! Content is resolved once at load time. Nothing here is consulted while a
//! battle runs.

pub mod registry;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::{LevelSkillSpec, SkillRegistry, UnitSpec};
pub use roster::Roster;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SkillLoader, UnitLoader};
