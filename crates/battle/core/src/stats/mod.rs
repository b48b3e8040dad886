//! Stat system for combat units.
//!
//! Stats are layered the same way for every unit:
//!
//! 1. **Template** ([`UnitTemplate`]): authored base values, growth rates and
//!    the experience curve. Never mutated.
//! 2. **Level scaling** ([`growth`]): `round(base × rate^(level − 1))` per stat.
//! 3. **Block** ([`StatBlock`]): the resulting maxima and combat stats stored on
//!    the unit and snapshotted into level-up results.

pub mod block;
pub mod growth;
pub mod template;

pub use block::StatBlock;
pub use growth::{GrowthRates, round_stat, scale_stat};
pub use template::{LevelSkill, UnitTemplate};
