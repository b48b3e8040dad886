//! Deterministic turn-based battle rules shared by the runtime and tools.
//!
//! `battle-core` defines the canonical combat rules (skills, combat units,
//! progression, the level-up queue) and the [`engine::BattleSystem`] state
//! machine that sequences a one-on-one battle. Nothing in this crate performs
//! I/O or waits on a clock: pacing is expressed as pending [`engine::Step`]s
//! that an outer driver runs when their delay has elapsed.
//!
//! Presentation collaborators (HUD, audio) are injected through the narrow
//! [`env::Presenter`] and [`env::SoundSink`] capability traits, so the whole
//! battle can be simulated headlessly.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod queue;
pub mod skill;
pub mod stats;
pub mod unit;

pub use config::{BattleConfig, PacingConfig, VarianceRange};
pub use engine::{
    ActionReport, BattleEvent, BattleOutcome, BattleState, BattleSystem, ExpInfo, Side, Step,
    StepKind,
};
pub use env::{Dice, FixedRng, PcgRng, Presenter, RngOracle, SequenceRng, SoundEvent, SoundSink};
pub use error::{ActionError, BattleError, EquipError, ErrorSeverity, GatingFailure};
pub use progression::{LevelUpResult, StatIncreases, StatSnapshot};
pub use queue::LevelUpQueue;
pub use skill::{Skill, SkillId, SkillKind, SkillResult, TargetRule};
pub use stats::{GrowthRates, LevelSkill, StatBlock, UnitTemplate};
pub use unit::{CombatUnit, DefenseState, HitReport, SkillTarget};
