//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the state machine and is the only place where
//! pacing delays are turned into real sleeps.

mod battle;

pub use battle::{BattleWorker, Command};
