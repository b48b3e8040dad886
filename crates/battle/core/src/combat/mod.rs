//! Combat resolution formulas.
//!
//! This module provides pure functions for resolving combat interactions.
//! Randomness is passed in as already-rolled values, so every function here
//! is deterministic and side-effect free.
//!
//! # Core Functions
//!
//! - `mitigate_damage`: defense and defensive-stance reduction of a raw hit
//! - `skill_damage` / `skill_healing`: skill effect magnitudes
//! - `apply_critical`: critical multiplier
//! - `check_hit` / `check_critical`: percent roll comparisons

pub mod damage;
pub mod hit;

pub use damage::{
    MIN_DAMAGE, apply_critical, basic_heal_amount, mitigate_damage, skill_damage, skill_healing,
};
pub use hit::{check_critical, check_hit};
