//! Environment facts and collaborators consumed by the battle rules.
//!
//! - [`rng`] supplies deterministic randomness for accuracy, variance and
//!   critical rolls.
//! - [`presenter`] declares the fire-and-forget HUD and audio capabilities the
//!   battle machine notifies while it runs.

pub mod presenter;
pub mod rng;

pub use presenter::{Presenter, SoundEvent, SoundSink};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, RollKind, SequenceRng, compute_seed};
