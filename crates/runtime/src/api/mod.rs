//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the worker and the event plumbing can stay private.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{BattleHandle, PlayerInput};
