//! Async driver for the battle state machine.
//!
//! The core [`battle_core::BattleSystem`] never reads a clock: it schedules
//! pending steps and waits to be advanced. This crate owns one battle per
//! worker task, sleeps through each step's delay with `tokio::time`, and
//! republishes the battle's events to any number of subscribers.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the broadcast bus for battle events
//! - [`workers`] keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{BattleHandle, PlayerInput, Result, RuntimeError};
pub use events::EventBus;
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
