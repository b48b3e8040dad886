//! Broadcast bus for battle events.
//!
//! The worker drains [`battle_core::BattleEvent`]s from the state machine after
//! every command and every step and publishes them here in order.

mod bus;

pub use bus::EventBus;
