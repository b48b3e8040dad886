//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a battle.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{
    BattleConfig, BattleEvent, BattleSystem, Dice, Presenter, RngOracle, SoundSink,
};

use crate::api::{BattleHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::workers::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Seed for every roll made during the runtime's battles.
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that drives battles in a background task.
///
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct BattleRuntime {
    handle: BattleHandle,
    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Subscribe to battle events
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe()
    }

    /// Stop the worker and wait for it to finish.
    ///
    /// Handles cloned from this runtime fail with
    /// [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        self.handle
            .request(|reply| Command::Shutdown { reply })
            .await?;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    presenter: Option<Box<dyn Presenter>>,
    sound: Option<Box<dyn SoundSink>>,
    oracle: Option<Box<dyn RngOracle>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            presenter: None,
            sound: None,
            oracle: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Attach the HUD and dialogue surface (optional)
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Attach audio output (optional)
    pub fn sound(mut self, sound: impl SoundSink + 'static) -> Self {
        self.sound = Some(Box::new(sound));
        self
    }

    /// Replace the default PCG oracle, e.g. with a scripted one in tests.
    pub fn oracle(mut self, oracle: impl RngOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> BattleRuntime {
        let dice = match self.oracle {
            Some(oracle) => Dice::with_oracle(self.config.seed, oracle),
            None => Dice::new(self.config.seed),
        };

        let mut system = BattleSystem::new(self.config.battle, dice);
        if let Some(presenter) = self.presenter {
            system.set_presenter(presenter);
        }
        if let Some(sound) = self.sound {
            system.set_sound(sound);
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = BattleHandle::new(command_tx, event_bus.clone());

        let worker = BattleWorker::new(system, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        BattleRuntime {
            handle,
            worker_handle,
        }
    }
}
