//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for
//! feeding player input or streaming battle events.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleEvent, BattleState, CombatUnit, ExpInfo};

use super::errors::{Result, RuntimeError};
use crate::events::EventBus;
use crate::workers::Command;

/// One player decision, as accepted by the battle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    Attack,
    Defend,
    Heal,
    /// Equipped skill slot.
    SelectSkill(usize),
    /// Index into the current target candidates.
    SelectTarget(usize),
    CancelTargetSelection,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Start a battle, replacing any battle already in progress.
    ///
    /// Both units are reset to full health and mana before `START` is entered.
    pub async fn start_battle(&self, player: CombatUnit, enemy: CombatUnit) -> Result<()> {
        self.request(|reply| Command::StartBattle {
            player: Box::new(player),
            enemy: Box::new(enemy),
            reply,
        })
        .await
    }

    /// End the current battle and return `(player, enemy)` as they stand.
    pub async fn end_battle(&self) -> Result<(CombatUnit, CombatUnit)> {
        self.request(|reply| Command::EndBattle { reply })
            .await?
            .ok_or(RuntimeError::NoBattle)
    }

    /// Submit a player decision.
    ///
    /// Returns [`RuntimeError::Action`] when the battle refused the input, e.g.
    /// because it arrived outside the player's turn.
    pub async fn input(&self, input: PlayerInput) -> Result<()> {
        self.request(|reply| Command::Input { input, reply })
            .await?
            .map_err(RuntimeError::from)
    }

    pub async fn attack(&self) -> Result<()> {
        self.input(PlayerInput::Attack).await
    }

    pub async fn defend(&self) -> Result<()> {
        self.input(PlayerInput::Defend).await
    }

    pub async fn heal(&self) -> Result<()> {
        self.input(PlayerInput::Heal).await
    }

    pub async fn select_skill(&self, index: usize) -> Result<()> {
        self.input(PlayerInput::SelectSkill(index)).await
    }

    pub async fn select_target(&self, index: usize) -> Result<()> {
        self.input(PlayerInput::SelectTarget(index)).await
    }

    pub async fn cancel_target_selection(&self) -> Result<()> {
        self.input(PlayerInput::CancelTargetSelection).await
    }

    /// Experience snapshot of the player unit.
    pub async fn exp_info(&self) -> Result<ExpInfo> {
        self.request(|reply| Command::QueryExp { reply })
            .await?
            .ok_or(RuntimeError::NoBattle)
    }

    pub async fn state(&self) -> Result<BattleState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Clone of the `(player, enemy)` pair as they stand right now.
    pub async fn units(&self) -> Result<(CombatUnit, CombatUnit)> {
        self.request(|reply| Command::QueryUnits { reply })
            .await?
            .ok_or(RuntimeError::NoBattle)
    }

    /// Names of the current target candidates, in selection order.
    pub async fn targets(&self) -> Result<Vec<String>> {
        self.request(|reply| Command::QueryTargets { reply }).await
    }

    /// Subscribe to battle events
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut rx = handle.subscribe();
    /// while let Ok(event) = rx.recv().await {
    ///     if matches!(event, BattleEvent::BattleEnded { .. }) {
    ///         break;
    ///     }
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_bus.subscribe()
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
