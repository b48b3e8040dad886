//! Battle worker that owns the authoritative [`battle_core::BattleSystem`].
//!
//! Receives commands from [`BattleHandle`](crate::BattleHandle), runs pending
//! steps once their delay has elapsed, and publishes every drained event to
//! the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace};

use battle_core::{ActionError, BattleState, BattleSystem, CombatUnit, ExpInfo};

use crate::api::PlayerInput;
use crate::events::EventBus;

/// Commands that can be sent to the battle worker
pub enum Command {
    StartBattle {
        player: Box<CombatUnit>,
        enemy: Box<CombatUnit>,
        reply: oneshot::Sender<()>,
    },
    EndBattle {
        reply: oneshot::Sender<Option<(CombatUnit, CombatUnit)>>,
    },
    Input {
        input: PlayerInput,
        reply: oneshot::Sender<Result<(), ActionError>>,
    },
    QueryState {
        reply: oneshot::Sender<BattleState>,
    },
    QueryExp {
        reply: oneshot::Sender<Option<ExpInfo>>,
    },
    QueryUnits {
        reply: oneshot::Sender<Option<(CombatUnit, CombatUnit)>>,
    },
    QueryTargets {
        reply: oneshot::Sender<Vec<String>>,
    },
    /// Stop the worker loop once the reply has been sent.
    Shutdown { reply: oneshot::Sender<()> },
}

/// When the pending step becomes due, tagged with the schedule it belongs to.
#[derive(Clone, Copy, Debug)]
struct Deadline {
    seq: u64,
    at: Instant,
}

/// Background task that drives one battle at a time.
pub struct BattleWorker {
    system: BattleSystem,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    deadline: Option<Deadline>,
}

impl BattleWorker {
    pub fn new(
        system: BattleSystem,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            system,
            command_rx,
            event_bus,
            deadline: None,
        }
    }

    /// Main worker loop.
    ///
    /// Exits when every handle is dropped or a shutdown is requested.
    pub async fn run(mut self) {
        loop {
            self.sync_deadline();
            let wake = self.deadline.map(|d| d.at);

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    None => break,
                },
                () = sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                    self.run_due_step();
                }
            }

            self.publish_events();
        }

        debug!("battle worker stopped");
    }

    /// Returns `false` once the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::StartBattle {
                player,
                enemy,
                reply,
            } => {
                self.system.start_battle(*player, *enemy);
                if reply.send(()).is_err() {
                    debug!("StartBattle reply channel closed (caller dropped)");
                }
            }
            Command::EndBattle { reply } => {
                let units = self.system.take_units();
                if units.is_some() {
                    info!("battle ended by request");
                }
                if reply.send(units).is_err() {
                    debug!("EndBattle reply channel closed (caller dropped)");
                }
            }
            Command::Input { input, reply } => {
                let result = self.apply_input(input);
                if let Err(err) = &result {
                    debug!(?input, %err, "input rejected");
                }
                if reply.send(result).is_err() {
                    debug!("Input reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.system.state()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryExp { reply } => {
                let info = self.system.is_started().then(|| self.system.exp_info());
                if reply.send(info).is_err() {
                    debug!("QueryExp reply channel closed (caller dropped)");
                }
            }
            Command::QueryUnits { reply } => {
                let units = self
                    .system
                    .player()
                    .cloned()
                    .zip(self.system.enemy().cloned());
                if reply.send(units).is_err() {
                    debug!("QueryUnits reply channel closed (caller dropped)");
                }
            }
            Command::QueryTargets { reply } => {
                let names = self
                    .system
                    .target_names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                if reply.send(names).is_err() {
                    debug!("QueryTargets reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                debug!("battle worker shutdown requested");
                let _ = reply.send(());
                return false;
            }
        }
        true
    }

    fn apply_input(&mut self, input: PlayerInput) -> Result<(), ActionError> {
        match input {
            PlayerInput::Attack => self.system.attack(),
            PlayerInput::Defend => self.system.defend(),
            PlayerInput::Heal => self.system.heal(),
            PlayerInput::SelectSkill(index) => self.system.select_skill(index),
            PlayerInput::SelectTarget(index) => self.system.select_target(index),
            PlayerInput::CancelTargetSelection => self.system.cancel_target_selection(),
        }
    }

    /// Arms, keeps, or drops the deadline to match the pending step.
    ///
    /// A deadline is only kept while the schedule it was armed for is still
    /// current; a replaced, cleared or restarted schedule gets a fresh one.
    fn sync_deadline(&mut self) {
        let seq = self.system.schedule_seq();
        match self.system.pending_step() {
            None => self.deadline = None,
            Some(step) => {
                if self.deadline.is_none_or(|d| d.seq != seq) {
                    trace!(
                        step = %step.kind,
                        delay_ms = step.delay.as_millis() as u64,
                        "step armed"
                    );
                    self.deadline = Some(Deadline {
                        seq,
                        at: Instant::now() + step.delay,
                    });
                }
            }
        }
    }

    fn run_due_step(&mut self) {
        let Some(deadline) = self.deadline.take() else {
            return;
        };
        if deadline.seq != self.system.schedule_seq() {
            trace!(seq = deadline.seq, "stale deadline dropped");
            return;
        }
        self.system.advance();
    }

    fn publish_events(&mut self) {
        for event in self.system.drain_events() {
            self.event_bus.publish(event);
        }
    }
}
