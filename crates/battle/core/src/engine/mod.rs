//! The battle state machine.
//!
//! [`BattleSystem`] owns the two combatants of one battle and is the only
//! thing that mutates them. Player input is accepted only while the machine
//! waits for it; everything else (the enemy turn, experience, level-up
//! presentation) is expressed as pending [`Step`]s that the driver runs with
//! [`BattleSystem::advance`] once their delay has elapsed. No clock is read
//! here, so the same inputs and seed always replay the same battle.

mod battle;
mod events;
mod outputs;
mod state;
mod step;

pub use events::{ActionReport, BattleEvent, ExpInfo};
pub use state::{BattleOutcome, BattleState, Side};
pub use step::{Step, StepKind};

use core::time::Duration;

use tracing::{debug, info, trace};

use crate::config::BattleConfig;
use crate::env::{Dice, Presenter, SoundSink};
use crate::error::{ActionError, BattleError};
use crate::skill::Skill;
use crate::unit::CombatUnit;

use battle::{Battle, StepContext};
use outputs::Outputs;
use step::Flow;

/// Sequences a one-on-one battle between a player unit and an enemy unit.
#[derive(Debug)]
pub struct BattleSystem {
    config: BattleConfig,
    dice: Dice,
    state: BattleState,
    battle: Option<Battle>,
    outputs: Outputs,
    pending: Option<Step>,
    schedule_seq: u64,
    closed: bool,
}

impl BattleSystem {
    pub fn new(config: BattleConfig, dice: Dice) -> Self {
        Self {
            config,
            dice,
            state: BattleState::default(),
            battle: None,
            outputs: Outputs::default(),
            pending: None,
            schedule_seq: 0,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.set_presenter(Box::new(presenter));
        self
    }

    #[must_use]
    pub fn with_sound(mut self, sound: impl SoundSink + 'static) -> Self {
        self.set_sound(Box::new(sound));
        self
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.outputs.set_presenter(presenter);
    }

    pub fn set_sound(&mut self, sound: Box<dyn SoundSink>) {
        self.outputs.set_sound(sound);
    }

    // ===== queries =====

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.battle.is_some()
    }

    /// The battle has fired its end notification; nothing else will run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn player(&self) -> Option<&CombatUnit> {
        self.battle.as_ref().map(|b| &b.player)
    }

    pub fn enemy(&self) -> Option<&CombatUnit> {
        self.battle.as_ref().map(|b| &b.enemy)
    }

    pub fn unit(&self, side: Side) -> Option<&CombatUnit> {
        self.battle.as_ref().map(|b| b.unit(side))
    }

    /// Candidates for the selected skill while in `SELECTING_TARGET`.
    pub fn targets(&self) -> &[Side] {
        self.battle.as_ref().map(|b| b.targets()).unwrap_or_default()
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.battle.as_ref().map_or_else(Vec::new, |b| {
            b.targets().iter().map(|side| b.unit(*side).name()).collect()
        })
    }

    pub fn selected_skill(&self) -> Option<&Skill> {
        self.battle.as_ref().and_then(|b| b.selected_skill())
    }

    /// Level-ups still waiting to be presented.
    pub fn pending_level_ups(&self) -> usize {
        self.battle.as_ref().map_or(0, |b| b.pending_level_ups())
    }

    pub fn pending_step(&self) -> Option<Step> {
        self.pending
    }

    /// Incremented whenever the pending step is replaced or cleared.
    pub fn schedule_seq(&self) -> u64 {
        self.schedule_seq
    }

    /// Input would be accepted right now.
    pub fn awaiting_input(&self) -> bool {
        self.battle.is_some()
            && !self.closed
            && self.pending.is_none()
            && matches!(
                self.state,
                BattleState::PlayerTurn | BattleState::SelectingTarget
            )
    }

    pub fn exp_info(&self) -> ExpInfo {
        let Some(battle) = self.battle.as_ref() else {
            return ExpInfo::default();
        };
        let player = &battle.player;
        ExpInfo {
            level: player.level(),
            current_exp: player.current_exp(),
            exp_to_next_level: player.exp_to_next_level(),
            exp_percentage: player.exp_percentage(),
            total_exp_gained: battle.exp_gained,
        }
    }

    /// Takes every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.outputs.drain_events()
    }

    // ===== lifecycle =====

    /// Resets both units and enters `START`, replacing any battle in progress.
    pub fn start_battle(&mut self, player: CombatUnit, enemy: CombatUnit) {
        info!(player = player.name(), enemy = enemy.name(), "battle started");

        self.clear_pending();
        self.closed = false;

        let battle = Battle::new(player, enemy);
        self.outputs.emit(BattleEvent::BattleStarted {
            player: battle.player.name().to_owned(),
            enemy: battle.enemy.name().to_owned(),
        });
        self.battle = Some(battle);

        self.apply(Flow::Enter(BattleState::Start));
    }

    /// Ends the current battle immediately and hands the units back.
    pub fn take_units(&mut self) -> Option<(CombatUnit, CombatUnit)> {
        let battle = self.battle.take()?;
        self.clear_pending();
        self.closed = false;
        self.state = BattleState::default();
        Some(battle.into_units())
    }

    /// Runs the pending step, if any. Returns whether a step ran.
    pub fn advance(&mut self) -> bool {
        let Some(step) = self.pending.take() else {
            return false;
        };
        trace!(step = %step.kind, "running step");

        match self.drive(|battle, cx| battle.run_step(step.kind, cx)) {
            Ok(flow) => {
                self.apply(flow);
                true
            }
            Err(_) => false,
        }
    }

    /// Runs pending steps until the battle waits for input or closes.
    ///
    /// Returns the total delay those steps asked for.
    pub fn settle(&mut self) -> Duration {
        let mut elapsed = Duration::ZERO;
        while let Some(step) = self.pending {
            elapsed += step.delay;
            self.advance();
        }
        elapsed
    }

    // ===== player input =====

    pub fn attack(&mut self) -> Result<(), ActionError> {
        self.accept_input(BattleState::PlayerTurn)?;
        let flow = self.drive(Battle::attack)?;
        self.apply(flow);
        Ok(())
    }

    pub fn defend(&mut self) -> Result<(), ActionError> {
        self.accept_input(BattleState::PlayerTurn)?;
        let flow = self.drive(Battle::defend)?;
        self.apply(flow);
        Ok(())
    }

    pub fn heal(&mut self) -> Result<(), ActionError> {
        self.accept_input(BattleState::PlayerTurn)?;
        let flow = self.drive(Battle::heal)?;
        self.apply(flow);
        Ok(())
    }

    /// Chooses the skill in equipped slot `index`.
    ///
    /// A skill that fails gating is announced and rejected without consuming
    /// the turn.
    pub fn select_skill(&mut self, index: usize) -> Result<(), ActionError> {
        self.accept_input(BattleState::PlayerTurn)?;
        let flow = self.drive(|battle, cx| battle.select_skill(index, cx))??;
        self.apply(flow);
        Ok(())
    }

    pub fn select_target(&mut self, index: usize) -> Result<(), ActionError> {
        self.accept_input(BattleState::SelectingTarget)?;
        let flow = self.drive(|battle, cx| battle.select_target(index, cx))??;
        self.apply(flow);
        Ok(())
    }

    /// Returns to `PLAYERTURN` without using the turn.
    pub fn cancel_target_selection(&mut self) -> Result<(), ActionError> {
        self.accept_input(BattleState::SelectingTarget)?;
        let flow = self.drive(Battle::cancel_target_selection)?;
        self.apply(flow);
        Ok(())
    }

    pub fn on_attack(&mut self) {
        ignore_rejected("attack", self.attack());
    }

    pub fn on_defend(&mut self) {
        ignore_rejected("defend", self.defend());
    }

    pub fn on_heal(&mut self) {
        ignore_rejected("heal", self.heal());
    }

    pub fn on_skill_selected(&mut self, index: usize) {
        ignore_rejected("select_skill", self.select_skill(index));
    }

    pub fn on_target_selected(&mut self, index: usize) {
        ignore_rejected("select_target", self.select_target(index));
    }

    // ===== internals =====

    fn accept_input(&self, expected: BattleState) -> Result<(), ActionError> {
        if self.battle.is_none() {
            return Err(ActionError::BattleNotStarted);
        }
        if self.state != expected || self.pending.is_some() || self.closed {
            return Err(ActionError::NotAcceptingInput { state: self.state });
        }
        Ok(())
    }

    fn drive<R>(
        &mut self,
        f: impl FnOnce(&mut Battle, &mut StepContext<'_>) -> R,
    ) -> Result<R, ActionError> {
        let battle = self.battle.as_mut().ok_or(ActionError::BattleNotStarted)?;
        let mut cx = StepContext {
            out: &mut self.outputs,
            config: &self.config,
            dice: &mut self.dice,
        };
        Ok(f(battle, &mut cx))
    }

    fn apply(&mut self, mut flow: Flow) {
        loop {
            match flow {
                Flow::Idle => return,
                Flow::Wait(step) => {
                    self.schedule(step);
                    return;
                }
                Flow::Enter(next) => flow = self.enter(next),
                Flow::Closed => {
                    self.close();
                    return;
                }
            }
        }
    }

    fn enter(&mut self, next: BattleState) -> Flow {
        let from = core::mem::replace(&mut self.state, next);
        debug!(%from, to = %next, "battle state changed");
        self.outputs
            .emit(BattleEvent::StateChanged { from, to: next });

        self.drive(|battle, cx| battle.enter(next, cx))
            .unwrap_or(Flow::Idle)
    }

    fn schedule(&mut self, step: Step) {
        self.schedule_seq += 1;
        trace!(step = %step.kind, delay_ms = step.delay.as_millis() as u64, seq = self.schedule_seq, "step scheduled");
        self.pending = Some(step);
    }

    fn clear_pending(&mut self) {
        if self.pending.take().is_some() {
            self.schedule_seq += 1;
        }
    }

    fn close(&mut self) {
        self.clear_pending();
        self.closed = true;

        let outcome = if self.state == BattleState::Lost {
            BattleOutcome::Defeat
        } else {
            BattleOutcome::Victory
        };
        info!(%outcome, "battle ended");
        self.outputs.emit(BattleEvent::BattleEnded { outcome });
    }
}

fn ignore_rejected(action: &str, result: Result<(), ActionError>) {
    if let Err(err) = result {
        debug!(action, code = err.error_code(), %err, "input ignored");
    }
}
