//! Pending steps: the explicit replacement for timed coroutines.

use core::time::Duration;

use super::state::BattleState;

/// Work the battle will do once its delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Leave START for the first player turn.
    BeginPlayerTurn,
    /// Land the player's basic attack.
    PlayerStrike,
    /// Resolve the selected skill against `target`.
    ResolveSkill { target: super::Side },
    /// Hand the turn over (or decide the battle) after a player action.
    EndPlayerTurn,
    EnemyStrike,
    EndEnemyTurn,
    /// Experience has been shown; present level-ups or conclude.
    AfterExperience,
    /// Announce the `index`-th skill learned by the level-up on display.
    ShowLearnedSkill { index: usize },
    FinishLevelUp,
    AnnounceComplete,
    /// Fire the end-of-battle notification and stop scheduling.
    Close,
}

/// A scheduled [`StepKind`] and how long to wait before running it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub kind: StepKind,
    pub delay: Duration,
}

impl Step {
    pub const fn new(kind: StepKind, delay: Duration) -> Self {
        Self { kind, delay }
    }

    pub const fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}

/// What the battle does after an action, an entry action or a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Wait for player input.
    Idle,
    /// Run `Step` once its delay elapses.
    Wait(Step),
    /// Transition now and run the new state's entry action.
    Enter(BattleState),
    /// The battle is over; nothing else will be scheduled.
    Closed,
}

impl Flow {
    pub(crate) const fn wait(kind: StepKind, delay: Duration) -> Self {
        Self::Wait(Step::new(kind, delay))
    }
}
