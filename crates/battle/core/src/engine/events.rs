use crate::error::GatingFailure;
use crate::progression::LevelUpResult;
use crate::skill::{SkillId, SkillResult};

use super::state::{BattleOutcome, BattleState, Side};

/// A resolved combat action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionReport {
    Attack {
        actor: Side,
        damage: u32,
        killed: bool,
    },
    Defend {
        actor: Side,
    },
    Heal {
        actor: Side,
        amount: u32,
    },
    Skill {
        actor: Side,
        target: Side,
        skill: SkillId,
        result: SkillResult,
    },
}

/// Notifications produced by the battle, drained in emission order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted { player: String, enemy: String },
    StateChanged { from: BattleState, to: BattleState },
    ActionResolved(ActionReport),
    SkillRejected { skill: SkillId, reason: GatingFailure },
    ExperienceGained { amount: u32 },
    LevelUp(LevelUpResult),
    PlayerWon,
    PlayerLost,
    BattleEnded { outcome: BattleOutcome },
}

/// Snapshot of the player's progression.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpInfo {
    pub level: u32,
    pub current_exp: u32,
    pub exp_to_next_level: u32,
    pub exp_percentage: f32,
    /// Experience awarded during the current battle.
    pub total_exp_gained: u32,
}
