//! Presentation capabilities consumed by the battle state machine.
//!
//! Every method is fire-and-forget and has a no-op default, so a collaborator
//! only implements what it can render. When no presenter or sound sink is
//! attached the battle still runs; only the side effect is skipped.

use crate::engine::Side;
use crate::progression::LevelUpResult;
use crate::skill::Skill;
use crate::unit::CombatUnit;

/// HUD and dialogue surface for a battle.
pub trait Presenter: Send {
    /// Replace the dialogue line.
    fn show_message(&mut self, _text: &str) {}

    /// Refresh every gauge for one side (name, level, health, mana).
    fn set_hud(&mut self, _side: Side, _unit: &CombatUnit) {}

    fn set_health(&mut self, _side: Side, _unit: &CombatUnit) {}

    fn set_defense_visual(&mut self, _side: Side, _defending: bool) {}

    /// `percentage` is in `[0, 1]`.
    fn update_exp_bar(&mut self, _percentage: f32) {}

    /// Offer the target candidates for the selected skill, in index order.
    fn show_targets(&mut self, _candidates: &[&str]) {}

    fn show_level_up(&mut self, _result: &LevelUpResult) {}

    fn show_skill_learned(&mut self, _skill: &Skill) {}

    fn trigger_level_up_effect(&mut self) {}

    fn trigger_damage_effect(&mut self, _side: Side) {}

    fn trigger_heal_effect(&mut self, _side: Side) {}
}

/// Named audio cues emitted during a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundEvent {
    Attack,
    Damage,
    Heal,
    Defend,
    Victory,
    Defeat,
    LevelUp,
}

/// Best-effort audio output.
pub trait SoundSink: Send {
    fn play(&mut self, event: SoundEvent);
}
