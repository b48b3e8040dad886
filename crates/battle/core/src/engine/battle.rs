//! Per-battle state plus the entry actions, player actions and steps that
//! mutate it. Everything here returns a [`Flow`]; applying it (scheduling,
//! transitioning) is left to [`super::BattleSystem`].

use tracing::{debug, info};

use crate::combat::basic_heal_amount;
use crate::config::BattleConfig;
use crate::env::{Dice, SoundEvent};
use crate::error::ActionError;
use crate::progression::LevelUpResult;
use crate::queue::LevelUpQueue;
use crate::skill::{Skill, TargetRule};
use crate::unit::{CombatUnit, SkillTarget};

use super::events::{ActionReport, BattleEvent};
use super::outputs::Outputs;
use super::state::{BattleState, Side};
use super::step::{Flow, StepKind};

/// Borrowed collaborators handed to every battle operation.
pub(crate) struct StepContext<'a> {
    pub(crate) out: &'a mut Outputs,
    pub(crate) config: &'a BattleConfig,
    pub(crate) dice: &'a mut Dice,
}

#[derive(Debug)]
pub(crate) struct Battle {
    pub(crate) player: CombatUnit,
    pub(crate) enemy: CombatUnit,
    level_ups: LevelUpQueue,
    selected_skill: Option<Skill>,
    targets: Vec<Side>,
    /// Level-up currently on display.
    presenting: Option<LevelUpResult>,
    pub(crate) exp_gained: u32,
    exp_awarded: bool,
}

impl Battle {
    pub(crate) fn new(mut player: CombatUnit, mut enemy: CombatUnit) -> Self {
        player.reset();
        enemy.reset();
        Self {
            player,
            enemy,
            level_ups: LevelUpQueue::new(),
            selected_skill: None,
            targets: Vec::new(),
            presenting: None,
            exp_gained: 0,
            exp_awarded: false,
        }
    }

    pub(crate) fn unit(&self, side: Side) -> &CombatUnit {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn targets(&self) -> &[Side] {
        &self.targets
    }

    pub(crate) fn selected_skill(&self) -> Option<&Skill> {
        self.selected_skill.as_ref()
    }

    pub(crate) fn pending_level_ups(&self) -> usize {
        self.level_ups.len()
    }

    pub(crate) fn into_units(self) -> (CombatUnit, CombatUnit) {
        (self.player, self.enemy)
    }

    // ===== entry actions =====

    pub(crate) fn enter(&mut self, state: BattleState, cx: &mut StepContext<'_>) -> Flow {
        match state {
            BattleState::Start => self.enter_start(cx),
            BattleState::PlayerTurn => self.enter_player_turn(cx),
            BattleState::SelectingTarget => self.enter_selecting_target(cx),
            BattleState::EnemyTurn => self.enter_enemy_turn(cx),
            BattleState::Won => self.enter_won(cx),
            BattleState::LevelUp => self.enter_level_up(cx),
            BattleState::Lost => self.enter_lost(cx),
        }
    }

    fn enter_start(&mut self, cx: &mut StepContext<'_>) -> Flow {
        cx.out.message(&format!("A wild {} appears!", self.enemy.name()));

        let (player, enemy) = (&self.player, &self.enemy);
        cx.out.present(|p| {
            p.set_hud(Side::Player, player);
            p.set_hud(Side::Enemy, enemy);
            p.update_exp_bar(player.exp_percentage());
        });

        Flow::wait(StepKind::BeginPlayerTurn, cx.config.pacing.start_transition())
    }

    fn enter_player_turn(&mut self, cx: &mut StepContext<'_>) -> Flow {
        self.selected_skill = None;
        self.targets.clear();

        let player = &self.player;
        cx.out.present(|p| p.set_hud(Side::Player, player));
        cx.out.message("Choose an action:");
        Flow::Idle
    }

    fn enter_selecting_target(&mut self, cx: &mut StepContext<'_>) -> Flow {
        let Some(skill) = self.selected_skill.as_ref() else {
            return Flow::Enter(BattleState::PlayerTurn);
        };

        let names: Vec<&str> = self.targets.iter().map(|side| self.unit(*side).name()).collect();
        cx.out.present(|p| p.show_targets(&names));
        cx.out.message(&format!("Select a target for {}:", skill.name));
        Flow::Idle
    }

    fn enter_enemy_turn(&mut self, cx: &mut StepContext<'_>) -> Flow {
        self.enemy.tick_cooldowns();
        cx.out.message(&format!("{} attacks!", self.enemy.name()));
        Flow::wait(StepKind::EnemyStrike, cx.config.pacing.half_attack_buffer())
    }

    fn enter_won(&mut self, cx: &mut StepContext<'_>) -> Flow {
        // Re-entered once the level-up queue has drained.
        if self.exp_awarded {
            return self.conclude_victory(cx, true);
        }
        self.exp_awarded = true;

        cx.out.message("You won the battle!");

        let reward = self.enemy.exp_reward();
        self.exp_gained = self.exp_gained.saturating_add(reward);
        let results = self.player.add_experience(reward);
        info!(reward, level_ups = results.len(), "experience awarded");
        self.level_ups.extend(results);

        cx.out.emit(BattleEvent::ExperienceGained { amount: reward });
        cx.out.message(&format!("Gained {reward} EXP!"));
        let percentage = self.player.exp_percentage();
        cx.out.present(|p| p.update_exp_bar(percentage));

        Flow::wait(StepKind::AfterExperience, cx.config.pacing.exp_display())
    }

    fn enter_level_up(&mut self, cx: &mut StepContext<'_>) -> Flow {
        let Some(result) = self.level_ups.dequeue() else {
            return self.conclude_victory(cx, true);
        };

        cx.out.message(&format!(
            "{} reached Level {}!",
            self.player.name(),
            result.new_level
        ));
        cx.out.present(|p| {
            p.show_level_up(&result);
            p.trigger_level_up_effect();
        });
        cx.out.play(SoundEvent::LevelUp);
        cx.out.emit(BattleEvent::LevelUp(result.clone()));

        let next = if result.learned_skills.is_empty() {
            StepKind::FinishLevelUp
        } else {
            StepKind::ShowLearnedSkill { index: 0 }
        };
        self.presenting = Some(result);
        Flow::wait(next, cx.config.pacing.level_up_display())
    }

    fn enter_lost(&mut self, cx: &mut StepContext<'_>) -> Flow {
        cx.out.message("You were defeated...");
        cx.out.play(SoundEvent::Defeat);
        cx.out.emit(BattleEvent::PlayerLost);
        Flow::wait(StepKind::Close, cx.config.pacing.end_delay())
    }

    fn conclude_victory(&mut self, cx: &mut StepContext<'_>, after_level_ups: bool) -> Flow {
        cx.out.play(SoundEvent::Victory);
        cx.out.emit(BattleEvent::PlayerWon);

        if after_level_ups {
            Flow::wait(StepKind::AnnounceComplete, cx.config.pacing.attack_buffer())
        } else {
            Flow::wait(StepKind::Close, cx.config.pacing.end_delay())
        }
    }

    // ===== player actions =====

    pub(crate) fn attack(&mut self, cx: &mut StepContext<'_>) -> Flow {
        cx.out.message(&format!("{} attacks!", self.player.name()));
        Flow::wait(StepKind::PlayerStrike, cx.config.pacing.half_attack_buffer())
    }

    pub(crate) fn defend(&mut self, cx: &mut StepContext<'_>) -> Flow {
        self.player
            .start_defending(cx.config.defense_reduction, cx.config.defense_duration);

        cx.out.message(&format!("{} defends!", self.player.name()));
        cx.out.present(|p| p.set_defense_visual(Side::Player, true));
        cx.out.play(SoundEvent::Defend);
        cx.out.emit(BattleEvent::ActionResolved(ActionReport::Defend {
            actor: Side::Player,
        }));

        Flow::wait(StepKind::EndPlayerTurn, cx.config.pacing.attack_buffer())
    }

    pub(crate) fn heal(&mut self, cx: &mut StepContext<'_>) -> Flow {
        let amount = basic_heal_amount(self.player.max_health(), cx.config.heal_fraction);
        let restored = self.player.heal(amount);

        cx.out.message(&format!("{} uses a healing potion!", self.player.name()));
        let player = &self.player;
        cx.out.present(|p| {
            p.set_health(Side::Player, player);
            p.trigger_heal_effect(Side::Player);
        });
        cx.out.play(SoundEvent::Heal);
        cx.out.emit(BattleEvent::ActionResolved(ActionReport::Heal {
            actor: Side::Player,
            amount: restored,
        }));

        Flow::wait(StepKind::EndPlayerTurn, cx.config.pacing.attack_buffer())
    }

    pub(crate) fn select_skill(
        &mut self,
        index: usize,
        cx: &mut StepContext<'_>,
    ) -> Result<Flow, ActionError> {
        let skill = self
            .player
            .equipped_skill(index)
            .cloned()
            .ok_or(ActionError::SkillSlotEmpty { index })?;

        if let Err(reason) = self.player.check_skill(&skill) {
            cx.out.message(&format!("Cannot use {}!", skill.name));
            cx.out.emit(BattleEvent::SkillRejected {
                skill: skill.id.clone(),
                reason: reason.clone(),
            });
            return Err(ActionError::SkillUnavailable {
                skill: skill.id,
                reason,
            });
        }

        debug!(skill = %skill.id, target = %skill.target, "skill selected");
        self.selected_skill = Some(skill.clone());

        let side = match skill.target {
            TargetRule::Caster | TargetRule::SingleAlly | TargetRule::AllAllies => Side::Player,
            TargetRule::SingleEnemy | TargetRule::AllEnemies => Side::Enemy,
        };

        let flow = if skill.target.needs_selection() {
            self.targets = vec![side];
            Flow::Enter(BattleState::SelectingTarget)
        } else {
            self.begin_skill(&skill, side, cx)
        };
        Ok(flow)
    }

    pub(crate) fn select_target(
        &mut self,
        index: usize,
        cx: &mut StepContext<'_>,
    ) -> Result<Flow, ActionError> {
        let skill = self
            .selected_skill
            .clone()
            .ok_or(ActionError::NoSkillSelected)?;
        let target = self
            .targets
            .get(index)
            .copied()
            .ok_or(ActionError::TargetOutOfRange {
                index,
                available: self.targets.len(),
            })?;

        self.targets.clear();
        Ok(self.begin_skill(&skill, target, cx))
    }

    pub(crate) fn cancel_target_selection(&mut self, _cx: &mut StepContext<'_>) -> Flow {
        self.selected_skill = None;
        self.targets.clear();
        Flow::Enter(BattleState::PlayerTurn)
    }

    fn begin_skill(&mut self, skill: &Skill, target: Side, cx: &mut StepContext<'_>) -> Flow {
        cx.out.message(&format!("{} uses {}!", self.player.name(), skill.name));
        Flow::wait(
            StepKind::ResolveSkill { target },
            cx.config.pacing.half_attack_buffer(),
        )
    }

    // ===== steps =====

    pub(crate) fn run_step(&mut self, kind: StepKind, cx: &mut StepContext<'_>) -> Flow {
        match kind {
            StepKind::BeginPlayerTurn => Flow::Enter(BattleState::PlayerTurn),
            StepKind::PlayerStrike => self.player_strike(cx),
            StepKind::ResolveSkill { target } => self.resolve_skill(target, cx),
            StepKind::EndPlayerTurn => self.end_player_turn(),
            StepKind::EnemyStrike => self.enemy_strike(cx),
            StepKind::EndEnemyTurn => self.end_enemy_turn(cx),
            StepKind::AfterExperience => {
                if self.level_ups.has_pending() {
                    Flow::Enter(BattleState::LevelUp)
                } else {
                    self.conclude_victory(cx, false)
                }
            }
            StepKind::ShowLearnedSkill { index } => self.show_learned_skill(index, cx),
            StepKind::FinishLevelUp => self.finish_level_up(cx),
            StepKind::AnnounceComplete => {
                cx.out.message("Battle Complete!");
                Flow::wait(StepKind::Close, cx.config.pacing.end_delay())
            }
            StepKind::Close => Flow::Closed,
        }
    }

    fn player_strike(&mut self, cx: &mut StepContext<'_>) -> Flow {
        cx.out.play(SoundEvent::Attack);
        let report = self.player.basic_attack(&mut self.enemy);
        self.present_hit(Side::Enemy, cx);
        cx.out.emit(BattleEvent::ActionResolved(ActionReport::Attack {
            actor: Side::Player,
            damage: report.damage,
            killed: report.killed,
        }));

        Flow::wait(StepKind::EndPlayerTurn, cx.config.pacing.half_attack_buffer())
    }

    fn resolve_skill(&mut self, target: Side, cx: &mut StepContext<'_>) -> Flow {
        let Some(skill) = self.selected_skill.take() else {
            return Flow::Enter(BattleState::PlayerTurn);
        };

        let result = match target {
            Side::Player => self
                .player
                .use_skill(&skill, SkillTarget::Caster, cx.dice, cx.config),
            Side::Enemy => self.player.use_skill(
                &skill,
                SkillTarget::Unit(&mut self.enemy),
                cx.dice,
                cx.config,
            ),
        };

        if !result.message.is_empty() {
            cx.out.message(&result.message);
        }
        if !result.success {
            return Flow::Enter(BattleState::PlayerTurn);
        }

        let (player, enemy) = (&self.player, &self.enemy);
        cx.out.present(|p| {
            if result.damage_dealt > 0 {
                p.trigger_damage_effect(target);
            }
            if result.healing_done > 0 {
                p.trigger_heal_effect(target);
            }
            p.set_hud(Side::Player, player);
            p.set_hud(Side::Enemy, enemy);
        });
        if result.healing_done > 0 {
            cx.out.play(SoundEvent::Heal);
        }

        cx.out.emit(BattleEvent::ActionResolved(ActionReport::Skill {
            actor: Side::Player,
            target,
            skill: skill.id,
            result,
        }));

        let decided = self.enemy.is_dead() || self.player.is_dead();
        let delay = if decided {
            cx.config.pacing.half_attack_buffer()
        } else {
            cx.config.pacing.attack_buffer()
        };
        Flow::wait(StepKind::EndPlayerTurn, delay)
    }

    fn end_player_turn(&mut self) -> Flow {
        if self.enemy.is_dead() {
            Flow::Enter(BattleState::Won)
        } else if self.player.is_dead() {
            Flow::Enter(BattleState::Lost)
        } else {
            Flow::Enter(BattleState::EnemyTurn)
        }
    }

    fn enemy_strike(&mut self, cx: &mut StepContext<'_>) -> Flow {
        cx.out.play(SoundEvent::Attack);
        let report = self.enemy.basic_attack(&mut self.player);
        self.present_hit(Side::Player, cx);
        cx.out.emit(BattleEvent::ActionResolved(ActionReport::Attack {
            actor: Side::Enemy,
            damage: report.damage,
            killed: report.killed,
        }));

        Flow::wait(StepKind::EndEnemyTurn, cx.config.pacing.half_attack_buffer())
    }

    fn end_enemy_turn(&mut self, _cx: &mut StepContext<'_>) -> Flow {
        if self.player.is_dead() {
            return Flow::Enter(BattleState::Lost);
        }
        self.player.tick_cooldowns();
        Flow::Enter(BattleState::PlayerTurn)
    }

    fn present_hit(&self, side: Side, cx: &mut StepContext<'_>) {
        let unit = self.unit(side);
        cx.out.present(|p| {
            p.trigger_damage_effect(side);
            p.set_health(side, unit);
            p.set_defense_visual(side, unit.is_defending());
        });
        if !unit.is_defending() {
            cx.out.play(SoundEvent::Damage);
        }
    }

    fn show_learned_skill(&mut self, index: usize, cx: &mut StepContext<'_>) -> Flow {
        let learned = self
            .presenting
            .as_ref()
            .map_or(&[][..], |r| r.learned_skills.as_slice());
        let Some(skill) = learned.get(index).cloned() else {
            return self.finish_level_up(cx);
        };
        let next = if index + 1 < learned.len() {
            StepKind::ShowLearnedSkill { index: index + 1 }
        } else {
            StepKind::FinishLevelUp
        };

        cx.out.message(&format!("Learned {}!", skill.name));
        cx.out.present(|p| p.show_skill_learned(&skill));
        Flow::wait(next, cx.config.pacing.skill_learned_display())
    }

    fn finish_level_up(&mut self, cx: &mut StepContext<'_>) -> Flow {
        self.presenting = None;

        let player = &self.player;
        cx.out.present(|p| {
            p.set_hud(Side::Player, player);
            p.update_exp_bar(player.exp_percentage());
        });

        if self.level_ups.has_pending() {
            Flow::Enter(BattleState::LevelUp)
        } else {
            Flow::Enter(BattleState::Won)
        }
    }
}
