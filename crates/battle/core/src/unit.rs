//! Combat units: the mutable battle-time view of a [`UnitTemplate`].
//!
//! A unit owns its health, mana, level-derived stats, known and equipped
//! skills, cooldowns and defensive stance. Health and mana are private and
//! always clamped into `[0, max]`; out-of-range assignments never fail.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::combat::{
    apply_critical, check_critical, check_hit, mitigate_damage, skill_damage, skill_healing,
};
use crate::config::BattleConfig;
use crate::env::{Dice, RollKind};
use crate::error::{EquipError, GatingFailure};
use crate::skill::{Skill, SkillId, SkillKind, SkillResult};
use crate::stats::{StatBlock, UnitTemplate};

/// Fixed-capacity, ordered skill slots.
pub type EquippedSkills = ArrayVec<Skill, { BattleConfig::MAX_EQUIPPED_SKILLS }>;

/// Active defensive stance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenseState {
    /// Fraction of post-defense damage that still goes through.
    pub multiplier: f64,
    /// Hits left before the stance ends.
    pub turns_remaining: u32,
}

/// What a single hit did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    /// Health removed after mitigation (0 only when the target was already dead).
    pub damage: u32,
    pub killed: bool,
}

/// Who a skill resolves against.
///
/// The caster case is separate because a unit cannot be borrowed as both
/// caster and target at once.
#[derive(Debug)]
pub enum SkillTarget<'a> {
    Caster,
    Unit(&'a mut CombatUnit),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatUnit {
    pub(crate) template: UnitTemplate,
    pub(crate) level: u32,
    pub(crate) current_exp: u32,
    pub(crate) exp_to_next_level: u32,
    pub(crate) stats: StatBlock,
    pub(crate) health: u32,
    pub(crate) mana: u32,
    pub(crate) available_skills: Vec<Skill>,
    pub(crate) equipped_skills: EquippedSkills,
    pub(crate) cooldowns: BTreeMap<SkillId, u32>,
    pub(crate) defense: Option<DefenseState>,
}

impl CombatUnit {
    /// Builds a unit at its template's starting level with full health and mana.
    pub fn from_template(template: UnitTemplate) -> Self {
        let level = template.level.clamp(1, template.max_level.max(1));
        let current_exp = template.current_exp;

        let mut unit = Self {
            template,
            level,
            current_exp,
            exp_to_next_level: 0,
            stats: StatBlock::default(),
            health: 0,
            mana: 0,
            available_skills: Vec::new(),
            equipped_skills: EquippedSkills::new(),
            cooldowns: BTreeMap::new(),
            defense: None,
        };
        unit.initialize();
        unit
    }

    /// Restores the unit for a new battle.
    ///
    /// Level, experience and known skills are kept; stats are recomputed for
    /// the current level, health and mana are refilled, and cooldowns and
    /// defense are cleared.
    pub fn reset(&mut self) {
        self.initialize();
    }

    fn initialize(&mut self) {
        self.stats = self.template.stats_at(self.level);
        self.exp_to_next_level = self.template.exp_threshold_at(self.level);
        self.health = self.stats.max_health;
        self.mana = self.stats.max_mana;
        self.cooldowns.clear();
        self.defense = None;

        let known: Vec<Skill> = self
            .template
            .skills
            .iter()
            .chain(self.template.skills_unlocked_through(self.level))
            .cloned()
            .collect();
        for skill in known {
            self.learn_skill(skill);
        }

        if self.equipped_skills.is_empty() {
            let starting: Vec<Skill> = self
                .available_skills
                .iter()
                .take(BattleConfig::MAX_EQUIPPED_SKILLS)
                .cloned()
                .collect();
            self.equipped_skills.extend(starting);
        }
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn template(&self) -> &UnitTemplate {
        &self.template
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.template.max_level
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.template.max_level
    }

    pub fn current_exp(&self) -> u32 {
        self.current_exp
    }

    pub fn exp_to_next_level(&self) -> u32 {
        self.exp_to_next_level
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.stats.max_mana
    }

    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    pub fn accuracy(&self) -> u32 {
        self.stats.accuracy
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn is_defending(&self) -> bool {
        self.defense.is_some()
    }

    /// `1.0` when not defending.
    pub fn defense_multiplier(&self) -> f64 {
        self.defense.map_or(1.0, |d| d.multiplier)
    }

    pub fn defense_turns_remaining(&self) -> u32 {
        self.defense.map_or(0, |d| d.turns_remaining)
    }

    pub fn defense_state(&self) -> Option<DefenseState> {
        self.defense
    }

    pub fn available_skills(&self) -> &[Skill] {
        &self.available_skills
    }

    pub fn equipped_skills(&self) -> &[Skill] {
        &self.equipped_skills
    }

    pub fn equipped_skill(&self, slot: usize) -> Option<&Skill> {
        self.equipped_skills.get(slot)
    }

    /// Remaining cooldown turns for `skill`, 0 when ready.
    pub fn cooldown(&self, skill: &SkillId) -> u32 {
        self.cooldowns.get(skill).copied().unwrap_or(0)
    }

    pub fn cooldowns(&self) -> &BTreeMap<SkillId, u32> {
        &self.cooldowns
    }

    /// Progress towards the next level in `[0, 1]`; `1.0` at the level cap.
    pub fn exp_percentage(&self) -> f32 {
        if self.is_max_level() || self.exp_to_next_level == 0 {
            return 1.0;
        }
        (self.current_exp as f32 / self.exp_to_next_level as f32).min(1.0)
    }

    /// Experience granted to whoever defeats this unit.
    pub fn exp_reward(&self) -> u32 {
        self.template.exp_reward_at(self.level)
    }

    // ===== resources =====

    /// Clamped into `[0, max_health]`.
    pub fn set_health(&mut self, value: u32) {
        self.health = value.min(self.stats.max_health);
    }

    /// Clamped into `[0, max_mana]`.
    pub fn set_mana(&mut self, value: u32) {
        self.mana = value.min(self.stats.max_mana);
    }

    // ===== combat =====

    /// Applies a raw hit and reports what it did.
    ///
    /// While defending, each hit consumes one turn of the stance.
    pub fn take_hit(&mut self, raw: u32) -> HitReport {
        if self.is_dead() {
            return HitReport {
                damage: 0,
                killed: true,
            };
        }

        let damage = mitigate_damage(raw, self.stats.defense, self.defense.map(|d| d.multiplier));
        self.set_health(self.health.saturating_sub(damage));

        if let Some(defense) = self.defense.as_mut() {
            defense.turns_remaining = defense.turns_remaining.saturating_sub(1);
            if defense.turns_remaining == 0 {
                self.end_defense();
            }
        }

        HitReport {
            damage,
            killed: self.is_dead(),
        }
    }

    /// Applies a raw hit; returns whether the unit is now dead.
    pub fn take_damage(&mut self, raw: u32) -> bool {
        self.take_hit(raw).killed
    }

    /// Restores health up to the maximum. Dead units cannot be healed.
    ///
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let before = self.health;
        self.set_health(self.health.saturating_add(amount));
        self.health - before
    }

    /// Enters a defensive stance reducing incoming damage by
    /// `reduction_fraction` for the next `duration_turns` hits.
    pub fn start_defending(&mut self, reduction_fraction: f64, duration_turns: u32) {
        if duration_turns == 0 {
            self.end_defense();
            return;
        }
        self.defense = Some(DefenseState {
            multiplier: 1.0 - reduction_fraction.clamp(0.0, 1.0),
            turns_remaining: duration_turns,
        });
    }

    pub fn end_defense(&mut self) {
        self.defense = None;
    }

    /// Plain hit with this unit's attack stat.
    pub fn basic_attack(&self, target: &mut CombatUnit) -> HitReport {
        target.take_hit(self.stats.attack)
    }

    // ===== skills =====

    /// Checks every precondition for using `skill`.
    pub fn check_skill(&self, skill: &Skill) -> Result<(), GatingFailure> {
        if self.is_dead() {
            return Err(GatingFailure::CasterDead);
        }
        if self.mana < skill.mana_cost {
            return Err(GatingFailure::InsufficientMana {
                required: skill.mana_cost,
                available: self.mana,
            });
        }
        if self.health < skill.health_cost {
            return Err(GatingFailure::InsufficientHealth {
                required: skill.health_cost,
                available: self.health,
            });
        }
        let remaining = self.cooldown(&skill.id);
        if remaining > 0 {
            return Err(GatingFailure::OnCooldown { remaining });
        }
        Ok(())
    }

    pub fn can_use_skill(&self, skill: &Skill) -> bool {
        self.check_skill(skill).is_ok()
    }

    /// Pays for and resolves `skill` against `target`.
    ///
    /// When the skill cannot be used a failed result is returned and neither
    /// unit is modified.
    pub fn use_skill(
        &mut self,
        skill: &Skill,
        target: SkillTarget<'_>,
        dice: &mut Dice,
        config: &BattleConfig,
    ) -> SkillResult {
        if let Err(reason) = self.check_skill(skill) {
            debug!(unit = self.name(), skill = %skill.id, %reason, "skill use refused");
            return SkillResult::rejected(format!("Cannot use {}: {reason}", skill.name));
        }

        self.mana -= skill.mana_cost;
        if skill.health_cost > 0 {
            self.set_health(self.health - skill.health_cost);
        }
        if skill.cooldown_turns > 0 {
            self.cooldowns.insert(skill.id.clone(), skill.cooldown_turns);
        }

        let attack = self.stats.attack;
        let target: &mut CombatUnit = match target {
            SkillTarget::Caster => self,
            SkillTarget::Unit(unit) => unit,
        };

        match skill.kind {
            SkillKind::Damage => resolve_damage(skill, attack, target, dice, config),
            SkillKind::Heal => resolve_heal(skill, attack, target, dice, config),
            SkillKind::Buff | SkillKind::Debuff => {
                SkillResult::resolved(format!("{} was used!", skill.name))
            }
        }
    }

    /// Advances every cooldown by one turn, dropping those that reach 0.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });
    }

    pub fn knows_skill(&self, id: &SkillId) -> bool {
        self.available_skills.iter().any(|s| &s.id == id)
    }

    /// Adds `skill` to the known set. Returns false if it was already known.
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if self.knows_skill(&skill.id) {
            return false;
        }
        self.available_skills.push(skill);
        true
    }

    /// Places a known skill into `slot`.
    ///
    /// Slots are packed: a slot at or past the last equipped skill appends.
    pub fn equip_skill(&mut self, slot: usize, id: &SkillId) -> Result<(), EquipError> {
        let capacity = self.equipped_skills.capacity();
        if slot >= capacity {
            return Err(EquipError::SlotOutOfRange { slot, capacity });
        }
        let skill = self
            .available_skills
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| EquipError::NotLearned(id.clone()))?;

        if let Some(existing) = self.equipped_skills.iter().position(|s| &s.id == id)
            && existing != slot
        {
            return Err(EquipError::AlreadyEquipped(id.clone()));
        }

        match self.equipped_skills.get_mut(slot) {
            Some(current) => *current = skill,
            None => self.equipped_skills.push(skill),
        }
        Ok(())
    }

    pub fn unequip_skill(&mut self, slot: usize) -> Option<Skill> {
        (slot < self.equipped_skills.len()).then(|| self.equipped_skills.remove(slot))
    }

    /// Equips `skill` if a slot is free and it is not equipped yet.
    pub(crate) fn equip_into_free_slot(&mut self, skill: &Skill) -> bool {
        if self.equipped_skills.iter().any(|s| s.id == skill.id) {
            return false;
        }
        self.equipped_skills.try_push(skill.clone()).is_ok()
    }
}

fn resolve_damage(
    skill: &Skill,
    attack: u32,
    target: &mut CombatUnit,
    dice: &mut Dice,
    config: &BattleConfig,
) -> SkillResult {
    let hit_roll = dice.percent(RollKind::Accuracy);
    if !check_hit(hit_roll, skill.accuracy) {
        return SkillResult::resolved(format!("{} missed!", skill.name));
    }

    let variance = dice.variance(config.damage_variance);
    let mut damage = skill_damage(skill.base_power, attack, target.stats.defense, variance);

    let critical_roll = dice.percent(RollKind::Critical);
    let was_critical = check_critical(critical_roll, skill.critical_chance);
    if was_critical {
        damage = apply_critical(damage, config.critical_multiplier);
    }

    let report = target.take_hit(damage);
    let message = if was_critical {
        format!("{} hit critically for {} damage!", skill.name, damage)
    } else {
        format!("{} dealt {} damage!", skill.name, damage)
    };

    // the rolled damage; the target's own mitigation shows in its health
    SkillResult {
        success: true,
        message,
        damage_dealt: damage,
        healing_done: 0,
        was_critical,
        target_killed: report.killed,
    }
}

fn resolve_heal(
    skill: &Skill,
    attack: u32,
    target: &mut CombatUnit,
    dice: &mut Dice,
    config: &BattleConfig,
) -> SkillResult {
    let variance = dice.variance(config.damage_variance);
    let healing = skill_healing(skill.base_power, attack, variance);
    let restored = target.heal(healing);
    trace!(skill = %skill.id, healing, restored, "heal resolved");

    SkillResult {
        healing_done: healing,
        ..SkillResult::resolved(format!("{} healed {} HP!", skill.name, healing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::skill::TargetRule;
    use crate::stats::GrowthRates;

    fn fighter() -> CombatUnit {
        CombatUnit::from_template(
            UnitTemplate::new("Fighter")
                .with_base(StatBlock::new(100, 50, 10, 5, 95))
                .with_growth(GrowthRates::flat()),
        )
    }

    fn midpoint_dice() -> Dice {
        Dice::with_oracle(0, FixedRng(FixedRng::MIDPOINT))
    }

    fn fireball() -> Skill {
        Skill::new("fireball", "Fireball", SkillKind::Damage, TargetRule::SingleEnemy)
            .with_mana_cost(20)
            .with_power(20)
            .with_critical_chance(0)
    }

    #[test]
    fn basic_hit_subtracts_defense() {
        let attacker = fighter();
        let mut target = fighter();

        let report = attacker.basic_attack(&mut target);

        assert_eq!(report, HitReport { damage: 5, killed: false });
        assert_eq!(target.health(), 95);
    }

    #[test]
    fn health_never_goes_below_zero() {
        let mut unit = fighter();
        assert!(unit.take_damage(10_000));
        assert_eq!(unit.health(), 0);
        assert!(unit.take_damage(10));
        assert_eq!(unit.health(), 0);
    }

    #[test]
    fn defending_halves_damage_and_expires() {
        let mut unit = fighter();
        unit.start_defending(0.5, 2);

        // max(1, 25 - 5) = 20 → 10
        assert_eq!(unit.take_hit(25).damage, 10);
        assert!(unit.is_defending());
        assert_eq!(unit.defense_turns_remaining(), 1);

        assert_eq!(unit.take_hit(25).damage, 10);
        assert!(!unit.is_defending());
        assert_eq!(unit.defense_multiplier(), 1.0);

        assert_eq!(unit.take_hit(25).damage, 20);
    }

    #[test]
    fn heal_clamps_and_ignores_dead_units() {
        let mut unit = fighter();
        unit.take_damage(15);
        assert_eq!(unit.heal(1_000), 10);
        assert_eq!(unit.health(), unit.max_health());

        unit.take_damage(10_000);
        assert_eq!(unit.heal(50), 0);
        assert!(unit.is_dead());
    }

    #[test]
    fn gating_rejects_without_mutation() {
        let mut caster = CombatUnit::from_template(
            UnitTemplate::new("Apprentice")
                .with_base(StatBlock::new(100, 15, 10, 5, 95))
                .with_growth(GrowthRates::flat()),
        );
        let mut target = fighter();
        let skill = fireball();

        assert_eq!(
            caster.check_skill(&skill),
            Err(GatingFailure::InsufficientMana {
                required: 20,
                available: 15
            })
        );

        let result = caster.use_skill(
            &skill,
            SkillTarget::Unit(&mut target),
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );

        assert!(!result.success);
        assert_eq!(caster.mana(), 15);
        assert_eq!(caster.cooldown(&skill.id), 0);
        assert_eq!(target.health(), 100);
    }

    #[test]
    fn health_cost_gates_and_is_paid() {
        let mut caster = fighter();
        let skill = Skill::new("blood", "Blood Pact", SkillKind::Buff, TargetRule::Caster)
            .with_health_cost(30);

        caster.set_health(20);
        assert!(!caster.can_use_skill(&skill));

        caster.set_health(40);
        let result = caster.use_skill(
            &skill,
            SkillTarget::Caster,
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );
        assert!(result.success);
        assert_eq!(caster.health(), 10);
    }

    #[test]
    fn damage_skill_pays_and_hits() {
        let mut caster = fighter();
        let mut target = fighter();
        let skill = fireball().with_cooldown(2);

        let result = caster.use_skill(
            &skill,
            SkillTarget::Unit(&mut target),
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );

        // skill damage: max(1, 20 + 10 - 5) × 1.0 = 25, then target defense: 25 - 5 = 20
        assert!(result.success);
        assert_eq!(result.damage_dealt, 25);
        assert_eq!(result.message, "Fireball dealt 25 damage!");
        assert!(!result.was_critical);
        assert_eq!(target.health(), 80);
        assert_eq!(caster.mana(), 30);
        assert_eq!(caster.cooldown(&skill.id), 2);
        assert!(!caster.can_use_skill(&skill));
    }

    #[test]
    fn low_roll_lands_a_critical() {
        let mut caster = fighter();
        let mut target = fighter();
        let skill = fireball().with_power(22).with_critical_chance(50);
        let mut dice = Dice::with_oracle(0, FixedRng(0));

        let result = caster.use_skill(
            &skill,
            SkillTarget::Unit(&mut target),
            &mut dice,
            &BattleConfig::default(),
        );

        // variance 0.9: round(27 × 0.9) = 24, crit: 36, mitigated: 31
        assert!(result.was_critical);
        assert_eq!(result.damage_dealt, 36);
        assert_eq!(target.health(), 69);
    }

    #[test]
    fn high_roll_misses_inaccurate_skill() {
        let mut caster = fighter();
        let mut target = fighter();
        let skill = fireball().with_accuracy(90);
        let mut dice = Dice::with_oracle(0, FixedRng(99));

        let result = caster.use_skill(
            &skill,
            SkillTarget::Unit(&mut target),
            &mut dice,
            &BattleConfig::default(),
        );

        assert!(result.success);
        assert_eq!(result.damage_dealt, 0);
        assert_eq!(result.message, "Fireball missed!");
        assert_eq!(target.health(), 100);
        assert_eq!(caster.mana(), 30);
    }

    #[test]
    fn self_heal_resolves_against_caster() {
        let mut caster = fighter();
        caster.take_damage(45);
        let skill = Skill::new("mend", "Mend", SkillKind::Heal, TargetRule::Caster)
            .with_mana_cost(10)
            .with_power(20);

        let result = caster.use_skill(
            &skill,
            SkillTarget::Caster,
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );

        // (20 + 10) × 1.0 = 30
        assert_eq!(result.healing_done, 30);
        assert_eq!(caster.health(), 90);
        assert_eq!(caster.mana(), 40);
    }

    #[test]
    fn heal_at_full_health_reports_the_rolled_amount() {
        let mut caster = fighter();
        let skill = Skill::new("mend", "Mend", SkillKind::Heal, TargetRule::Caster)
            .with_mana_cost(10)
            .with_power(20);

        let result = caster.use_skill(
            &skill,
            SkillTarget::Caster,
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );

        assert!(result.success);
        assert_eq!(result.healing_done, 30);
        assert_eq!(result.message, "Mend healed 30 HP!");
        assert_eq!(caster.health(), 100);
    }

    #[test]
    fn damage_against_defending_target_reports_the_rolled_amount() {
        let mut caster = fighter();
        let mut target = fighter();
        target.start_defending(0.5, 1);

        let result = caster.use_skill(
            &fireball(),
            SkillTarget::Unit(&mut target),
            &mut midpoint_dice(),
            &BattleConfig::default(),
        );

        // rolled 25; the target takes ceil((25 - 5) × 0.5) = 10
        assert_eq!(result.damage_dealt, 25);
        assert_eq!(target.health(), 90);
        assert!(!target.is_defending());
    }

    #[test]
    fn cooldowns_tick_down_and_clear() {
        let mut unit = fighter();
        let id = SkillId::new("fireball");
        unit.cooldowns.insert(id.clone(), 2);

        unit.tick_cooldowns();
        assert_eq!(unit.cooldown(&id), 1);
        unit.tick_cooldowns();
        assert_eq!(unit.cooldown(&id), 0);
        assert!(unit.cooldowns().is_empty());
    }

    #[test]
    fn starting_skills_fill_slots_in_order() {
        let mut template = UnitTemplate::new("Mage").with_growth(GrowthRates::flat());
        for i in 0..6 {
            template = template.with_skill(Skill::new(
                format!("s{i}"),
                format!("Skill {i}"),
                SkillKind::Buff,
                TargetRule::Caster,
            ));
        }
        let unit = CombatUnit::from_template(template);

        assert_eq!(unit.available_skills().len(), 6);
        let equipped: Vec<_> = unit.equipped_skills().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(equipped, ["s0", "s1", "s2", "s3"]);
    }

    #[test]
    fn equip_and_unequip_slots() {
        let template = UnitTemplate::new("Mage")
            .with_skill(fireball())
            .with_skill(Skill::new("mend", "Mend", SkillKind::Heal, TargetRule::Caster));
        let mut unit = CombatUnit::from_template(template);

        assert_eq!(
            unit.equip_skill(0, &SkillId::new("mend")),
            Err(EquipError::AlreadyEquipped(SkillId::new("mend")))
        );
        assert_eq!(
            unit.equip_skill(9, &SkillId::new("mend")),
            Err(EquipError::SlotOutOfRange { slot: 9, capacity: 4 })
        );
        assert_eq!(
            unit.equip_skill(0, &SkillId::new("unknown")),
            Err(EquipError::NotLearned(SkillId::new("unknown")))
        );

        let removed = unit.unequip_skill(0).map(|s| s.id);
        assert_eq!(removed, Some(SkillId::new("fireball")));
        assert_eq!(unit.equipped_skills().len(), 1);

        unit.equip_skill(3, &SkillId::new("fireball")).unwrap();
        assert_eq!(unit.equipped_skill(1).map(|s| s.id.as_str()), Some("fireball"));
    }

    #[test]
    fn reset_refills_and_clears_battle_state() {
        let mut unit = fighter();
        unit.take_damage(50);
        unit.set_mana(0);
        unit.start_defending(0.5, 3);
        unit.cooldowns.insert(SkillId::new("x"), 3);

        unit.reset();

        assert_eq!(unit.health(), 100);
        assert_eq!(unit.mana(), 50);
        assert!(!unit.is_defending());
        assert!(unit.cooldowns().is_empty());
    }
}
