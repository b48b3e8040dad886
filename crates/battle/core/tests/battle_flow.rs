use std::sync::{Arc, Mutex};
use std::time::Duration;

use battle_core::{
    ActionError, ActionReport, BattleConfig, BattleEvent, BattleOutcome, BattleState,
    BattleSystem, CombatUnit, Dice, FixedRng, GatingFailure, GrowthRates, PcgRng, Presenter,
    Side, Skill, SkillKind, SoundEvent, SoundSink, StatBlock, TargetRule, UnitTemplate,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<String>>>);

impl Transcript {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn contains(&self, line: &str) -> bool {
        self.lines().iter().any(|l| l == line)
    }
}

impl Presenter for Transcript {
    fn show_message(&mut self, text: &str) {
        self.0.lock().unwrap().push(text.to_owned());
    }
}

#[derive(Clone, Default)]
struct Speaker(Arc<Mutex<Vec<SoundEvent>>>);

impl SoundSink for Speaker {
    fn play(&mut self, event: SoundEvent) {
        self.0.lock().unwrap().push(event);
    }
}

fn template(name: &str, stats: StatBlock) -> UnitTemplate {
    UnitTemplate::new(name)
        .with_base(stats)
        .with_growth(GrowthRates::flat())
}

fn midpoint_battle() -> BattleSystem {
    BattleSystem::new(
        BattleConfig::default(),
        Dice::with_oracle(42, FixedRng(FixedRng::MIDPOINT)),
    )
}

fn ready(mut battle: BattleSystem, player: UnitTemplate, enemy: UnitTemplate) -> BattleSystem {
    battle.start_battle(
        CombatUnit::from_template(player),
        CombatUnit::from_template(enemy),
    );
    battle.settle();
    assert_eq!(battle.state(), BattleState::PlayerTurn);
    battle
}

fn count(events: &[BattleEvent], pred: impl Fn(&BattleEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

// ============================================================================
// Scenarios
// ============================================================================

/// A one-hit victory whose reward crosses two levels, the second of which
/// teaches a skill.
#[test]
fn victory_presents_each_level_up_in_order() {
    println!("\n════════════════════════════════════════════════════════");
    println!("  Victory with a level-up cascade");
    println!("════════════════════════════════════════════════════════\n");

    let transcript = Transcript::default();
    let speaker = Speaker::default();
    let thunder = Skill::new("thunder", "Thunder", SkillKind::Damage, TargetRule::SingleEnemy);

    let hero = UnitTemplate::new("Hero")
        .with_base(StatBlock::new(100, 50, 200, 5, 95))
        .with_level_skill(3, thunder.clone());
    // reward: round(250 × 1.1) = 275 → level 2 (175 left) → level 3 (25 left)
    let slime = template("Slime", StatBlock::new(60, 0, 8, 2, 90)).with_exp_reward(250);

    let battle = midpoint_battle()
        .with_presenter(transcript.clone())
        .with_sound(speaker.clone());
    let mut battle = ready(battle, hero, slime);
    assert!(transcript.contains("A wild Slime appears!"));
    battle.drain_events();

    println!("⚔️  Hero attacks");
    battle.attack().expect("attack should be accepted");
    let elapsed = battle.settle();

    // strike 0.5s + end turn 0.5s + exp 1.5s + level 2 3s + level 3 3s
    // + "Learned Thunder!" 2s + wrap-up 1s + close 2s
    assert_eq!(elapsed, Duration::from_millis(13_500));
    assert!(battle.is_closed());
    assert_eq!(battle.state(), BattleState::Won);
    assert!(battle.pending_step().is_none());

    let events = battle.drain_events();
    println!("✓ {} events emitted", events.len());

    let levels: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::LevelUp(result) => Some(result.new_level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, [2, 3]);
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::PlayerWon)), 1);
    assert_eq!(
        count(&events, |e| matches!(e, BattleEvent::ExperienceGained { amount: 275 })),
        1
    );
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory
        })
    );

    let info = battle.exp_info();
    assert_eq!(info.level, 3);
    assert_eq!(info.current_exp, 25);
    assert_eq!(info.exp_to_next_level, 225);
    assert_eq!(info.total_exp_gained, 275);

    for line in [
        "Hero attacks!",
        "You won the battle!",
        "Gained 275 EXP!",
        "Hero reached Level 2!",
        "Hero reached Level 3!",
        "Learned Thunder!",
        "Battle Complete!",
    ] {
        assert!(transcript.contains(line), "missing line: {line}");
    }

    let player = battle.player().expect("battle has a player");
    assert!(player.knows_skill(&thunder.id));

    let sounds = speaker.0.lock().unwrap().clone();
    assert_eq!(
        sounds
            .iter()
            .filter(|s| **s == SoundEvent::LevelUp)
            .count(),
        2
    );
    assert_eq!(sounds.last(), Some(&SoundEvent::Victory));

    // The closed battle never resumes.
    assert!(!battle.advance());
    assert!(battle.attack().is_err());
    println!("✓ Battle closed cleanly\n");
}

#[test]
fn victory_without_level_up_skips_the_wrap_up() {
    let hero = template("Hero", StatBlock::new(100, 50, 200, 5, 95));
    let slime = template("Slime", StatBlock::new(60, 0, 8, 2, 90)).with_exp_reward(10);

    let transcript = Transcript::default();
    let mut battle = ready(
        midpoint_battle().with_presenter(transcript.clone()),
        hero,
        slime,
    );

    battle.attack().unwrap();
    // strike + end turn + exp + close
    assert_eq!(battle.settle(), Duration::from_millis(500 + 500 + 1_500 + 2_000));
    assert!(battle.is_closed());
    assert!(!transcript.contains("Battle Complete!"));
    assert_eq!(battle.exp_info().current_exp, 11);
}

#[test]
fn enemy_blow_ends_in_defeat() {
    let hero = template("Hero", StatBlock::new(10, 0, 1, 0, 95));
    let ogre = template("Ogre", StatBlock::new(300, 0, 50, 5, 90));

    let transcript = Transcript::default();
    let mut battle = ready(
        midpoint_battle().with_presenter(transcript.clone()),
        hero,
        ogre,
    );
    battle.drain_events();

    battle.on_attack();
    battle.settle();

    assert_eq!(battle.state(), BattleState::Lost);
    assert!(battle.is_closed());
    assert!(transcript.contains("You were defeated..."));

    let events = battle.drain_events();
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::PlayerLost)), 1);
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::PlayerWon)), 0);
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::Defeat
        })
    );
    assert_eq!(battle.exp_info().total_exp_gained, 0);
}

#[test]
fn defending_halves_the_enemy_hit() {
    let hero = template("Hero", StatBlock::default());
    let ogre = template("Ogre", StatBlock::new(300, 0, 25, 5, 90));
    let mut battle = ready(midpoint_battle(), hero, ogre);

    battle.defend().unwrap();
    assert!(battle.player().unwrap().is_defending());
    battle.settle();

    // max(1, 25 - 5) = 20, halved
    assert_eq!(battle.player().unwrap().health(), 90);
    assert!(!battle.player().unwrap().is_defending());

    battle.attack().unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().health(), 70);
}

#[test]
fn basic_heal_restores_thirty_percent() {
    let hero = template("Hero", StatBlock::default());
    let ogre = template("Ogre", StatBlock::new(300, 0, 45, 5, 90));
    let mut battle = ready(midpoint_battle(), hero, ogre);

    battle.attack().unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().health(), 60);
    battle.drain_events();

    battle.heal().unwrap();
    let events = battle.drain_events();
    assert!(events.contains(&BattleEvent::ActionResolved(ActionReport::Heal {
        actor: Side::Player,
        amount: 30,
    })));
    assert_eq!(battle.player().unwrap().health(), 90);
}

#[test]
fn unaffordable_skill_keeps_the_turn() {
    let fireball = Skill::new("fireball", "Fireball", SkillKind::Damage, TargetRule::SingleEnemy)
        .with_mana_cost(20);
    let hero = template("Hero", StatBlock::new(100, 15, 10, 5, 95)).with_skill(fireball);
    let slime = template("Slime", StatBlock::default());

    let transcript = Transcript::default();
    let mut battle = ready(
        midpoint_battle().with_presenter(transcript.clone()),
        hero,
        slime,
    );
    battle.drain_events();

    let err = battle.select_skill(0).unwrap_err();
    assert_eq!(
        err,
        ActionError::SkillUnavailable {
            skill: "fireball".into(),
            reason: GatingFailure::InsufficientMana {
                required: 20,
                available: 15
            },
        }
    );
    assert_eq!(battle.state(), BattleState::PlayerTurn);
    assert!(battle.awaiting_input());
    assert_eq!(battle.player().unwrap().mana(), 15);
    assert!(transcript.contains("Cannot use Fireball!"));
    assert!(matches!(
        battle.drain_events().as_slice(),
        [BattleEvent::SkillRejected { .. }]
    ));
}

#[test]
fn targeted_skill_resolves_after_selection() {
    let bolt = Skill::new("bolt", "Bolt", SkillKind::Damage, TargetRule::SingleEnemy)
        .with_mana_cost(10)
        .with_power(20)
        .with_critical_chance(0);
    let hero = template("Hero", StatBlock::default()).with_skill(bolt);
    let golem = template("Golem", StatBlock::new(300, 0, 1, 5, 90));
    let mut battle = ready(midpoint_battle(), hero, golem);

    battle.select_skill(0).unwrap();
    assert_eq!(battle.state(), BattleState::SelectingTarget);
    assert_eq!(
        battle.select_target(3),
        Err(ActionError::TargetOutOfRange {
            index: 3,
            available: 1
        })
    );

    battle.select_target(0).unwrap();
    battle.drain_events();
    battle.settle();

    // max(1, 20 + 10 - 5) = 25, then 25 - 5 = 20 through the golem's defense
    assert_eq!(battle.enemy().unwrap().health(), 280);
    assert_eq!(battle.player().unwrap().mana(), 40);
    assert_eq!(battle.state(), BattleState::PlayerTurn);
}

#[test]
fn self_heal_skill_skips_target_selection() {
    let mend = Skill::new("mend", "Mend", SkillKind::Heal, TargetRule::Caster)
        .with_mana_cost(10)
        .with_power(20);
    let hero = template("Hero", StatBlock::default()).with_skill(mend);
    let ogre = template("Ogre", StatBlock::new(300, 0, 45, 5, 90));
    let mut battle = ready(midpoint_battle(), hero, ogre);

    battle.attack().unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().health(), 60);
    battle.drain_events();

    battle.select_skill(0).unwrap();
    assert_ne!(battle.state(), BattleState::SelectingTarget);
    battle.settle();

    let healed = battle.drain_events().into_iter().find_map(|e| match e {
        BattleEvent::ActionResolved(ActionReport::Skill { target, result, .. }) => {
            Some((target, result.healing_done))
        }
        _ => None,
    });
    // (20 + 10) × 1.0
    assert_eq!(healed, Some((Side::Player, 30)));
    // 60 + 30, then the ogre's 40
    assert_eq!(battle.player().unwrap().health(), 50);
}

#[test]
fn heal_at_full_health_still_plays_the_heal_cue() {
    let mend = Skill::new("mend", "Mend", SkillKind::Heal, TargetRule::Caster)
        .with_mana_cost(10)
        .with_power(20);
    let hero = template("Hero", StatBlock::default()).with_skill(mend);
    let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));

    let transcript = Transcript::default();
    let speaker = Speaker::default();
    let battle = midpoint_battle()
        .with_presenter(transcript.clone())
        .with_sound(speaker.clone());
    let mut battle = ready(battle, hero, dummy);
    assert_eq!(battle.player().unwrap().health(), battle.player().unwrap().max_health());

    battle.select_skill(0).unwrap();
    battle.settle();

    assert!(transcript.contains("Mend healed 30 HP!"));
    assert!(speaker.0.lock().unwrap().contains(&SoundEvent::Heal));
}

#[test]
fn ally_skill_offers_the_caster_as_target() {
    let ward = Skill::new("ward", "Ward", SkillKind::Heal, TargetRule::SingleAlly).with_power(5);
    let hero = template("Hero", StatBlock::default()).with_skill(ward);
    let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));
    let mut battle = ready(midpoint_battle(), hero, dummy);

    battle.select_skill(0).unwrap();
    assert_eq!(battle.state(), BattleState::SelectingTarget);
    assert_eq!(battle.target_names(), ["Hero"]);

    battle.select_target(0).unwrap();
    battle.settle();
    assert_eq!(battle.state(), BattleState::PlayerTurn);
}

/// Remembers the focus cooldown shown on each player HUD refresh.
#[derive(Clone, Default)]
struct CooldownHud(Arc<Mutex<Vec<u32>>>);

impl Presenter for CooldownHud {
    fn set_hud(&mut self, side: Side, unit: &CombatUnit) {
        if side == Side::Player {
            let shown = unit
                .equipped_skills()
                .first()
                .map_or(0, |skill| unit.cooldown(&skill.id));
            self.0.lock().unwrap().push(shown);
        }
    }
}

#[test]
fn player_hud_shows_ticked_cooldown_on_turn_start() {
    let focus = Skill::new("focus", "Focus", SkillKind::Buff, TargetRule::Caster).with_cooldown(2);
    let hero = template("Hero", StatBlock::default()).with_skill(focus);
    let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));

    let hud = CooldownHud::default();
    let mut battle = ready(midpoint_battle().with_presenter(hud.clone()), hero, dummy);
    assert_eq!(hud.0.lock().unwrap().last(), Some(&0));

    battle.select_skill(0).unwrap();
    battle.settle();
    assert_eq!(battle.state(), BattleState::PlayerTurn);
    assert_eq!(hud.0.lock().unwrap().last(), Some(&1));
}

#[test]
fn cooldown_returns_on_the_owners_later_turn() {
    let focus = Skill::new("focus", "Focus", SkillKind::Buff, TargetRule::Caster).with_cooldown(2);
    let hero = template("Hero", StatBlock::default()).with_skill(focus.clone());
    let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));
    let mut battle = ready(midpoint_battle(), hero, dummy);

    battle.select_skill(0).unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().cooldown(&focus.id), 1);

    assert_eq!(
        battle.select_skill(0),
        Err(ActionError::SkillUnavailable {
            skill: focus.id.clone(),
            reason: GatingFailure::OnCooldown { remaining: 1 },
        })
    );

    battle.attack().unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().cooldown(&focus.id), 0);
    assert!(battle.select_skill(0).is_ok());
}

#[test]
fn cancelling_target_selection_does_not_tick_cooldowns() {
    let focus = Skill::new("focus", "Focus", SkillKind::Buff, TargetRule::Caster).with_cooldown(3);
    let bolt = Skill::new("bolt", "Bolt", SkillKind::Damage, TargetRule::SingleEnemy);
    let hero = template("Hero", StatBlock::default())
        .with_skill(focus.clone())
        .with_skill(bolt);
    let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));
    let mut battle = ready(midpoint_battle(), hero, dummy);

    battle.select_skill(0).unwrap();
    battle.settle();
    assert_eq!(battle.player().unwrap().cooldown(&focus.id), 2);

    battle.select_skill(1).unwrap();
    battle.cancel_target_selection().unwrap();
    battle.select_skill(1).unwrap();
    battle.cancel_target_selection().unwrap();

    assert_eq!(battle.player().unwrap().cooldown(&focus.id), 2);
}

#[test]
fn health_cost_that_kills_the_caster_loses_the_battle() {
    let pact = Skill::new("pact", "Blood Pact", SkillKind::Buff, TargetRule::Caster)
        .with_health_cost(100);
    let hero = template("Hero", StatBlock::default()).with_skill(pact);
    let slime = template("Slime", StatBlock::default());
    let mut battle = ready(midpoint_battle(), hero, slime);

    battle.select_skill(0).unwrap();
    battle.settle();

    assert_eq!(battle.state(), BattleState::Lost);
    assert!(battle.player().unwrap().is_dead());
    assert!(battle.is_closed());
}

#[test]
fn same_seed_replays_the_same_battle() {
    fn play(seed: u64) -> Vec<BattleEvent> {
        let bolt = Skill::new("bolt", "Bolt", SkillKind::Damage, TargetRule::SingleEnemy)
            .with_accuracy(70)
            .with_critical_chance(30);
        let hero = template("Hero", StatBlock::new(100, 500, 10, 5, 95)).with_skill(bolt);
        let dummy = template("Dummy", StatBlock::new(10_000, 0, 1, 0, 90));

        let mut battle = ready(
            BattleSystem::new(BattleConfig::default(), Dice::with_oracle(seed, PcgRng)),
            hero,
            dummy,
        );
        for _ in 0..8 {
            battle.select_skill(0).unwrap();
            battle.select_target(0).unwrap();
            battle.settle();
        }
        battle.drain_events()
    }

    assert_eq!(play(9), play(9));
}

#[test]
fn instant_pacing_settles_without_delay() {
    let config = BattleConfig::default().without_pacing();
    let mut battle = BattleSystem::new(config, Dice::new(1));
    battle.start_battle(
        CombatUnit::from_template(template("Hero", StatBlock::new(100, 50, 500, 5, 95))),
        CombatUnit::from_template(template("Slime", StatBlock::default())),
    );

    assert!(battle.pending_step().unwrap().is_immediate());
    assert_eq!(battle.settle(), Duration::ZERO);

    battle.attack().unwrap();
    assert_eq!(battle.settle(), Duration::ZERO);
    assert!(battle.is_closed());
}
