//! Line-oriented rendering of battle presentation calls.
use std::io::{self, Write};

use battle_core::{CombatUnit, LevelUpResult, Presenter, Side, Skill, SoundEvent, SoundSink};

/// Writes every presentation call to stdout as plain text.
#[derive(Debug, Default)]
pub struct StdoutPresenter;

impl StdoutPresenter {
    fn line(&self, text: impl AsRef<str>) {
        let mut out = io::stdout().lock();
        // stdout going away is not worth interrupting the battle for
        let _ = writeln!(out, "{}", text.as_ref());
    }
}

impl Presenter for StdoutPresenter {
    fn show_message(&mut self, text: &str) {
        self.line(format!("» {text}"));
    }

    fn set_hud(&mut self, side: Side, unit: &CombatUnit) {
        self.line(format!(
            "[{side}] {} Lv.{}  HP {}/{}  MP {}/{}",
            unit.name(),
            unit.level(),
            unit.health(),
            unit.max_health(),
            unit.mana(),
            unit.max_mana()
        ));
        if side == Side::Player {
            for (slot, skill) in unit.equipped_skills().iter().enumerate() {
                let cooldown = unit.cooldown(&skill.id);
                let ready = if cooldown > 0 {
                    format!(" (ready in {cooldown})")
                } else {
                    String::new()
                };
                self.line(format!(
                    "    s {}: {} [{} MP]{ready}",
                    slot + 1,
                    skill.name,
                    skill.mana_cost
                ));
            }
        }
    }

    fn set_health(&mut self, side: Side, unit: &CombatUnit) {
        self.line(format!(
            "[{side}] {} HP {}/{}",
            unit.name(),
            unit.health(),
            unit.max_health()
        ));
    }

    fn set_defense_visual(&mut self, side: Side, defending: bool) {
        if defending {
            self.line(format!("[{side}] guarding"));
        }
    }

    fn update_exp_bar(&mut self, percentage: f32) {
        self.line(format!("EXP {}", exp_bar(percentage)));
    }

    fn show_targets(&mut self, candidates: &[&str]) {
        for (index, name) in candidates.iter().enumerate() {
            self.line(format!("    t {}: {name}", index + 1));
        }
    }

    fn show_level_up(&mut self, result: &LevelUpResult) {
        for line in result.stat_increases().summary_lines() {
            self.line(format!("    {line}"));
        }
    }

    fn show_skill_learned(&mut self, skill: &Skill) {
        if !skill.description.is_empty() {
            self.line(format!("    {}", skill.description));
        }
    }
}

/// Ten-cell bar with the percentage appended.
pub fn exp_bar(percentage: f32) -> String {
    let percentage = percentage.clamp(0.0, 1.0);
    let filled = (percentage * 10.0).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        percentage * 100.0
    )
}

/// Reports audio cues to the log instead of a speaker.
#[derive(Debug, Default)]
pub struct LoggedSound;

impl SoundSink for LoggedSound {
    fn play(&mut self, event: SoundEvent) {
        tracing::debug!(sound = %event, "sound cue");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_bar_fills_proportionally() {
        assert_eq!(exp_bar(0.0), "[----------]   0%");
        assert_eq!(exp_bar(0.25), "[###-------]  25%");
        assert_eq!(exp_bar(1.0), "[##########] 100%");
        assert_eq!(exp_bar(3.0), "[##########] 100%");
    }
}
