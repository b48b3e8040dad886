//! Input processing for the CLI client.
//!
//! This module owns the line-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings.

use battle_runtime::PlayerInput;
use thiserror::Error;

/// High-level outcome of parsing one input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Forward a decision to the battle.
    Submit(PlayerInput),
    /// Print the experience bar.
    ExpInfo,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (type ? for help)")]
    Unknown(String),

    #[error("'{0}' needs a number, e.g. '{0} 1'")]
    MissingNumber(char),

    #[error("'{0}' is not a number from 1 upwards")]
    BadNumber(String),
}

pub const HELP: &str = "\
Commands:
  a        attack
  d        defend
  h        drink a healing potion
  s <n>    use equipped skill n
  t <n>    aim the selected skill at target n
  c        cancel target selection
  x        show experience
  ?        show this help
  q        quit";

/// Parses one line. Numbers are 1-based on screen and 0-based afterwards.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<CliCommand>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "a" | "attack" => CliCommand::Submit(PlayerInput::Attack),
        "d" | "defend" => CliCommand::Submit(PlayerInput::Defend),
        "h" | "heal" => CliCommand::Submit(PlayerInput::Heal),
        "s" | "skill" => {
            CliCommand::Submit(PlayerInput::SelectSkill(number(words.next(), 's')?))
        }
        "t" | "target" => {
            CliCommand::Submit(PlayerInput::SelectTarget(number(words.next(), 't')?))
        }
        "c" | "cancel" => CliCommand::Submit(PlayerInput::CancelTargetSelection),
        "x" | "exp" => CliCommand::ExpInfo,
        "?" | "help" => CliCommand::Help,
        "q" | "quit" => CliCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_owned())),
    };

    Ok(Some(command))
}

fn number(word: Option<&str>, command: char) -> Result<usize, ParseError> {
    let word = word.ok_or(ParseError::MissingNumber(command))?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadNumber(word.to_owned())),
    }
}
