//! Glue code tying content, the runtime, and the terminal together.
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use battle_content::ContentFactory;
use battle_core::{BattleConfig, BattleEvent, CombatUnit};
use battle_runtime::{BattleHandle, BattleRuntime, RuntimeConfig, RuntimeError};

use crate::config::CliConfig;
use crate::input::{CliCommand, HELP, parse_line};
use crate::presentation::{LoggedSound, StdoutPresenter, exp_bar};

pub struct CliApp {
    config: CliConfig,
    battle: BattleConfig,
    player: CombatUnit,
    enemy: CombatUnit,
}

pub struct CliAppBuilder {
    config: CliConfig,
}

impl CliAppBuilder {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Loads content from the data directory and spawns both combatants.
    pub fn build(self) -> Result<CliApp> {
        let factory = ContentFactory::new(&self.config.data_dir);

        let mut battle = factory.load_config()?;
        if self.config.instant {
            battle = battle.without_pacing();
        }
        let skills = factory.load_skills()?;
        let roster = factory.load_roster(&skills)?;

        let spawn = |id: &str| {
            roster.spawn(id).with_context(|| {
                let known: Vec<&str> = roster.ids().collect();
                format!("Unknown unit '{}' (known: {})", id, known.join(", "))
            })
        };
        let player = spawn(&self.config.player)?;
        let enemy = spawn(&self.config.enemy)?;

        tracing::info!(
            data_dir = %factory.data_dir().display(),
            skills = skills.len(),
            units = roster.len(),
            "content loaded"
        );

        Ok(CliApp {
            config: self.config,
            battle,
            player,
            enemy,
        })
    }
}

impl CliApp {
    pub fn builder(config: CliConfig) -> CliAppBuilder {
        CliAppBuilder::new(config)
    }

    pub async fn run(self) -> Result<()> {
        let seed = self.config.seed.unwrap_or_else(clock_seed);
        tracing::info!(seed, "CLI client starting...");

        let runtime = BattleRuntime::builder()
            .config(RuntimeConfig {
                battle: self.battle,
                seed,
                ..RuntimeConfig::default()
            })
            .presenter(StdoutPresenter)
            .sound(LoggedSound)
            .build();

        let handle = runtime.handle();
        let mut events = handle.subscribe();
        handle.start_battle(self.player, self.enemy).await?;
        println!("{HELP}");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match parse_line(&line) {
                        Ok(Some(CliCommand::Quit)) => break,
                        Ok(Some(command)) => dispatch(&handle, command).await?,
                        Ok(None) => {}
                        Err(err) => println!("{err}"),
                    }
                }
                event = events.recv() => match event {
                    Ok(BattleEvent::BattleEnded { outcome }) => {
                        tracing::info!(%outcome, "battle over");
                        break;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        runtime.shutdown().await?;
        tracing::info!("CLI client exiting");

        Ok(())
    }
}

async fn dispatch(handle: &BattleHandle, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Submit(input) => match handle.input(input).await {
            Ok(()) => {}
            // a refused input is feedback for the player, not a failure
            Err(RuntimeError::Action(err)) => println!("{err}"),
            Err(err) => return Err(err.into()),
        },
        CliCommand::ExpInfo => {
            let info = handle.exp_info().await?;
            println!(
                "Level {}  EXP {}/{}  {}  (+{} this battle)",
                info.level,
                info.current_exp,
                info.exp_to_next_level,
                exp_bar(info.exp_percentage),
                info.total_exp_gained
            );
        }
        CliCommand::Help => println!("{HELP}"),
        CliCommand::Quit => {}
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
