//! Terminal client configuration.
use std::env;
use std::path::PathBuf;

/// Where content comes from and who fights.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    /// Fixed seed for reproducible battles; a clock-derived one otherwise.
    pub seed: Option<u64>,
    pub player: String,
    pub enemy: String,
    /// Skip every pacing delay.
    pub instant: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            seed: None,
            player: "hero".to_owned(),
            enemy: "slime".to_owned(),
            instant: false,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Directory holding `skills.ron`, `units.ron` and `battle.toml` (default: `data`)
    /// - `BATTLE_SEED` - Roll seed (default: derived from the clock)
    /// - `BATTLE_PLAYER` - Unit id of the player (default: `hero`)
    /// - `BATTLE_ENEMY` - Unit id of the enemy (default: `slime`)
    /// - `BATTLE_INSTANT` - `true` to disable pacing delays (default: `false`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("BATTLE_DATA_DIR") {
            config.data_dir = dir;
        }
        config.seed = read_env::<u64>("BATTLE_SEED");
        if let Some(player) = read_env::<String>("BATTLE_PLAYER") {
            config.player = player;
        }
        if let Some(enemy) = read_env::<String>("BATTLE_ENEMY") {
            config.enemy = enemy;
        }
        if let Some(instant) = read_env::<bool>("BATTLE_INSTANT") {
            config.instant = instant;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
