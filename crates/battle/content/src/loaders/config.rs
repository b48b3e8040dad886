//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules and pacing from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &BattleConfig) -> LoadResult<()> {
    if !(0.0..=1.0).contains(&config.defense_reduction) {
        anyhow::bail!(
            "defense_reduction must be within [0, 1], got {}",
            config.defense_reduction
        );
    }
    if config.heal_fraction < 0.0 {
        anyhow::bail!("heal_fraction must not be negative, got {}", config.heal_fraction);
    }
    if config.critical_multiplier < 1.0 {
        anyhow::bail!(
            "critical_multiplier must be at least 1.0, got {}",
            config.critical_multiplier
        );
    }
    let variance = config.damage_variance;
    if variance.min <= 0.0 || variance.min > variance.max {
        anyhow::bail!(
            "damage_variance must satisfy 0 < min <= max, got {}..{}",
            variance.min,
            variance.max
        );
    }
    Ok(())
}
