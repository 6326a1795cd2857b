//! Headless runner configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use battle_runtime::RuntimeConfig;

/// Configuration for one auto-battle run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub seed: u64,
    pub encounter: String,
    /// Content directory; the embedded data set is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Restarts offered after a defeat, each taken with the party healed.
    pub retries: u32,
    pub step_delay: Duration,
    /// Directory for the log file; logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            encounter: "meadow".to_owned(),
            data_dir: None,
            retries: 0,
            step_delay: Duration::ZERO,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Seed for the battle's random source (default: 0)
    /// - `BATTLE_ENCOUNTER` - Encounter id to fight (default: meadow)
    /// - `BATTLE_DATA_DIR` - Content directory (default: embedded data)
    /// - `BATTLE_RETRIES` - Healed restarts after a defeat (default: 0)
    /// - `BATTLE_STEP_DELAY_MS` - Pause between presentation beats (default: 0)
    /// - `BATTLE_LOG_DIR` - Write a `battle.log` file here (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Ok(encounter) = env::var("BATTLE_ENCOUNTER") {
            config.encounter = encounter;
        }
        config.data_dir = env::var_os("BATTLE_DATA_DIR").map(PathBuf::from);
        if let Some(retries) = read_env::<u32>("BATTLE_RETRIES") {
            config.retries = retries;
        }
        if let Some(ms) = read_env::<u64>("BATTLE_STEP_DELAY_MS") {
            config.step_delay = Duration::from_millis(ms);
        }
        config.log_dir = env::var_os("BATTLE_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Runtime settings for a fully automated battle.
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            step_delay: self.step_delay,
            auto_party: true,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_runs_drive_the_party_too() {
        let config = CliConfig {
            step_delay: Duration::from_millis(250),
            ..CliConfig::default()
        };
        let runtime = config.runtime();

        assert!(runtime.auto_party);
        assert_eq!(runtime.step_delay, Duration::from_millis(250));
        assert_eq!(runtime.max_turns, RuntimeConfig::default().max_turns);
        assert_eq!(CliConfig::default().encounter, "meadow");
    }
}
