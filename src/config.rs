//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::StreakPolicy;
use crate::services::progress::{ProgressSettings, DEFAULT_MINUTES_PER_EXERCISE};
use crate::services::Permission;

/// Upper bound for `MINUTES_PER_EXERCISE`: one day.
const MAX_MINUTES_PER_EXERCISE: u32 = 24 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON store file; `None` keeps everything in memory
    pub data_path: Option<PathBuf>,
    /// Minutes credited to the week bucket per completed exercise
    pub minutes_per_exercise: u32,
    /// How streak days are detected
    pub streak_policy: StreakPolicy,
    /// Initial notification permission for the log notifier
    pub notification_permission: Permission,
    /// Store the demo catalog when the store has none
    pub seed_demo_data: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_path: None,
            minutes_per_exercise: DEFAULT_MINUTES_PER_EXERCISE,
            streak_policy: StreakPolicy::LastActiveDate,
            notification_permission: Permission::Granted,
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_path: env::var("RECOVERFLOW_DATA_PATH")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            minutes_per_exercise: parse_minutes()?,
            streak_policy: parse_var("STREAK_POLICY", StreakPolicy::LastActiveDate)?,
            notification_permission: parse_var("NOTIFICATION_PERMISSION", Permission::Prompt)?,
            seed_demo_data: parse_var("SEED_DEMO_DATA", true)?,
        })
    }

    pub fn progress_settings(&self) -> ProgressSettings {
        ProgressSettings {
            streak_policy: self.streak_policy,
            minutes_per_exercise: self.minutes_per_exercise,
        }
    }
}

/// Parse `name` if set, otherwise use `default`.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: value.clone(),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_minutes() -> Result<u32, ConfigError> {
    let minutes = parse_var("MINUTES_PER_EXERCISE", DEFAULT_MINUTES_PER_EXERCISE)?;
    if minutes > MAX_MINUTES_PER_EXERCISE {
        return Err(ConfigError::OutOfRange {
            name: "MINUTES_PER_EXERCISE",
            value: minutes,
            max: MAX_MINUTES_PER_EXERCISE,
        });
    }
    Ok(minutes)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Environment variable {name} is {value}, above the maximum of {max}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        max: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Single test so env mutations don't race each other
        env::remove_var("RECOVERFLOW_DATA_PATH");
        env::remove_var("MINUTES_PER_EXERCISE");
        env::set_var("STREAK_POLICY", "week_bucket");
        env::set_var("NOTIFICATION_PERMISSION", "granted");
        env::set_var("SEED_DEMO_DATA", "false");

        let config = Config::from_env().expect("Config should load");

        assert!(config.data_path.is_none());
        assert_eq!(config.minutes_per_exercise, 3);
        assert_eq!(config.streak_policy, StreakPolicy::WeekBucket);
        assert_eq!(config.notification_permission, Permission::Granted);
        assert!(!config.seed_demo_data);

        env::set_var("MINUTES_PER_EXERCISE", "lots");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MINUTES_PER_EXERCISE"));

        env::set_var("MINUTES_PER_EXERCISE", "4294967295");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { max: 1440, .. }));

        env::set_var("MINUTES_PER_EXERCISE", "5");
        env::set_var("RECOVERFLOW_DATA_PATH", "/tmp/recoverflow.json");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.progress_settings().minutes_per_exercise, 5);
        assert_eq!(
            config.data_path,
            Some(PathBuf::from("/tmp/recoverflow.json"))
        );

        for name in [
            "RECOVERFLOW_DATA_PATH",
            "MINUTES_PER_EXERCISE",
            "STREAK_POLICY",
            "NOTIFICATION_PERMISSION",
            "SEED_DEMO_DATA",
        ] {
            env::remove_var(name);
        }
    }
}
