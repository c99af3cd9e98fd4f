// ABOUTME: Configuration loading for worklog.
// ABOUTME: Reads ~/.worklog/config.toml with serde defaults and CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub reminder: ReminderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            reminder: ReminderConfig::default(),
        }
    }
}

/// Scheduled daily report configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Destination identifier handed to the delivery collaborator.
    pub destination: String,
    /// Local wall-clock hour the daily report fires (0-23).
    pub hour: u32,
    /// Local wall-clock minute the daily report fires (0-59).
    pub minute: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            destination: "reports".to_string(),
            hour: 22,
            minute: 0,
        }
    }
}

/// One-shot session reminder configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Minutes after a session start before the reminder fires.
    pub minutes: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { minutes: 60 }
    }
}

impl Config {
    /// Load config from ~/.worklog/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a user-named path. Unlike the default location, a
    /// missing file here is almost certainly a typo, so it is an error rather
    /// than a silent fallback to defaults.
    pub fn load_explicit(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        Self::load_from(path)
    }

    /// Load config from a path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".worklog")
            .join("config.toml")
    }

    /// The daily fire time as a wall-clock time, validated at load.
    pub fn fire_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.report.hour, self.report.minute, 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(22, 0, 0).expect("valid fallback time"))
    }

    /// The reminder interval as a std duration.
    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder.minutes * 60)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.report.hour > 23 {
            anyhow::bail!("report.hour must be 0-23, got {}", self.report.hour);
        }
        if self.report.minute > 59 {
            anyhow::bail!("report.minute must be 0-59, got {}", self.report.minute);
        }
        if self.reminder.minutes == 0 {
            anyhow::bail!("reminder.minutes must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.report.destination, "reports");
        assert_eq!(config.report.hour, 22);
        assert_eq!(config.report.minute, 0);
        assert_eq!(config.reminder.minutes, 60);
    }

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
[report]
destination = "standup"
hour = 18
minute = 30

[reminder]
minutes = 45
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.report.destination, "standup");
        assert_eq!(config.report.hour, 18);
        assert_eq!(config.report.minute, 30);
        assert_eq!(config.reminder.minutes, 45);
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let toml_str = r#"
[report]
destination = "team-channel"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.report.destination, "team-channel");
        assert_eq!(config.report.hour, 22);
        assert_eq!(config.reminder.minutes, 60);
    }

    #[test]
    fn load_from_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.report.hour, 22);
    }

    #[test]
    fn load_explicit_errors_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_explicit(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_explicit_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\ndestination = \"standup\"\n").unwrap();
        let config = Config::load_explicit(&path).unwrap();
        assert_eq!(config.report.destination, "standup");
    }

    #[test]
    fn load_from_rejects_out_of_range_fire_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\nhour = 25\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn fire_time_and_reminder_interval_convert() {
        let config = Config::default();
        assert_eq!(config.fire_time(), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(config.reminder_interval(), Duration::from_secs(3600));
    }
}
