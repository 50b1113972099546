use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::walkthrough::WalkthroughSettings;
use crate::watchers::{CardRules, EditRules};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub walkthrough: WalkthroughConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub cards: CardRules,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Walkthrough timings, all in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkthroughConfig {
    /// Interval between watcher polls (default: 400)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// How long the card toast stays up (default: 2000)
    #[serde(default = "default_toast_visible")]
    pub toast_visible_ms: u64,
    /// Fade-out before the toast is removed (default: 300)
    #[serde(default = "default_toast_fade")]
    pub toast_fade_ms: u64,
    #[serde(default = "default_entry_activation_delay")]
    pub entry_activation_delay_ms: u64,
    #[serde(default = "default_scroll_delay")]
    pub scroll_delay_ms: u64,
    /// Particles per confetti burst
    #[serde(default = "default_confetti_count")]
    pub confetti_count: u32,
    /// Whether the intro step has its own "get started" button
    #[serde(default = "default_intro_video")]
    pub intro_video: bool,
}

fn default_poll_interval() -> u64 {
    400
}

fn default_toast_visible() -> u64 {
    2000
}

fn default_toast_fade() -> u64 {
    300
}

fn default_entry_activation_delay() -> u64 {
    150
}

fn default_scroll_delay() -> u64 {
    100
}

fn default_confetti_count() -> u32 {
    50
}

fn default_intro_video() -> bool {
    true
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            toast_visible_ms: default_toast_visible(),
            toast_fade_ms: default_toast_fade(),
            entry_activation_delay_ms: default_entry_activation_delay(),
            scroll_delay_ms: default_scroll_delay(),
            confetti_count: default_confetti_count(),
            intro_video: default_intro_video(),
        }
    }
}

/// What the headline edit must not be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_seed_phrases")]
    pub seed_phrases: Vec<String>,
}

fn default_placeholder() -> String {
    EditRules::default().placeholder
}

fn default_seed_phrases() -> Vec<String> {
    EditRules::default().seed_phrases
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            seed_phrases: default_seed_phrases(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
    /// How long a confetti overlay stays on screen
    #[serde(default = "default_confetti_ms")]
    pub confetti_ms: u64,
}

fn default_refresh_rate() -> u64 {
    50
}

fn default_confetti_ms() -> u64 {
    1500
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
            confetti_ms: default_confetti_ms(),
        }
    }
}

/// Page-visit telemetry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,
    /// File name under the state directory
    #[serde(default = "default_telemetry_file")]
    pub file_name: String,
}

fn default_telemetry_enabled() -> bool {
    true
}

fn default_telemetry_file() -> String {
    "telemetry.jsonl".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_telemetry_enabled(),
            file_name: default_telemetry_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".playground-tour".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

impl Config {
    /// Project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".playground-tour/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the tour runs without any config file
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/playground-tour/
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("playground-tour").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PLAYGROUND_TOUR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to .playground-tour/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::local_config_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        std::fs::write(config_path, self.to_toml()?).context("Failed to write config file")?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    pub fn edit_rules(&self) -> EditRules {
        EditRules {
            placeholder: self.validation.placeholder.clone(),
            seed_phrases: self.validation.seed_phrases.clone(),
        }
    }

    /// Walkthrough settings built from this config
    pub fn settings(&self) -> WalkthroughSettings {
        let w = &self.walkthrough;
        WalkthroughSettings {
            poll_interval: Duration::from_millis(w.poll_interval_ms),
            toast_visible: Duration::from_millis(w.toast_visible_ms),
            toast_fade: Duration::from_millis(w.toast_fade_ms),
            entry_activation_delay: Duration::from_millis(w.entry_activation_delay_ms),
            scroll_delay: Duration::from_millis(w.scroll_delay_ms),
            confetti_particles: w.confetti_count,
            intro_video: w.intro_video,
            edit_rules: self.edit_rules(),
            cards: self.cards,
        }
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    pub fn telemetry_path(&self) -> PathBuf {
        self.state_path().join(&self.telemetry.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_walkthrough_defaults() {
        let config = Config::default();
        assert_eq!(config.settings(), WalkthroughSettings::default());
    }

    #[test]
    fn test_defaults_survive_toml() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [walkthrough]
            poll_interval_ms = 100

            [cards]
            target_count = 5
            delete_target = 2
            "#,
        )
        .unwrap();
        assert_eq!(parsed.walkthrough.poll_interval_ms, 100);
        assert_eq!(parsed.walkthrough.toast_visible_ms, 2000);
        assert_eq!(parsed.cards.target_count, 5);
        assert_eq!(parsed.validation.placeholder, "___");
    }

    #[test]
    fn test_saved_config_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.walkthrough.confetti_count = 12;
        config.cards.target_count = 4;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.walkthrough.confetti_count, 12);
        assert_eq!(loaded.cards.target_count, 4);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tour.toml");
        std::fs::write(
            &path,
            "[walkthrough]\nintro_video = false\n\n[telemetry]\nfile_name = \"visits.jsonl\"\n",
        )
        .unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert!(!config.walkthrough.intro_video);
        assert!(config.telemetry_path().ends_with("visits.jsonl"));
    }

    #[test]
    fn test_absolute_state_path_kept() {
        let mut config = Config::default();
        config.paths.state = "/tmp/tour-state".to_string();
        assert_eq!(config.logs_path(), PathBuf::from("/tmp/tour-state/logs"));
    }
}
