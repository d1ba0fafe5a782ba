//! Configuration management for dicebox
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/dicebox/config.toml

use crate::roll::engine::DEFAULT_SINGLE_ROLL_TICKS;
use crate::types::{FaceOptions, DEFAULT_FACE_OPTIONS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    /// Initial state of the "include sums" checkbox
    pub show_sums: bool,
    pub timing: Timing,
    pub face_options: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Gruvbox,
            show_sums: false,
            timing: Timing::default(),
            face_options: DEFAULT_FACE_OPTIONS.to_vec(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dicebox");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Face counts offered in the dropdown
    pub fn faces(&self) -> FaceOptions {
        FaceOptions::from_list(&self.face_options)
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Gruvbox,
        }
    }
}

/// Roll animation timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Milliseconds between regenerations
    pub tick_ms: u64,
    /// Regenerations performed by a single roll
    pub single_roll_ticks: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_ms: 15,
            single_roll_ticks: DEFAULT_SINGLE_ROLL_TICKS,
        }
    }
}

impl Timing {
    /// Tick interval, never shorter than 1ms
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Gruvbox);
        assert!(!config.show_sums);
        assert_eq!(config.timing.tick_ms, 15);
        assert_eq!(config.timing.single_roll_ticks, 25);
        assert_eq!(config.faces(), FaceOptions::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
theme = "nord"
show_sums = true

[timing]
tick_ms = 40
"#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeName::Nord);
        assert!(config.show_sums);
        assert_eq!(config.timing.tick_ms, 40);
        assert_eq!(config.timing.single_roll_ticks, 25);
        assert_eq!(config.face_options, DEFAULT_FACE_OPTIONS.to_vec());
    }

    #[test]
    fn test_custom_face_options() {
        let config = Config::parse("face_options = [20, 6, 1, 4]").unwrap();
        assert_eq!(config.faces().as_slice(), &[4, 6, 20]);
    }

    #[test]
    fn test_invalid_theme_rejected() {
        assert!(Config::parse(r#"theme = "solarized""#).is_err());
    }

    #[test]
    fn test_tick_interval_floor() {
        let timing = Timing { tick_ms: 0, single_roll_ticks: 1 };
        assert_eq!(timing.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config { theme: ThemeName::Transparent, ..Config::default() };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.theme, ThemeName::Transparent);
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::Gruvbox;
        assert_eq!(theme.next(), ThemeName::Nord);
        assert_eq!(theme.next().next(), ThemeName::Transparent);
        assert_eq!(theme.next().next().next(), ThemeName::Gruvbox);
    }
}
