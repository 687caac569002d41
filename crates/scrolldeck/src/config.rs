use anyhow::{Context, Result};
use scrolldeck::nav::{ControllerOptions, SettleMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::THEME_NAMES;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "scrolldeck";

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.windowed",
    "navigation.show_progress",
    "navigation.show_dots",
    "navigation.show_number",
    "navigation.show_keyboard_hint",
    "navigation.show_fullscreen_button",
    "navigation.back_link",
    "navigation.dot_limit",
    "navigation.scroll_debounce_ms",
    "navigation.settle_delay_ms",
    "navigation.completion_timeout_ms",
    "navigation.swipe_threshold",
    "navigation.settle_mode",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<ControllerOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

impl Config {
    /// `<config_dir>/scrolldeck/config.yaml`
    pub fn path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("No config directory on this platform")?;
        Ok(base.join(APP_DIR).join(FILENAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// The saved config, or defaults when there is none. A config that
    /// exists but cannot be read is reported and ignored.
    pub fn load_or_default() -> Self {
        let Ok(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            tracing::warn!("{err:#}; using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let body = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("# scrolldeck configuration\n{body}"))
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        self.navigation.clone().unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                if !THEME_NAMES.contains(&value) {
                    anyhow::bail!("Invalid theme: {value}. Must be one of: {}", THEME_NAMES.join(", "));
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.windowed" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parse_bool(key, value)?);
            }
            _ => {
                let Some(field) = key.strip_prefix("navigation.") else {
                    anyhow::bail!(
                        "Unknown config key: {key}. Valid keys: {}",
                        VALID_KEYS.join(", ")
                    );
                };
                self.set_navigation(key, field, value)?;
            }
        }
        Ok(())
    }

    fn set_navigation(&mut self, key: &str, field: &str, value: &str) -> Result<()> {
        let nav = self
            .navigation
            .get_or_insert_with(ControllerOptions::default);
        match field {
            "show_progress" => nav.show_progress = parse_bool(key, value)?,
            "show_dots" => nav.show_dots = parse_bool(key, value)?,
            "show_number" => nav.show_number = parse_bool(key, value)?,
            "show_keyboard_hint" => nav.show_keyboard_hint = parse_bool(key, value)?,
            "show_fullscreen_button" => nav.show_fullscreen_button = parse_bool(key, value)?,
            "back_link" => {
                nav.back_link = (!value.is_empty()).then(|| value.to_string());
            }
            "dot_limit" => nav.dot_limit = parse_number(key, value)?,
            "scroll_debounce_ms" => nav.scroll_debounce_ms = parse_number(key, value)?,
            "settle_delay_ms" => nav.settle_delay_ms = parse_number(key, value)?,
            "completion_timeout_ms" => nav.completion_timeout_ms = parse_number(key, value)?,
            "swipe_threshold" => {
                let threshold: f32 = parse_number(key, value)?;
                if !threshold.is_finite() || threshold < 0.0 {
                    anyhow::bail!("Invalid {key}: {value}. Must be a non-negative number.");
                }
                nav.swipe_threshold = threshold;
            }
            "settle_mode" => {
                nav.settle_mode = SettleMode::from_name(value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Invalid settle_mode: {value}. Must be 'auto', 'timer', or 'scroll-completion'."
                    )
                })?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be 'true' or 'false'."),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {key}: {value}. Must be a number."))
}
