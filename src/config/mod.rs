//! Configuration module
//!
//! Handles loading and saving MacSlide configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::panel::{PanelConfig, PlannerConfig, Size};
use crate::screen::{EdgeTriggerConfig, ScreenEdge};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Edge gesture settings
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Panel layout and timing settings
    #[serde(default)]
    pub panel: PanelSection,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Human-readable name for this deployment
    #[serde(default = "default_name")]
    pub name: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log file path (optional)
    pub log_file: Option<PathBuf>,
}

fn default_name() -> String {
    "MacSlide".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            verbose: false,
            log_file: None,
        }
    }
}

/// Edge gesture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Which screen edge triggers the panel
    #[serde(default = "default_edge")]
    pub edge: ScreenEdge,
    /// Hit threshold in points from the edge (floored at 1)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Dwell time before the gesture fires (ms)
    #[serde(default = "default_dwell")]
    pub dwell_ms: u64,
    /// Minimum spacing between fires (ms, floored at 100)
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u64,
    /// Fallback poll interval for the detector (ms)
    #[serde(default = "default_edge_poll")]
    pub poll_interval_ms: u64,
}

fn default_edge() -> ScreenEdge {
    ScreenEdge::Right
}

fn default_threshold() -> f64 {
    2.0
}

fn default_dwell() -> u64 {
    150
}

fn default_cooldown() -> u64 {
    600
}

fn default_edge_poll() -> u64 {
    300
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            edge: default_edge(),
            threshold: default_threshold(),
            dwell_ms: default_dwell(),
            cooldown_ms: default_cooldown(),
            poll_interval_ms: default_edge_poll(),
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSection {
    /// Default panel width in points
    #[serde(default = "default_width")]
    pub width: f64,
    /// Default panel height in points
    #[serde(default = "default_height")]
    pub height: f64,
    /// Minimum panel width
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    /// Minimum panel height
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    /// Distance the panel protrudes while hidden (0 = fully off-screen)
    #[serde(default)]
    pub peek_offset: f64,
    /// Idle time outside the panel before auto-hide (ms)
    #[serde(default = "default_auto_hide_delay")]
    pub auto_hide_delay_ms: u64,
    /// Auto-hide cursor poll interval (ms)
    #[serde(default = "default_auto_hide_poll")]
    pub auto_hide_poll_ms: u64,
    /// Slide animation duration (ms)
    #[serde(default = "default_animation")]
    pub animation_ms: u64,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    900.0
}

fn default_min_width() -> f64 {
    320.0
}

fn default_min_height() -> f64 {
    360.0
}

fn default_auto_hide_delay() -> u64 {
    500
}

fn default_auto_hide_poll() -> u64 {
    200
}

fn default_animation() -> u64 {
    350
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            min_width: default_min_width(),
            min_height: default_min_height(),
            peek_offset: 0.0,
            auto_hide_delay_ms: default_auto_hide_delay(),
            auto_hide_poll_ms: default_auto_hide_poll(),
            animation_ms: default_animation(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> ConfigResult<Self> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("macslide/config.toml")),
            Some(PathBuf::from("./macslide.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Build the edge detector configuration (floors applied).
    pub fn trigger_config(&self) -> EdgeTriggerConfig {
        EdgeTriggerConfig::new(
            self.gesture.edge,
            self.gesture.threshold,
            Duration::from_millis(self.gesture.dwell_ms),
            Duration::from_millis(self.gesture.cooldown_ms),
        )
    }

    /// Build the panel state machine configuration.
    pub fn panel_config(&self) -> PanelConfig {
        PanelConfig {
            planner: PlannerConfig {
                default_size: Size::new(self.panel.width, self.panel.height),
                min_size: Size::new(self.panel.min_width, self.panel.min_height),
                peek_offset: self.panel.peek_offset,
            },
            auto_hide_delay: Duration::from_millis(self.panel.auto_hide_delay_ms),
            animation: Duration::from_millis(self.panel.animation_ms),
        }
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    let config = Config {
        general: GeneralConfig {
            name: "MacSlide".to_string(),
            verbose: false,
            log_file: None,
        },
        gesture: GestureConfig {
            edge: ScreenEdge::Right,
            threshold: 2.0,
            ..Default::default()
        },
        ..Default::default()
    };

    toml::to_string_pretty(&config).unwrap_or_default()
}
