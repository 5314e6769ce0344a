//! Configuration file handling.
//!
//! The dashboard reads an optional `launch-dash.toml` from the working
//! directory. Every key has a default, so an absent file is fine; a file
//! that exists but does not parse is a startup error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// Payload range control.
    #[serde(default)]
    pub slider: SliderConfig,
}

/// Where the launch records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV, JSON or Parquet file loaded at startup.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("spacex_launch_dash.csv")
}

/// Window and heading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_window_width")]
    pub window_width: f32,

    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

fn default_window_width() -> f32 {
    1200.0
}

fn default_window_height() -> f32 {
    900.0
}

/// Bounds, step and tick marks of the payload range sliders (kg).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default)]
    pub min: f64,

    #[serde(default = "default_slider_max")]
    pub max: f64,

    #[serde(default = "default_slider_step")]
    pub step: f64,

    #[serde(default = "default_slider_marks")]
    pub marks: Vec<f64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_slider_max(),
            step: default_slider_step(),
            marks: default_slider_marks(),
        }
    }
}

fn default_slider_max() -> f64 {
    10_000.0
}

fn default_slider_step() -> f64 {
    1_000.0
}

fn default_slider_marks() -> Vec<f64> {
    vec![0.0, 100.0, 1_000.0, 5_000.0, 7_000.0]
}

impl DashboardConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `launch-dash.toml` from the working directory, falling back to
    /// defaults when it does not exist.
    pub fn load_default() -> Result<Self> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            log::info!("Using config file {}", default_path.display());
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }
}
