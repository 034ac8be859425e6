//! fleetops configuration loaded from `fleetops.toml`.
//!
//! [`FleetConfig`] holds every tunable. Fields missing from the file fall back
//! to defaults. The `GEMINI_API_KEY` and `API_KEY` environment variables take
//! precedence over the file.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variables checked for the key, highest precedence first.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration loaded from `fleetops.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Gemini API key. Empty means the insight service is unavailable.
    #[serde(default)]
    pub api_key: String,

    /// Model used to generate insights.
    #[serde(default = "default_model")]
    pub model: String,

    /// Kept low for analytical answers.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API root, overridden for tests or proxies.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default output file of the exported report.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Report lines per page.
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_report_path() -> PathBuf {
    PathBuf::from("lux-ops-report.txt")
}

// Roughly one A4 page of monospaced text.
fn default_lines_per_page() -> usize {
    60
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            report_path: default_report_path(),
            lines_per_page: default_lines_per_page(),
        }
    }
}

impl FleetConfig {
    /// Loads `fleetops.toml` from the current directory, or defaults if it
    /// doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("fleetops.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<FleetConfig>(&contents)?
        } else {
            Self::default()
        };

        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var)
                && !key.is_empty()
            {
                config.api_key = key;
                break;
            }
        }

        if config.lines_per_page < 10 {
            anyhow::bail!(crate::error::FleetError::Config(format!(
                "lines_per_page must be at least 10, got {}",
                config.lines_per_page
            )));
        }

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
