//! Configuration management for weighbridge
//!
//! Config stored at: ~/.config/weighbridge/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weighbridge_scale::SimulationSettings;
use weighbridge_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding transactions.json
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Master data TOML (built-in sample data if not set)
    #[serde(default)]
    pub master_data: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Capture the first mass as soon as a session opens on a stable reading
    #[serde(default)]
    pub auto_capture_first: bool,

    /// Reject customers that are not in the master data
    #[serde(default = "default_true")]
    pub validate_customers: bool,

    /// Simulated scale settings
    #[serde(default)]
    pub scale: SimulationSettings,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            master_data: None,
            output_format: default_output_format(),
            auto_capture_first: false,
            validate_customers: true,
            scale: SimulationSettings::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("weighbridge");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the transaction store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("weighbridge");
        Ok(data_dir)
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Weighbridge Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:           {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Master data:        {}",
            self.master_data
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Output format:      {}", self.output_format)?;
        writeln!(f, "Auto capture first: {}", self.auto_capture_first)?;
        writeln!(f, "Validate customers: {}", self.validate_customers)?;
        writeln!(f)?;
        writeln!(f, "Scale:              {}", self.scale.scale_name)?;
        writeln!(
            f,
            "  Change interval:  {} ms (p={:.2})",
            self.scale.change_interval_ms,
            self.scale.probability()
        )?;
        writeln!(f, "  Settle delay:     {} ms", self.scale.settle_delay_ms)?;
        writeln!(
            f,
            "  Weight range:     {} - {} kg",
            self.scale.min_weight_kg,
            u64::from(self.scale.min_weight_kg) + u64::from(self.scale.weight_span_kg)
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}
