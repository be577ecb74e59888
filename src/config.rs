//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::presets::{default_presets, find_preset, JobPreset};
use crate::processing::core_skills::{CoreSkillList, DEFAULT_CORE_SKILLS};
use crate::processing::scorer::{DEFAULT_CORE_SKILL_WEIGHT, DEFAULT_EXCELLENT_THRESHOLD};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_presets")]
    pub presets: Vec<JobPreset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub core_skills: Vec<String>,
    pub core_skill_weight: u32,
    pub excellent_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    /// Characters of resume text shown in detailed console output
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            core_skills: DEFAULT_CORE_SKILLS.iter().map(|s| s.to_string()).collect(),
            core_skill_weight: DEFAULT_CORE_SKILL_WEIGHT,
            excellent_threshold: DEFAULT_EXCELLENT_THRESHOLD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            preview_chars: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
            presets: default_presets(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file is created with
    /// the default settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ScreenerError::Configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    info!("No config found, writing defaults to {}", config_path.display());
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        CoreSkillList::new(&self.scoring.core_skills)?;

        if self.scoring.core_skill_weight == 0 {
            return Err(ScreenerError::Configuration(
                "scoring.core_skill_weight must be at least 1".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.scoring.excellent_threshold) {
            return Err(ScreenerError::Configuration(format!(
                "scoring.excellent_threshold must be within 0..=100, got {}",
                self.scoring.excellent_threshold
            )));
        }

        for preset in &self.presets {
            if preset.name.trim().is_empty() {
                return Err(ScreenerError::Configuration(
                    "Job presets must have a name".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn get_preset(&self, name: &str) -> Result<&JobPreset> {
        find_preset(&self.presets, name)
            .ok_or_else(|| ScreenerError::PresetNotFound(name.to_string()))
    }
}
