//! Application configuration loaded from a RON file.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use textlift_engine::{
    EngineSettings, ExtractionSettings, PreviewSettings, TesseractSettings, DEFAULT_LANGUAGE,
    DEFAULT_PREVIEW_MAX_SIDE,
};
use textlift_logging::{LevelFilter, LogDestination};

pub const DEFAULT_CONFIG_FILE: &str = "textlift.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub language: String,
    pub tesseract: TesseractSettings,
    pub preview_max_side: u32,
    pub log: LogTarget,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            tesseract: TesseractSettings::default(),
            preview_max_side: DEFAULT_PREVIEW_MAX_SIDE,
            log: LogTarget::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            extraction: ExtractionSettings {
                language: self.language.clone(),
            },
            preview: PreviewSettings {
                max_side: self.preview_max_side,
            },
        }
    }
}

/// Result of reading the config file. Logging is not set up yet when this
/// runs, so problems are returned for the caller to log.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warning: Option<String>,
}

/// Missing file means defaults; unreadable or malformed files fall back to
/// defaults with a warning.
pub fn load(path: &Path) -> LoadedConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: None,
            };
        }
        Err(err) => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: Some(format!("Failed to read config from {:?}: {}", path, err)),
            };
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            warning: Some(format!("Failed to parse config from {:?}: {}", path, err)),
        },
    }
}
