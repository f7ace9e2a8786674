use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, LogTarget, DEFAULT_CONFIG_FILE};

/// Extract text from images with Tesseract OCR.
///
/// With image paths the batch runs once and the report is printed. Without
/// paths (or with `--interactive`) a small command console starts.
#[derive(Debug, Parser)]
#[command(name = "textlift", version)]
pub struct Cli {
    /// Images to extract text from, processed in the given order.
    pub paths: Vec<PathBuf>,

    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Tesseract language, e.g. `eng` or `eng+deu`.
    #[arg(long)]
    pub lang: Option<String>,

    /// Path of the tesseract executable.
    #[arg(long)]
    pub tesseract: Option<PathBuf>,

    /// Also write the final report to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Stay in the console after processing the given paths.
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Command-line flags take precedence over the configuration file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(lang) = &self.lang {
            config.language = lang.clone();
        }
        if let Some(binary) = &self.tesseract {
            config.tesseract.binary_path = Some(binary.clone());
        }
        if let Some(log) = self.log {
            config.log = log;
        }
    }
}
