//! Tesseract OCR engine driven through its command-line interface.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use textlift_core::ProgressEvent;
use textlift_logging::{lift_debug, lift_info};
use tokio::process::Command;

use crate::{EngineError, EngineFactory, ProgressSink, Recognition, RecognitionEngine};

const DEFAULT_BINARY: &str = "tesseract";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractSettings {
    /// Executable to run; `tesseract` from `PATH` when unset.
    pub binary_path: Option<PathBuf>,
    /// Exported as `TESSDATA_PREFIX` when set.
    pub tessdata_path: Option<PathBuf>,
    /// Page segmentation mode (0-13).
    pub psm: u8,
    /// OCR engine mode (0-3).
    pub oem: u8,
}

impl Default for TesseractSettings {
    fn default() -> Self {
        Self {
            binary_path: None,
            tessdata_path: None,
            psm: 3,
            oem: 1,
        }
    }
}

impl TesseractSettings {
    pub fn binary(&self) -> &Path {
        self.binary_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_BINARY))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TesseractFactory {
    settings: TesseractSettings,
}

impl TesseractFactory {
    pub fn new(settings: TesseractSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl EngineFactory for TesseractFactory {
    async fn create(
        &self,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Box<dyn RecognitionEngine>, EngineError> {
        progress.emit(ProgressEvent::phase("loading tesseract core"));
        let output = run(&self.settings, ["--version"]).await?;
        // Older releases print the banner on stderr.
        let banner = if output.stdout.is_empty() {
            &output.stderr
        } else {
            &output.stdout
        };
        let version = String::from_utf8_lossy(banner)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        lift_info!("[Tesseract] ready: {}", version);

        Ok(Box::new(TesseractEngine {
            settings: self.settings.clone(),
            progress,
            language: None,
            initialized: false,
            terminated: false,
        }))
    }
}

pub struct TesseractEngine {
    settings: TesseractSettings,
    progress: Arc<dyn ProgressSink>,
    language: Option<String>,
    initialized: bool,
    terminated: bool,
}

impl TesseractEngine {
    fn ensure_alive(&self) -> Result<(), EngineError> {
        if self.terminated {
            Err(EngineError::Terminated)
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for TesseractEngine {
    async fn load_language(&mut self, language: &str) -> Result<(), EngineError> {
        self.ensure_alive()?;
        self.progress
            .emit(ProgressEvent::phase("loading language traineddata"));
        let output = run(&self.settings, ["--list-langs"]).await?;
        let available = parse_language_list(&String::from_utf8_lossy(&output.stdout));
        if let Some(missing) = language
            .split('+')
            .find(|lang| !available.iter().any(|known| known == lang))
        {
            return Err(EngineError::UnsupportedLanguage(missing.to_string()));
        }
        self.language = Some(language.to_string());
        Ok(())
    }

    async fn initialize(&mut self, language: &str) -> Result<(), EngineError> {
        self.ensure_alive()?;
        self.progress.emit(ProgressEvent::phase("initializing api"));
        if self.language.as_deref() != Some(language) {
            return Err(EngineError::UnsupportedLanguage(language.to_string()));
        }
        self.initialized = true;
        Ok(())
    }

    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, EngineError> {
        self.ensure_alive()?;
        let language = match (&self.language, self.initialized) {
            (Some(language), true) => language.clone(),
            _ => return Err(EngineError::NotInitialized),
        };
        let start = Instant::now();
        self.progress.emit(ProgressEvent::recognizing(0.0));

        let input = write_input(image.to_vec()).await?;

        let psm = self.settings.psm.to_string();
        let oem = self.settings.oem.to_string();
        let args: [&OsStr; 8] = [
            input.path().as_os_str(),
            OsStr::new("stdout"),
            OsStr::new("-l"),
            OsStr::new(&language),
            OsStr::new("--psm"),
            OsStr::new(&psm),
            OsStr::new("--oem"),
            OsStr::new(&oem),
        ];
        let output = run(&self.settings, args).await?;

        self.progress.emit(ProgressEvent::recognizing(1.0));
        let text = String::from_utf8_lossy(&output.stdout)
            .trim_end_matches('\u{c}')
            .to_string();
        lift_info!(
            "[Tesseract] recognized {} chars in {} ms",
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(Recognition::new(text))
    }

    async fn terminate(&mut self) -> Result<(), EngineError> {
        if self.terminated {
            return Ok(());
        }
        self.progress.emit(ProgressEvent::phase("terminating worker"));
        self.terminated = true;
        self.initialized = false;
        Ok(())
    }
}

/// Tesseract reads its input from a path, so the bytes go to a temp file
/// that lives until recognition finishes.
async fn write_input(image: Vec<u8>) -> Result<NamedTempFile, EngineError> {
    let written = tokio::task::spawn_blocking(move || -> io::Result<NamedTempFile> {
        let mut input = tempfile::Builder::new().prefix("textlift-").tempfile()?;
        input.write_all(&image)?;
        input.flush()?;
        Ok(input)
    })
    .await
    .map_err(io::Error::other)?;
    Ok(written?)
}

/// Languages from `tesseract --list-langs` output (the header line is skipped).
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(ToOwned::to_owned)
        .collect()
}

async fn run<I, S>(settings: &TesseractSettings, args: I) -> Result<Output, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let binary = settings.binary();
    let mut cmd = Command::new(binary);
    cmd.args(args).kill_on_drop(true);
    if let Some(tessdata) = &settings.tessdata_path {
        cmd.env("TESSDATA_PREFIX", tessdata);
    }
    lift_debug!("[Tesseract] exec {:?}", cmd.as_std());

    let output = cmd.output().await.map_err(|source| EngineError::Spawn {
        binary: binary.display().to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(EngineError::ExitStatus {
            binary: binary.display().to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{parse_language_list, TesseractSettings};
    use std::path::Path;

    #[test]
    fn language_list_skips_header_and_blanks() {
        let output = "List of available languages in \"/usr/share/tessdata/\" (3):\neng\nosd\n\n deu \n";
        assert_eq!(parse_language_list(output), vec!["eng", "osd", "deu"]);
    }

    #[test]
    fn default_binary_comes_from_path() {
        let settings = TesseractSettings::default();
        assert_eq!(settings.binary(), Path::new("tesseract"));
        assert_eq!(settings.psm, 3);
        assert_eq!(settings.oem, 1);
    }
}
