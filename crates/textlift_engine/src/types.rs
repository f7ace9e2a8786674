use std::io;

/// Text recognized on one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub text: String,
}

impl Recognition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },
    #[error("{binary} exited with {status}: {stderr}")]
    ExitStatus {
        binary: String,
        status: String,
        stderr: String,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("language not installed: {0}")]
    UnsupportedLanguage(String),
    #[error("engine not initialized")]
    NotInitialized,
    #[error("engine already terminated")]
    Terminated,
    /// Failure reported by the recognizer itself; displayed verbatim.
    #[error("{0}")]
    Recognition(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no images selected")]
    EmptySelection,
    #[error("could not start OCR engine: {0}")]
    Acquire(#[source] EngineError),
    #[error("could not configure OCR engine: {0}")]
    Configure(#[source] EngineError),
}
