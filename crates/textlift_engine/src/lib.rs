//! Textlift engine: OCR pipeline, preview decoding and effect execution.
mod engine;
mod export;
mod orchestrator;
mod preview;
mod recognizer;
mod scope;
mod status;
mod tesseract;
mod types;

pub use engine::{EngineEvent, EngineHandle, EngineSettings};
pub use export::{ensure_output_dir, export_report, PersistError};
pub use orchestrator::{ExtractionOrchestrator, ExtractionSettings, DEFAULT_LANGUAGE};
pub use preview::{
    decode_preview, render_previews, spawn_previews, PreviewError, PreviewSettings, PreviewSink,
    DEFAULT_PREVIEW_MAX_SIDE,
};
pub use recognizer::{EngineFactory, NullProgressSink, ProgressSink, RecognitionEngine};
pub use scope::EngineScope;
pub use status::{RunStatus, StatusPublisher};
pub use tesseract::{parse_language_list, TesseractEngine, TesseractFactory, TesseractSettings};
pub use types::{EngineError, ExtractionError, Recognition};
