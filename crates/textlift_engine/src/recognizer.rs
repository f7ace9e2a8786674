use std::sync::Arc;

use textlift_core::ProgressEvent;

use crate::{EngineError, Recognition};

/// Receives fine-grained engine lifecycle events.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// One recognition engine instance. Serves a single request at a time,
/// which `&mut self` enforces.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send {
    async fn load_language(&mut self, language: &str) -> Result<(), EngineError>;

    async fn initialize(&mut self, language: &str) -> Result<(), EngineError>;

    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, EngineError>;

    /// Release engine resources. Calling it again is a no-op.
    async fn terminate(&mut self) -> Result<(), EngineError>;
}

/// Builds engine instances. Construction may be slow (model loading).
#[async_trait::async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(
        &self,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Box<dyn RecognitionEngine>, EngineError>;
}
