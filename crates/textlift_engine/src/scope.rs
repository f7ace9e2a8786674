use std::sync::Arc;

use textlift_logging::lift_warn;

use crate::{EngineError, EngineFactory, ProgressSink, RecognitionEngine};

/// Owns one engine for the duration of a run.
///
/// `terminate` is async, so release is an explicit `release().await` at the
/// end of the run rather than a destructor. Dropping an unreleased scope logs.
pub struct EngineScope {
    engine: Box<dyn RecognitionEngine>,
    released: bool,
}

impl EngineScope {
    pub async fn acquire(
        factory: &dyn EngineFactory,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self, EngineError> {
        let engine = factory.create(progress).await?;
        Ok(Self {
            engine,
            released: false,
        })
    }

    pub fn engine(&mut self) -> &mut dyn RecognitionEngine {
        self.engine.as_mut()
    }

    pub async fn release(mut self) -> Result<(), EngineError> {
        self.released = true;
        self.engine.terminate().await
    }
}

impl Drop for EngineScope {
    fn drop(&mut self) {
        if !self.released {
            lift_warn!("Engine scope dropped without terminate");
        }
    }
}
