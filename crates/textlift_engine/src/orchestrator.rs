use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use textlift_core::{ExtractionReport, InputItem, ItemOutcome, RunPhase};
use textlift_logging::{lift_error, lift_info, lift_warn};

use crate::{
    EngineError, EngineFactory, EngineScope, ExtractionError, ProgressSink, RecognitionEngine,
    StatusPublisher,
};

pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSettings {
    /// Tesseract language id, `+`-joined for several (e.g. `eng+deu`).
    pub language: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Runs a selection through one engine: acquire, configure, recognize each
/// item in order, release.
pub struct ExtractionOrchestrator {
    factory: Arc<dyn EngineFactory>,
    settings: ExtractionSettings,
}

impl ExtractionOrchestrator {
    pub fn new(factory: Arc<dyn EngineFactory>, settings: ExtractionSettings) -> Self {
        Self { factory, settings }
    }

    /// Per-item failures end up as error sections; only acquiring or
    /// configuring the engine can fail the whole run.
    pub async fn extract(
        &self,
        items: &[InputItem],
        status: &Arc<StatusPublisher>,
    ) -> Result<ExtractionReport, ExtractionError> {
        if items.is_empty() {
            return Err(ExtractionError::EmptySelection);
        }

        status.set_phase(RunPhase::AcquiringEngine);
        let progress: Arc<dyn ProgressSink> = status.clone();
        let mut scope = match EngineScope::acquire(self.factory.as_ref(), progress).await {
            Ok(scope) => scope,
            Err(err) => {
                lift_error!("Failed to acquire OCR engine: {}", err);
                status.set_phase(RunPhase::Aborted);
                return Err(ExtractionError::Acquire(err));
            }
        };

        let batch = self.run_batch(scope.engine(), items, status).await;

        status.set_phase(RunPhase::ReleasingEngine);
        if let Err(err) = scope.release().await {
            lift_error!("Failed to terminate OCR engine: {}", err);
        }

        match batch {
            Ok(outcomes) => {
                let report = ExtractionReport::from_outcomes(&outcomes);
                lift_info!(
                    "Extraction finished: {} section(s), {} failed",
                    report.section_count(),
                    report.failure_count()
                );
                status.set_phase(RunPhase::Done);
                Ok(report)
            }
            Err(err) => {
                lift_error!("Failed to configure OCR engine: {}", err);
                status.set_phase(RunPhase::Aborted);
                Err(ExtractionError::Configure(err))
            }
        }
    }

    async fn run_batch(
        &self,
        engine: &mut dyn RecognitionEngine,
        items: &[InputItem],
        status: &StatusPublisher,
    ) -> Result<Vec<ItemOutcome>, EngineError> {
        status.set_phase(RunPhase::Configuring);
        let language = self.settings.language.as_str();
        engine.load_language(language).await?;
        engine.initialize(language).await?;

        let total = items.len();
        let mut outcomes = Vec::with_capacity(total);
        for (offset, item) in items.iter().enumerate() {
            let index = offset + 1;
            status.start_item(index, total, &item.name);
            lift_info!("[{}/{}] Recognizing {}", index, total, item.name);

            // A panicking recognizer only loses its own item; the engine is
            // still released below.
            let recognized = AssertUnwindSafe(engine.recognize(&item.bytes))
                .catch_unwind()
                .await;
            let outcome = match recognized {
                Ok(Ok(recognition)) => ItemOutcome::success(&item.name, recognition.text),
                Ok(Err(err)) => {
                    lift_warn!("Error processing image {}: {}", item.name, err);
                    ItemOutcome::failure(&item.name, err.to_string())
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    lift_error!("Recognizer panicked on {}: {}", item.name, message);
                    ItemOutcome::failure(&item.name, format!("recognizer panicked: {message}"))
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
