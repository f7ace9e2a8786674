#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use textlift_core::{InputItem, ProgressEvent};
use textlift_engine::{
    EngineError, EngineFactory, ProgressSink, Recognition, RecognitionEngine,
};

/// Items whose bytes start with this prefix fail recognition with the rest
/// of the payload as the error message.
pub const FAIL_PREFIX: &str = "ERR:";

/// Items whose bytes start with this prefix make the engine panic.
pub const PANIC_PREFIX: &str = "PANIC:";

pub fn ok_item(name: &str, text: &str) -> InputItem {
    InputItem::new(name, text.as_bytes().to_vec())
}

pub fn failing_item(name: &str, message: &str) -> InputItem {
    InputItem::new(name, format!("{FAIL_PREFIX}{message}").into_bytes())
}

pub fn panicking_item(name: &str, message: &str) -> InputItem {
    InputItem::new(name, format!("{PANIC_PREFIX}{message}").into_bytes())
}

#[derive(Clone, Default)]
pub struct MockFactory {
    calls: Arc<Mutex<Vec<String>>>,
    fail_create: Option<String>,
    fail_load: Option<String>,
    panic_create: bool,
    progress_steps: Vec<f32>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(message: &str) -> Self {
        Self {
            fail_create: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_load(message: &str) -> Self {
        Self {
            fail_load: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn panicking_create() -> Self {
        Self {
            panic_create: true,
            ..Self::default()
        }
    }

    pub fn with_progress(steps: &[f32]) -> Self {
        Self {
            progress_steps: steps.to_vec(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(':').next() == Some(call))
            .count()
    }
}

#[async_trait::async_trait]
impl EngineFactory for MockFactory {
    async fn create(
        &self,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Box<dyn RecognitionEngine>, EngineError> {
        self.calls.lock().unwrap().push("create".to_string());
        if self.panic_create {
            panic!("engine factory exploded");
        }
        if let Some(message) = &self.fail_create {
            return Err(EngineError::Recognition(message.clone()));
        }
        progress.emit(ProgressEvent::phase("loading tesseract core"));
        Ok(Box::new(MockEngine {
            calls: self.calls.clone(),
            progress,
            fail_load: self.fail_load.clone(),
            progress_steps: self.progress_steps.clone(),
        }))
    }
}

struct MockEngine {
    calls: Arc<Mutex<Vec<String>>>,
    progress: Arc<dyn ProgressSink>,
    fail_load: Option<String>,
    progress_steps: Vec<f32>,
}

impl MockEngine {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for MockEngine {
    async fn load_language(&mut self, language: &str) -> Result<(), EngineError> {
        self.record(format!("load:{language}"));
        match &self.fail_load {
            Some(message) => Err(EngineError::Recognition(message.clone())),
            None => Ok(()),
        }
    }

    async fn initialize(&mut self, language: &str) -> Result<(), EngineError> {
        self.record(format!("initialize:{language}"));
        self.progress.emit(ProgressEvent::phase("initializing api"));
        Ok(())
    }

    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, EngineError> {
        self.record("recognize".to_string());
        for step in &self.progress_steps {
            self.progress.emit(ProgressEvent::recognizing(*step));
        }
        let payload = String::from_utf8_lossy(image).into_owned();
        if let Some(message) = payload.strip_prefix(PANIC_PREFIX) {
            panic!("{message}");
        }
        match payload.strip_prefix(FAIL_PREFIX) {
            Some(message) => Err(EngineError::Recognition(message.to_string())),
            None => Ok(Recognition::new(payload)),
        }
    }

    async fn terminate(&mut self) -> Result<(), EngineError> {
        self.record("terminate".to_string());
        Ok(())
    }
}
