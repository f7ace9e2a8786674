use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use textlift_core::{ExtractionReport, InputItem, PreviewImage, SelectionGeneration};
use textlift_logging::{lift_error, lift_info};

use crate::preview::{spawn_previews, PreviewSettings, PreviewSink};
use crate::{EngineError, EngineFactory, ExtractionOrchestrator, ExtractionSettings, RunStatus, StatusPublisher};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub extraction: ExtractionSettings,
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PreviewReady {
        generation: SelectionGeneration,
        preview: PreviewImage,
    },
    Status(RunStatus),
    /// `Err` carries the user-facing reason the run was aborted.
    ExtractionFinished(Result<ExtractionReport, String>),
}

enum EngineCommand {
    RenderPreviews {
        generation: SelectionGeneration,
        items: Vec<InputItem>,
    },
    Extract {
        items: Vec<InputItem>,
    },
}

/// Background runtime executing preview and extraction effects.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(factory: Arc<dyn EngineFactory>, settings: EngineSettings) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let orchestrator = Arc::new(ExtractionOrchestrator::new(factory, settings.extraction));
        let preview_settings = settings.preview;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::RenderPreviews { generation, items } => {
                        let sink = Arc::new(ChannelPreviewSink::new(event_tx.clone()));
                        spawn_previews(runtime.handle(), generation, items, preview_settings, sink);
                    }
                    EngineCommand::Extract { items } => {
                        let orchestrator = orchestrator.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(run_extraction(orchestrator, items, event_tx));
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn render_previews(&self, generation: SelectionGeneration, items: Vec<InputItem>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::RenderPreviews { generation, items });
    }

    pub fn extract(&self, items: Vec<InputItem>) {
        let _ = self.cmd_tx.send(EngineCommand::Extract { items });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_extraction(
    orchestrator: Arc<ExtractionOrchestrator>,
    items: Vec<InputItem>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    lift_info!("Starting extraction of {} image(s)", items.len());
    let (status, mut status_rx) = StatusPublisher::channel();

    let status_tx = event_tx.clone();
    let forwarder = tokio::spawn(async move {
        // Ends once the publisher is dropped and the last value was seen.
        while status_rx.changed().await.is_ok() {
            let current = status_rx.borrow_and_update().clone();
            if status_tx.send(EngineEvent::Status(current)).is_err() {
                break;
            }
        }
    });

    // Run on its own task so a panic still ends the run with a result; the
    // publisher is dropped with the task, which stops the forwarder.
    let run = tokio::spawn(async move {
        orchestrator
            .extract(&items, &status)
            .await
            .map_err(|err| err.to_string())
    });
    let result = match run.await {
        Ok(result) => result,
        Err(err) => {
            lift_error!("Extraction task failed: {}", err);
            Err(format!("Extraction failed unexpectedly: {err}"))
        }
    };
    let _ = forwarder.await;

    let _ = event_tx.send(EngineEvent::ExtractionFinished(result));
}

struct ChannelPreviewSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelPreviewSink {
    fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl PreviewSink for ChannelPreviewSink {
    fn preview_ready(&self, generation: SelectionGeneration, preview: PreviewImage) {
        let _ = self.tx.send(EngineEvent::PreviewReady {
            generation,
            preview,
        });
    }
}
