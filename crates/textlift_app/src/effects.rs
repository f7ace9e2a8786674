use std::time::Duration;

use textlift_core::{Effect, Msg};
use textlift_engine::{EngineEvent, EngineHandle};
use textlift_logging::{lift_info, lift_warn};

/// Hands core effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RenderPreviews { generation, items } => {
                    lift_info!(
                        "RenderPreviews generation={} items={}",
                        generation,
                        items.len()
                    );
                    self.engine.render_previews(generation, items);
                }
                Effect::StartExtraction { items } => {
                    lift_info!("StartExtraction items={}", items.len());
                    self.engine.extract(items);
                }
            }
        }
    }

    /// Wait up to `timeout` for the next engine event.
    pub fn poll(&self, timeout: Duration) -> Vec<Msg> {
        self.engine
            .recv_timeout(timeout)
            .map(map_event)
            .unwrap_or_default()
    }
}

pub fn map_event(event: EngineEvent) -> Vec<Msg> {
    match event {
        EngineEvent::PreviewReady {
            generation,
            preview,
        } => vec![Msg::PreviewReady {
            generation,
            preview,
        }],
        EngineEvent::Status(status) => {
            let mut msgs = vec![Msg::PhaseChanged(status.phase)];
            if !status.line.is_empty() {
                msgs.push(Msg::StatusChanged(status.line));
            }
            msgs
        }
        EngineEvent::ExtractionFinished(Ok(report)) => vec![Msg::ExtractionFinished(report)],
        EngineEvent::ExtractionFinished(Err(message)) => {
            lift_warn!("Extraction aborted: {}", message);
            vec![Msg::ExtractionAborted(message)]
        }
    }
}
