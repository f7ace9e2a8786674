use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use textlift_core::{update, AppState, AppViewModel, Msg};
use textlift_engine::export_report;
use textlift_logging::lift_info;

use crate::effects::EffectRunner;
use crate::render::Terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the app state and drives the update loop against the engine.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    terminal: Terminal,
}

impl Session {
    pub fn new(runner: EffectRunner, terminal: Terminal) -> Self {
        let mut session = Self {
            state: AppState::new(),
            runner,
            terminal,
        };
        let view = session.state.view();
        session.terminal.draw(&view);
        session
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if self.state.consume_dirty() {
            let view = self.state.view();
            self.terminal.draw(&view);
        }
        self.runner.enqueue(effects);
    }

    /// Apply the next engine event, if one arrives within `timeout`.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        let msgs = self.runner.poll(timeout);
        let received = !msgs.is_empty();
        for msg in msgs {
            self.dispatch(msg);
        }
        received
    }

    /// Apply every event that is already waiting.
    pub fn drain(&mut self) {
        while self.pump(Duration::ZERO) {}
    }

    /// Block until the running extraction (if any) has finished.
    pub fn run_until_idle(&mut self) {
        while self.state.phase().is_running() {
            self.pump(POLL_INTERVAL);
        }
        self.drain();
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn redraw(&mut self) {
        let view = self.state.view();
        self.terminal.redraw(&view);
    }

    pub fn export(&self, target: &Path) -> anyhow::Result<()> {
        let report = self.state.report().context("no report to export")?;
        let written = export_report(target, report)
            .with_context(|| format!("failed to write report to {}", target.display()))?;
        lift_info!("Report written to {:?}", written);
        eprintln!("Report written to {}", written.display());
        Ok(())
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use textlift_core::{InputItem, Msg, RunPhase};
    use textlift_engine::{
        EngineError, EngineFactory, EngineHandle, EngineSettings, ProgressSink, Recognition,
        RecognitionEngine,
    };

    use super::Session;
    use crate::effects::EffectRunner;
    use crate::render::{Line, Terminal};

    /// Echoes the image bytes back as text; `fail` bytes raise an error.
    struct EchoFactory;

    struct EchoEngine;

    #[async_trait::async_trait]
    impl EngineFactory for EchoFactory {
        async fn create(
            &self,
            _progress: Arc<dyn ProgressSink>,
        ) -> Result<Box<dyn RecognitionEngine>, EngineError> {
            Ok(Box::new(EchoEngine))
        }
    }

    #[async_trait::async_trait]
    impl RecognitionEngine for EchoEngine {
        async fn load_language(&mut self, _language: &str) -> Result<(), EngineError> {
            Ok(())
        }

        async fn initialize(&mut self, _language: &str) -> Result<(), EngineError> {
            Ok(())
        }

        async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, EngineError> {
            if image == b"fail" {
                return Err(EngineError::Recognition("decode error".to_string()));
            }
            Ok(Recognition::new(String::from_utf8_lossy(image)))
        }

        async fn terminate(&mut self) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn session() -> Session {
        let engine = EngineHandle::new(Arc::new(EchoFactory), EngineSettings::default()).unwrap();
        Session::new(EffectRunner::new(engine), Terminal::capture())
    }

    const EXPECTED: &str =
        "--- TEXT FROM IMAGE: a.png ---\n\nHELLO\n\n--- ERROR PROCESSING: b.png ---\n\ndecode error";

    #[test]
    fn batch_run_renders_report() {
        let mut session = session();
        session.dispatch(Msg::FilesSelected(vec![
            InputItem::new("a.png", b"HELLO".to_vec()),
            InputItem::new("b.png", b"fail".to_vec()),
        ]));

        session.dispatch(Msg::ExtractClicked);
        session.run_until_idle();

        let view = session.view();
        assert_eq!(view.phase, RunPhase::Done);
        assert_eq!(view.report_text, EXPECTED);
        assert_eq!(view.status, "✅ Extraction complete for 2 image(s).");
        assert!(session
            .terminal()
            .captured()
            .contains(&Line::Report(EXPECTED.to_string())));
    }

    #[test]
    fn report_can_be_exported_after_run() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("report.txt");
        let mut session = session();
        session.dispatch(Msg::FilesSelected(vec![InputItem::new("a.png", b"HELLO".to_vec())]));

        assert!(session.export(&target).is_err());

        session.dispatch(Msg::ExtractClicked);
        session.run_until_idle();
        session.export(&target).unwrap();

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "--- TEXT FROM IMAGE: a.png ---\n\nHELLO\n"
        );
    }

    #[test]
    fn extract_without_selection_only_notifies() {
        let mut session = session();

        session.dispatch(Msg::ExtractClicked);
        session.run_until_idle();

        let view = session.view();
        assert_eq!(view.phase, RunPhase::Idle);
        assert_eq!(
            view.notification.as_deref(),
            Some("Please select one or more images first.")
        );
    }
}
