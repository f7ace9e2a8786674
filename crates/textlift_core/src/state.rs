use crate::view_model::{AppViewModel, PreviewView};
use crate::{ExtractionReport, InputItem, PreviewImage, SelectionGeneration, SelectionStore};

/// User-facing status and notification texts.
pub mod status {
    pub const AWAITING_UPLOAD: &str = "Awaiting image upload...";
    pub const INITIALIZING: &str = "Initializing OCR Worker... This might take a moment.";
    pub const NO_SELECTION: &str = "Please select one or more images first.";
    pub const ABORTED: &str = "Extraction aborted.";

    pub fn ready(count: usize) -> String {
        format!("Ready to extract data from {count} image(s).")
    }

    pub fn complete(count: usize) -> String {
        format!("✅ Extraction complete for {count} image(s).")
    }

    pub fn analyzing(index: usize, total: usize, name: &str) -> String {
        format!("[{index}/{total}] Analyzing text in: {name}")
    }
}

/// Phases of one extraction run. `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    AcquiringEngine,
    Configuring,
    Processing {
        index: usize,
        total: usize,
    },
    ReleasingEngine,
    Done,
    Aborted,
}

impl RunPhase {
    pub fn is_running(self) -> bool {
        matches!(
            self,
            RunPhase::AcquiringEngine
                | RunPhase::Configuring
                | RunPhase::Processing { .. }
                | RunPhase::ReleasingEngine
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    selection: SelectionStore,
    previews: Vec<PreviewImage>,
    report: Option<ExtractionReport>,
    status: String,
    phase: RunPhase,
    notification: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selection: SelectionStore::new(),
            previews: Vec::new(),
            report: None,
            status: status::AWAITING_UPLOAD.to_string(),
            phase: RunPhase::Idle,
            notification: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let controls_enabled = !self.selection.is_empty() && !self.phase.is_running();
        AppViewModel {
            selection_count: self.selection.len(),
            previews: self
                .previews
                .iter()
                .map(|preview| PreviewView {
                    name: preview.name.clone(),
                    width: preview.width,
                    height: preview.height,
                })
                .collect(),
            status: self.status.clone(),
            report_text: self
                .report
                .as_ref()
                .map(|report| report.text().to_string())
                .unwrap_or_default(),
            results_visible: self.report.is_some(),
            extract_enabled: controls_enabled,
            clear_enabled: controls_enabled,
            notification: self.notification.clone(),
            phase: self.phase,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn report(&self) -> Option<&ExtractionReport> {
        self.report.as_ref()
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_selection(&mut self, items: Vec<InputItem>) -> SelectionGeneration {
        let count = items.len();
        let generation = self.selection.set_selection(items);
        self.previews.clear();
        self.report = None;
        self.notification = None;
        self.phase = RunPhase::Idle;
        self.status = status::ready(count);
        self.mark_dirty();
        generation
    }

    pub(crate) fn push_preview(&mut self, generation: SelectionGeneration, preview: PreviewImage) {
        if generation != self.selection.generation() {
            return;
        }
        self.previews.push(preview);
        self.mark_dirty();
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Enter the run; returns the snapshot handed to the orchestrator.
    pub(crate) fn begin_run(&mut self) -> Vec<InputItem> {
        self.phase = RunPhase::AcquiringEngine;
        self.report = None;
        self.notification = None;
        self.status = status::INITIALIZING.to_string();
        self.mark_dirty();
        self.selection.snapshot()
    }

    /// Terminal phases are only entered through `finish_run` / `abort_run`.
    pub(crate) fn set_phase(&mut self, phase: RunPhase) {
        if self.phase.is_running() && phase.is_running() && self.phase != phase {
            self.phase = phase;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status(&mut self, line: String) {
        if self.phase.is_running() && self.status != line {
            self.status = line;
            self.mark_dirty();
        }
    }

    pub(crate) fn finish_run(&mut self, report: ExtractionReport) {
        if !self.phase.is_running() {
            return;
        }
        self.status = status::complete(report.section_count());
        self.report = Some(report);
        self.phase = RunPhase::Done;
        self.mark_dirty();
    }

    pub(crate) fn abort_run(&mut self, message: String) {
        if !self.phase.is_running() {
            return;
        }
        self.phase = RunPhase::Aborted;
        self.status = status::ABORTED.to_string();
        self.notification = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_all(&mut self) {
        self.selection.clear();
        self.previews.clear();
        self.report = None;
        self.notification = None;
        self.phase = RunPhase::Idle;
        self.status = status::AWAITING_UPLOAD.to_string();
        self.mark_dirty();
    }
}
