use crate::{ExtractionReport, InputItem, PreviewImage, RunPhase, SelectionGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a new set of files; replaces the previous selection.
    FilesSelected(Vec<InputItem>),
    /// Preview decode finished for one item of the given selection.
    PreviewReady {
        generation: SelectionGeneration,
        preview: PreviewImage,
    },
    /// User clicked Extract.
    ExtractClicked,
    /// User clicked Clear.
    ClearClicked,
    /// Orchestrator moved to another phase of the run.
    PhaseChanged(RunPhase),
    /// Latest human-readable status line from the running extraction.
    StatusChanged(String),
    /// Extraction run completed with an aggregated report.
    ExtractionFinished(ExtractionReport),
    /// Engine could not be acquired or configured; no report.
    ExtractionAborted(String),
    /// User acknowledged the blocking notification.
    NotificationDismissed,
}
