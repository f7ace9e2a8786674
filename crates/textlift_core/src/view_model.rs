use crate::RunPhase;

/// Everything the display surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub selection_count: usize,
    pub previews: Vec<PreviewView>,
    pub status: String,
    pub report_text: String,
    pub results_visible: bool,
    pub extract_enabled: bool,
    pub clear_enabled: bool,
    /// Blocking message the user must acknowledge.
    pub notification: Option<String>,
    pub phase: RunPhase,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub name: String,
    pub width: u32,
    pub height: u32,
}
