//! Textlift core: pure selection/extraction state machine and view-model helpers.
mod effect;
mod msg;
mod progress;
mod report;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use progress::{recognition_percent, ProgressEvent, ProgressMapper, RECOGNIZING_TEXT};
pub use report::{ExtractionReport, ItemOutcome, ItemResult};
pub use selection::{InputItem, PreviewImage, SelectionGeneration, SelectionStore};
pub use state::{status, AppState, RunPhase};
pub use update::update;
pub use view_model::{AppViewModel, PreviewView};
