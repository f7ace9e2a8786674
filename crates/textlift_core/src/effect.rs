use crate::{InputItem, SelectionGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Decode thumbnails for a freshly selected set of inputs.
    RenderPreviews {
        generation: SelectionGeneration,
        items: Vec<InputItem>,
    },
    /// Run the OCR pipeline over a snapshot of the selection.
    StartExtraction { items: Vec<InputItem> },
}
