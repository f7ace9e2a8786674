use bytes::Bytes;

/// Monotonic counter bumped every time the selection is replaced or cleared.
pub type SelectionGeneration = u64;

/// One user-chosen image plus its original file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    pub name: String,
    pub bytes: Bytes,
}

impl InputItem {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Decoded thumbnail ready for display (RGBA8, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Bytes,
}

/// Holds the single live selection. Never mutated item by item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStore {
    items: Vec<InputItem>,
    generation: SelectionGeneration,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole selection and return the new generation.
    pub fn set_selection(&mut self, items: Vec<InputItem>) -> SelectionGeneration {
        self.items = items;
        self.generation += 1;
        self.generation
    }

    /// Drop every item. A store that is already empty is left untouched.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.generation += 1;
        }
    }

    pub fn items(&self) -> &[InputItem] {
        &self.items
    }

    /// Owned copy of the current selection. Item payloads are shared, not copied.
    pub fn snapshot(&self) -> Vec<InputItem> {
        self.items.clone()
    }

    pub fn generation(&self) -> SelectionGeneration {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
