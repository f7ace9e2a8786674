use std::fs;
use std::path::{Path, PathBuf};

use textlift_core::InputItem;
use textlift_logging::lift_warn;

/// Read every path into an [`InputItem`] named after its file name.
/// Unreadable paths are reported and left out of the selection.
pub fn read_selection(paths: &[PathBuf]) -> Vec<InputItem> {
    paths
        .iter()
        .filter_map(|path| match fs::read(path) {
            Ok(bytes) => Some(InputItem::new(display_name(path), bytes)),
            Err(err) => {
                lift_warn!("Skipping {:?}: {}", path, err);
                eprintln!("Skipping {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
