/// Engine status reported while a page is being recognized.
pub const RECOGNIZING_TEXT: &str = "recognizing text";

/// Fine-grained lifecycle event emitted by a recognition engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub status: String,
    /// Fraction in `0.0..=1.0`; only meaningful for [`RECOGNIZING_TEXT`].
    pub progress: f32,
}

impl ProgressEvent {
    pub fn new(status: impl Into<String>, progress: f32) -> Self {
        Self {
            status: status.into(),
            progress,
        }
    }

    /// Lifecycle phase without a completion fraction.
    pub fn phase(status: impl Into<String>) -> Self {
        Self::new(status, 0.0)
    }

    pub fn recognizing(progress: f32) -> Self {
        Self::new(RECOGNIZING_TEXT, progress)
    }
}

/// Maps engine events to single status lines.
///
/// Within one item the reported percentage never goes down; call
/// [`ProgressMapper::start_item`] before each item to reset that floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressMapper {
    floor: u8,
}

impl ProgressMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_item(&mut self) {
        self.floor = 0;
    }

    /// Returns `None` for events that carry no status.
    pub fn status_line(&mut self, event: &ProgressEvent) -> Option<String> {
        if event.status == RECOGNIZING_TEXT {
            let percent = recognition_percent(event.progress).max(self.floor);
            self.floor = percent;
            return Some(format!("Processing image {percent}%..."));
        }
        if event.status.is_empty() {
            return None;
        }
        Some(format!("{}...", capitalize(&event.status)))
    }
}

/// `round(fraction * 100)`, clamped to `0..=100`. Non-finite input counts as 0.
pub fn recognition_percent(progress: f32) -> u8 {
    if !progress.is_finite() {
        return 0;
    }
    (progress * 100.0).round().clamp(0.0, 100.0) as u8
}

fn capitalize(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, recognition_percent};

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(recognition_percent(0.494), 49);
        assert_eq!(recognition_percent(0.496), 50);
        assert_eq!(recognition_percent(1.7), 100);
        assert_eq!(recognition_percent(-0.2), 0);
        assert_eq!(recognition_percent(f32::NAN), 0);
    }

    #[test]
    fn capitalize_only_touches_first_char() {
        assert_eq!(capitalize("loading tesseract core"), "Loading tesseract core");
        assert_eq!(capitalize(""), "");
    }
}
