use std::io::{self, Write};

use textlift_core::AppViewModel;

/// One piece of terminal output derived from a view-model change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Status(String),
    Previews(String),
    Controls(String),
    Notice(String),
    Report(String),
}

/// Lines for everything that changed between `previous` and `view`.
pub fn render(previous: Option<&AppViewModel>, view: &AppViewModel) -> Vec<Line> {
    let mut lines = Vec::new();

    if previous.map_or(true, |prev| prev.status != view.status) {
        lines.push(Line::Status(view.status.clone()));
    }

    if previous.map_or(!view.previews.is_empty(), |prev| prev.previews != view.previews) {
        lines.push(Line::Previews(previews_text(view)));
    }

    let controls_changed = previous.map_or(true, |prev| {
        prev.extract_enabled != view.extract_enabled || prev.clear_enabled != view.clear_enabled
    });
    if controls_changed {
        lines.push(Line::Controls(format!(
            "extract: {} | clear: {}",
            on_off(view.extract_enabled),
            on_off(view.clear_enabled)
        )));
    }

    if let Some(message) = &view.notification {
        if previous.map_or(true, |prev| prev.notification.as_ref() != Some(message)) {
            lines.push(Line::Notice(message.clone()));
        }
    }

    if view.results_visible {
        let shown = previous
            .is_some_and(|prev| prev.results_visible && prev.report_text == view.report_text);
        if !shown {
            lines.push(Line::Report(view.report_text.clone()));
        }
    }

    lines
}

fn previews_text(view: &AppViewModel) -> String {
    if view.previews.is_empty() {
        return "Previews: none".to_string();
    }
    let items: Vec<String> = view
        .previews
        .iter()
        .map(|preview| format!("{} ({}x{})", preview.name, preview.width, preview.height))
        .collect();
    format!("Previews ({}): {}", items.len(), items.join(", "))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

enum Output {
    Stdio,
    #[cfg(test)]
    Capture(Vec<Line>),
}

/// Display surface: report text on stdout, everything else on stderr.
pub struct Terminal {
    last: Option<AppViewModel>,
    output: Output,
}

impl Terminal {
    pub fn stdio() -> Self {
        Self {
            last: None,
            output: Output::Stdio,
        }
    }

    #[cfg(test)]
    pub fn capture() -> Self {
        Self {
            last: None,
            output: Output::Capture(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn captured(&self) -> &[Line] {
        match &self.output {
            Output::Capture(lines) => lines,
            Output::Stdio => &[],
        }
    }

    pub fn draw(&mut self, view: &AppViewModel) {
        let lines = render(self.last.as_ref(), view);
        self.last = Some(view.clone());
        self.write(lines);
    }

    /// Print the full current view again.
    pub fn redraw(&mut self, view: &AppViewModel) {
        self.last = None;
        self.draw(view);
    }

    fn write(&mut self, lines: Vec<Line>) {
        match &mut self.output {
            Output::Stdio => {
                let mut out = io::stdout().lock();
                let mut err = io::stderr().lock();
                for line in lines {
                    let _ = match line {
                        Line::Status(text) => writeln!(err, "status: {text}"),
                        Line::Previews(text) => writeln!(err, "{text}"),
                        Line::Controls(text) => writeln!(err, "[{text}]"),
                        Line::Notice(text) => writeln!(err, "! {text}"),
                        Line::Report(text) => writeln!(out, "{text}"),
                    };
                }
                let _ = out.flush();
            }
            #[cfg(test)]
            Output::Capture(captured) => captured.extend(lines),
        }
    }
}
