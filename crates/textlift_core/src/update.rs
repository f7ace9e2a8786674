use crate::{status, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(items) => {
            // Controls are disabled while running; a late selection is dropped.
            if state.phase().is_running() {
                return (state, Vec::new());
            }
            let render = (!items.is_empty()).then(|| items.clone());
            let generation = state.replace_selection(items);
            match render {
                Some(items) => vec![Effect::RenderPreviews { generation, items }],
                None => Vec::new(),
            }
        }
        Msg::PreviewReady {
            generation,
            preview,
        } => {
            state.push_preview(generation, preview);
            Vec::new()
        }
        Msg::ExtractClicked => {
            if state.phase().is_running() {
                Vec::new()
            } else if state.selection().is_empty() {
                state.notify(status::NO_SELECTION);
                Vec::new()
            } else {
                let items = state.begin_run();
                vec![Effect::StartExtraction { items }]
            }
        }
        Msg::ClearClicked => {
            if !state.phase().is_running() {
                state.clear_all();
            }
            Vec::new()
        }
        Msg::PhaseChanged(phase) => {
            state.set_phase(phase);
            Vec::new()
        }
        Msg::StatusChanged(line) => {
            state.set_status(line);
            Vec::new()
        }
        Msg::ExtractionFinished(report) => {
            state.finish_run(report);
            Vec::new()
        }
        Msg::ExtractionAborted(message) => {
            state.abort_run(message);
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
    };

    (state, effects)
}
