use textlift_core::{ProgressEvent, RunPhase};
use textlift_engine::{ProgressSink, StatusPublisher};

#[test]
fn lifecycle_events_become_capitalized_lines() {
    let (status, _rx) = StatusPublisher::channel();

    status.emit(ProgressEvent::phase("loading language traineddata"));

    assert_eq!(status.current().line, "Loading language traineddata...");
}

#[test]
fn start_item_announces_position_and_resets_floor() {
    let (status, _rx) = StatusPublisher::channel();
    status.start_item(1, 2, "a.png");
    status.emit(ProgressEvent::recognizing(0.9));

    status.start_item(2, 2, "b.png");
    let current = status.current();
    assert_eq!(current.phase, RunPhase::Processing { index: 2, total: 2 });
    assert_eq!(current.line, "[2/2] Analyzing text in: b.png");

    status.emit(ProgressEvent::recognizing(0.2));
    assert_eq!(status.current().line, "Processing image 20%...");
}

#[test]
fn empty_status_events_are_ignored() {
    let (status, _rx) = StatusPublisher::channel();
    status.set_line("Initializing api...".to_string());

    status.emit(ProgressEvent::phase(""));

    assert_eq!(status.current().line, "Initializing api...");
}
