use textlift_core::{update, AppState, Msg, RunPhase};

#[test]
fn dismiss_without_notification_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NotificationDismissed);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn engine_feed_is_ignored_while_idle() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PhaseChanged(RunPhase::Configuring));
    let (next, more) = update(next, Msg::StatusChanged("Processing image 40%...".to_string()));

    assert_eq!(state, next);
    assert!(effects.is_empty() && more.is_empty());
}
