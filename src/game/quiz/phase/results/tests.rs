use super::*;
use crate::output::mock::MockQuizOutput;

#[test]
fn announces_final_score() {
    let output = MockQuizOutput::new();
    let mut state = ResultsState::new(85.0, true, output.clone());
    state.on_begin();
    assert!(output.contains_message(&Message::RunComplete(85.0, true)));
}

#[test]
fn never_ends_on_its_own() {
    let output = MockQuizOutput::new();
    let mut state = ResultsState::new(40.0, false, output);
    state.on_begin();
    state.on_tick(Duration::from_secs(3600));
    assert!(!state.is_over());
}
