use std::time::Duration;

use crate::game::quiz::State;
use crate::output::{Message, QuizOutput};

#[cfg(test)]
mod tests;

#[derive(Debug)]
pub struct ResultsState<O> {
    score: f64,
    passed: bool,
    output: O,
}

impl<O> ResultsState<O> {
    pub fn new(score: f64, passed: bool, output: O) -> Self {
        ResultsState {
            score,
            passed,
            output,
        }
    }
}

impl<O: QuizOutput> State for ResultsState<O> {
    fn on_begin(&mut self) {
        self.output
            .say(&Message::RunComplete(self.score, self.passed));
    }

    fn on_tick(&mut self, _dt: Duration) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        false
    }
}
