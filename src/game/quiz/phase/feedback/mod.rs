use std::time::Duration;

use crate::game::quiz::definition::Question;
use crate::game::quiz::phase::question::AnswerResult;
use crate::game::quiz::State;


/// Leaves the outcome of an answer on screen for a moment before moving on.
#[derive(Debug)]
pub struct FeedbackState {
    question: Question,
    result: AnswerResult,
    time_elapsed: Duration,
    time_to_wait: Duration,
}

impl FeedbackState {
    pub fn new(question: Question, result: AnswerResult, duration: Duration) -> Self {
        FeedbackState {
            question,
            result,
            time_elapsed: Duration::default(),
            time_to_wait: duration,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn result(&self) -> &AnswerResult {
        &self.result
    }
}

impl State for FeedbackState {
    fn on_begin(&mut self) {}

    fn on_tick(&mut self, dt: Duration) {
        self.time_elapsed += dt;
    }

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        self.time_elapsed >= self.time_to_wait
    }
}
