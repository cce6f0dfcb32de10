use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::game::quiz::definition::question::NUM_OPTIONS;
use crate::game::quiz::definition::Question;
use crate::game::quiz::State;
use crate::game::timer::{Countdown, TimeLimit};
use crate::output::{Message, QuizOutput, Sound};

#[cfg(test)]
mod tests;

const TIME_WARNING: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnswerResult {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

pub struct QuestionState<O: QuizOutput> {
    question: Question,
    number: usize,
    countdown: Countdown,
    answer: Option<AnswerResult>,
    output: O,
}

impl<O: QuizOutput> QuestionState<O> {
    pub fn new(question: Question, number: usize, time_limit: TimeLimit, output: O) -> Self {
        QuestionState {
            question,
            number,
            countdown: Countdown::new(time_limit),
            answer: None,
            output,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn time_remaining(&self) -> Option<Duration> {
        self.countdown.time_remaining()
    }

    pub fn set_time_limit(&mut self, time_limit: TimeLimit) {
        self.countdown.set_time_limit(time_limit);
    }

    pub fn answer(&mut self, selected: usize) -> Result<AnswerResult> {
        if self.answer.is_some() {
            return Err(anyhow!("This question was already answered"));
        }
        if selected >= NUM_OPTIONS {
            return Err(anyhow!("Answers must be between 1 and {}", NUM_OPTIONS));
        }
        if self.countdown.is_expired() {
            return Err(anyhow!("Time is up for this question"));
        }

        self.countdown.stop();
        let result = AnswerResult {
            selected,
            correct_index: self.question.correct_index,
            is_correct: self.question.is_answer_correct(selected),
        };
        self.answer = Some(result);

        if result.is_correct {
            self.output.play_sound(Sound::Correct);
            self.output
                .say(&Message::AnswerCorrect(self.question.clone()));
        } else {
            self.output.play_sound(Sound::Incorrect);
            self.output
                .say(&Message::AnswerIncorrect(self.question.clone(), selected));
        }

        Ok(result)
    }

    fn print_time_remaining(&self, before: Option<Duration>, after: Option<Duration>) {
        if let (Some(before), Some(after)) = (before, after) {
            if before > TIME_WARNING && after <= TIME_WARNING && after > Duration::default() {
                self.output.say(&Message::TimeRemaining(TIME_WARNING));
            }
        }
    }
}

impl<O: QuizOutput> State for QuestionState<O> {
    fn on_begin(&mut self) {
        self.countdown.start();
        self.output.say(&Message::QuestionBegins(
            self.question.clone(),
            self.number,
            self.countdown.time_limit(),
        ));
    }

    fn on_tick(&mut self, dt: Duration) {
        let before = self.countdown.time_remaining();
        self.countdown.tick(dt);
        let after = self.countdown.time_remaining();
        if self.answer.is_none() && self.countdown.is_running() {
            self.print_time_remaining(before, after);
        }
    }

    fn on_end(&mut self) {
        let timed_out = self.answer.is_none() && self.countdown.is_expired();
        self.countdown.stop();
        if timed_out {
            self.output.play_sound(Sound::Timeout);
            self.output.say(&Message::TimeUp(self.question.clone()));
        }
    }

    fn is_over(&self) -> bool {
        self.countdown.is_expired()
    }
}
