use std::time::Duration;

use crate::game::quiz::definition::{Category, Difficulty, Question};
use crate::game::timer::TimeLimit;
use crate::game::Mode;

pub mod console;
#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    AnswerCorrect(Question),
    AnswerIncorrect(Question, usize),
    CategorySelected(Category),
    DifficultySelected(Difficulty),
    ModeChanged(Mode, TimeLimit),
    NoQuestions(Category, Difficulty),
    QuestionBegins(Question, usize, TimeLimit),
    RunComplete(f64, bool),
    ScoreUpdate(f64, usize, usize),
    TimeRemaining(Duration),
    TimeUp(Question),
    TimerChanged(Duration, Mode),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Sound {
    Correct,
    Incorrect,
    Timeout,
}

/// Everything the quiz shows or plays. Implementations must not block:
/// a slow or broken device cannot hold up the quiz.
pub trait QuizOutput {
    fn say(&self, message: &Message);

    fn play_sound(&self, sound: Sound);

    /// Flips sound feedback on or off, returning the new state.
    fn toggle_sound(&self) -> bool;
}
