use std::convert::TryFrom;
use std::time::Duration;

use super::*;
use crate::game::quiz::definition::RawQuestion;
use crate::output::mock::{Entry, MockQuizOutput};

struct ContextBuilder {
    question: RawQuestion,
    time_limit: TimeLimit,
}

impl ContextBuilder {
    fn new() -> Self {
        ContextBuilder {
            question: RawQuestion {
                question: "What does a red octagonal sign mean?".to_owned(),
                options: vec!["Stop", "Yield", "Slow", "Go"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                correct: 0,
                explanation: Some("A red octagonal sign always means stop.".to_owned()),
            },
            time_limit: TimeLimit::Bounded(Duration::from_secs(30)),
        }
    }

    fn time_limit(mut self, time_limit: TimeLimit) -> Self {
        self.time_limit = time_limit;
        self
    }

    fn build(self) -> Context {
        let output = MockQuizOutput::new();
        let question = Question::try_from(self.question).unwrap();
        let state = QuestionState::new(question, 1, self.time_limit, output.clone());
        Context { state, output }
    }
}

struct Context {
    state: QuestionState<MockQuizOutput>,
    output: MockQuizOutput,
}

#[test]
fn announces_question() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    assert_eq!(
        ctx.output.flush_messages(),
        [Message::QuestionBegins(
            ctx.state.question.clone(),
            1,
            TimeLimit::Bounded(Duration::from_secs(30))
        )]
    );
}

#[test]
fn times_out_after_duration() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    assert!(!ctx.state.is_over());
    ctx.state.on_tick(Duration::from_secs(15));
    assert!(!ctx.state.is_over());
    ctx.state.on_tick(Duration::from_secs(15));
    assert!(ctx.state.is_over());
}

#[test]
fn unbounded_question_never_times_out() {
    let mut ctx = ContextBuilder::new()
        .time_limit(TimeLimit::Unbounded)
        .build();
    ctx.state.on_begin();
    ctx.state.on_tick(Duration::from_secs(3600));
    assert!(!ctx.state.is_over());
    assert_eq!(ctx.state.time_remaining(), None);
}

#[test]
fn warns_when_time_is_running_out() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.output.flush();
    ctx.state.on_tick(Duration::from_secs(19));
    assert!(ctx.output.flush().is_empty());
    ctx.state.on_tick(Duration::from_secs(2));
    assert_eq!(
        ctx.output.flush_messages(),
        [Message::TimeRemaining(Duration::from_secs(10))]
    );
    ctx.state.on_tick(Duration::from_secs(2));
    assert!(ctx.output.flush().is_empty());
}

#[test]
fn timeout_reveals_answer() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.state.on_tick(Duration::from_secs(30));
    ctx.state.on_end();
    assert!(ctx
        .output
        .contains_message(&Message::TimeUp(ctx.state.question.clone())));
    assert!(ctx.output.played_sound(Sound::Timeout));
}

#[test]
fn interrupted_question_does_not_time_out() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.state.on_tick(Duration::from_secs(5));
    ctx.state.on_end();
    assert!(!ctx.output.played_sound(Sound::Timeout));
    ctx.state.on_tick(Duration::from_secs(60));
    assert!(!ctx.state.is_over());
}

#[test]
fn correct_answer_plays_correct_sound() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.output.flush();
    let result = ctx.state.answer(0).unwrap();
    assert!(result.is_correct);
    assert_eq!(
        ctx.output.flush(),
        [
            Entry::Sound(Sound::Correct),
            Entry::Text(Message::AnswerCorrect(ctx.state.question.clone()))
        ]
    );
}

#[test]
fn incorrect_answer_reveals_correct_option() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    let result = ctx.state.answer(2).unwrap();
    assert_eq!(
        result,
        AnswerResult {
            selected: 2,
            correct_index: 0,
            is_correct: false
        }
    );
    assert!(ctx.output.played_sound(Sound::Incorrect));
    assert!(ctx
        .output
        .contains_message(&Message::AnswerIncorrect(ctx.state.question.clone(), 2)));
}

#[test]
fn can_only_answer_once() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    assert!(ctx.state.answer(1).is_ok());
    assert!(ctx.state.answer(0).is_err());
}

#[test]
fn out_of_range_answer_is_rejected() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.output.flush();
    assert!(ctx.state.answer(4).is_err());
    assert!(ctx.output.flush().is_empty());
    assert!(ctx.state.answer(3).is_ok());
}

#[test]
fn answered_question_does_not_time_out() {
    let mut ctx = ContextBuilder::new().build();
    ctx.state.on_begin();
    ctx.state.answer(0).unwrap();
    ctx.state.on_tick(Duration::from_secs(60));
    assert!(!ctx.state.is_over());
    ctx.state.on_end();
    assert!(!ctx.output.played_sound(Sound::Timeout));
}
