use anyhow::{anyhow, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

use self::definition::*;
use self::phase::*;
use self::settings::*;
use crate::game::timer::TimeLimit;
use crate::game::Mode;
use crate::output::{Message, QuizOutput};
use crate::stats::{HighScoreEntry, SessionSnapshot, StatisticsDocument, StatisticsStore};

pub mod definition;
mod phase;
pub mod settings;


pub use self::phase::AnswerResult;

trait State {
    fn on_begin(&mut self);
    fn on_tick(&mut self, dt: Duration);
    fn on_end(&mut self);
    fn is_over(&self) -> bool;
}

enum Phase<O: QuizOutput> {
    Idle(IdleState),
    Question(QuestionState<O>),
    Feedback(FeedbackState),
    Results(ResultsState<O>),
}

impl<O: QuizOutput> Phase<O> {
    fn get_state(&mut self) -> &mut dyn State {
        match self {
            Phase::Idle(s) => s,
            Phase::Question(s) => s,
            Phase::Feedback(s) => s,
            Phase::Results(s) => s,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Phase::Idle(_) => "idle",
            Phase::Question(_) => "question",
            Phase::Feedback(_) => "feedback",
            Phase::Results(_) => "results",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    AwaitingAnswer,
    Feedback,
}

/// One player working through questions of a chosen category and difficulty.
///
/// Questions are drawn from a shuffled copy of the pool. When every question
/// has been asked, the pool is shuffled again and the next lap begins, so a
/// run never runs out of questions. Time only moves forward through `tick`.
pub struct QuizSession<O: QuizOutput + Clone> {
    bank: QuestionBank,
    statistics: StatisticsStore,
    settings: Settings,
    output: O,
    rng: StdRng,
    category: Category,
    difficulty: Difficulty,
    mode: Mode,
    question_duration: Duration,
    queue: Vec<Question>,
    cursor: usize,
    correct_answers: usize,
    answered_count: usize,
    complete: bool,
    current_phase: Phase<O>,
}

impl<O: QuizOutput + Clone> QuizSession<O> {
    pub fn new(
        bank: QuestionBank,
        statistics: StatisticsStore,
        settings: Settings,
        output: O,
    ) -> QuizSession<O> {
        QuizSession {
            bank,
            statistics,
            question_duration: settings.question_duration(),
            settings,
            output,
            rng: StdRng::from_entropy(),
            category: Category::default(),
            difficulty: Difficulty::default(),
            mode: Mode::default(),
            queue: Vec::new(),
            cursor: 0,
            correct_answers: 0,
            answered_count: 0,
            complete: false,
            current_phase: Phase::Idle(IdleState),
        }
    }

    #[cfg(test)]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        self.current_phase.get_state().on_end();
        debug!("Entering quiz phase: {}", phase.name());
        self.current_phase = phase;
        self.current_phase.get_state().on_begin();
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = category;
        self.invalidate_queue();
        self.output.say(&Message::CategorySelected(category));
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.invalidate_queue();
        self.output.say(&Message::DifficultySelected(difficulty));
    }

    fn invalidate_queue(&mut self) {
        self.queue.clear();
        self.cursor = 0;
        self.set_current_phase(Phase::Idle(IdleState));
    }

    /// Begins a new run and asks its first question.
    pub fn start(&mut self) -> Result<Question> {
        if self.queue.is_empty() {
            self.rebuild_queue()?;
        }
        self.correct_answers = 0;
        self.answered_count = 0;
        self.complete = false;
        info!(
            "Starting {} quiz: {} ({})",
            self.mode, self.category, self.difficulty
        );
        self.next_question()
    }

    pub fn next_question(&mut self) -> Result<Question> {
        if self.complete {
            return Err(anyhow!("This quiz is over, start a new one to keep going"));
        }
        if self.queue.is_empty() {
            self.rebuild_queue()?;
        }
        if self.cursor >= self.queue.len() {
            debug!("Reshuffling {} questions", self.queue.len());
            self.queue.shuffle(&mut self.rng);
            self.cursor = 0;
        }

        let question = self.queue[self.cursor].clone();
        self.cursor += 1;

        let state = QuestionState::new(
            question.clone(),
            self.answered_count + 1,
            self.time_limit(),
            self.output.clone(),
        );
        self.set_current_phase(Phase::Question(state));
        Ok(question)
    }

    fn rebuild_queue(&mut self) -> Result<()> {
        let pool = self.bank.get_questions(self.category, self.difficulty);
        if pool.is_empty() {
            self.set_current_phase(Phase::Idle(IdleState));
            self.output
                .say(&Message::NoQuestions(self.category, self.difficulty));
            return Err(anyhow!(
                "No questions available for {} ({})",
                self.category,
                self.difficulty
            ));
        }
        self.queue = pool.to_vec();
        self.queue.shuffle(&mut self.rng);
        self.cursor = 0;
        Ok(())
    }

    /// Checks an answer to the active question. Does not move on to the next
    /// question: that happens once the feedback delay has elapsed.
    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerResult> {
        let (question, result) = match &mut self.current_phase {
            Phase::Question(state) => {
                let result = state.answer(selected)?;
                (state.question().clone(), result)
            }
            _ => return Err(anyhow!("There is no active question")),
        };

        self.answered_count += 1;
        if result.is_correct {
            self.correct_answers += 1;
        }
        self.statistics.record_answer(
            self.category,
            self.difficulty,
            self.mode,
            result.is_correct,
        );
        self.output.say(&Message::ScoreUpdate(
            self.calculate_score(),
            self.correct_answers,
            self.answered_count,
        ));

        if self.answered_count >= self.settings.questions_per_run {
            self.complete_run();
        }

        let state = FeedbackState::new(question, result, self.settings.feedback_duration());
        self.set_current_phase(Phase::Feedback(state));
        Ok(result)
    }

    fn complete_run(&mut self) {
        let score = self.calculate_score();
        let passed = score >= self.settings.passing_score;
        info!("Quiz complete with a score of {:.1}%", score);
        self.complete = true;
        self.statistics.add_high_score(HighScoreEntry::new(
            score,
            self.category,
            self.difficulty,
            self.mode,
            passed,
        ));
        self.statistics.set_last_session(SessionSnapshot {
            category: self.category,
            difficulty: self.difficulty,
            mode: self.mode,
            score,
            questions_answered: self.answered_count,
            correct_answers: self.correct_answers,
        });
    }

    pub fn tick(&mut self, dt: Duration) {
        let state = self.current_phase.get_state();
        state.on_tick(dt);
        if state.is_over() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        match self.current_phase {
            Phase::Feedback(_) if self.complete => {
                let score = self.calculate_score();
                let passed = score >= self.settings.passing_score;
                let state = ResultsState::new(score, passed, self.output.clone());
                self.set_current_phase(Phase::Results(state));
            }
            Phase::Question(_) | Phase::Feedback(_) => {
                if let Err(e) = self.next_question() {
                    debug!("Could not advance quiz: {:#}", e);
                }
            }
            Phase::Idle(_) | Phase::Results(_) => (),
        }
    }

    /// Cancels the active question. No timeout can fire afterwards.
    pub fn stop(&mut self) {
        self.set_current_phase(Phase::Idle(IdleState));
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.apply_time_limit();
        self.output
            .say(&Message::ModeChanged(self.mode, self.time_limit()));
        self.mode
    }

    pub fn set_timer_duration(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(anyhow!("Timer duration must be positive"));
        }
        self.question_duration = Duration::from_secs(seconds);
        self.apply_time_limit();
        self.output
            .say(&Message::TimerChanged(self.question_duration, self.mode));
        Ok(())
    }

    fn apply_time_limit(&mut self) {
        let time_limit = self.time_limit();
        if let Phase::Question(state) = &mut self.current_phase {
            state.set_time_limit(time_limit);
        }
    }

    pub fn calculate_score(&self) -> f64 {
        if self.answered_count == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.answered_count as f64 * 100.0
        }
    }

    pub fn time_limit(&self) -> TimeLimit {
        match self.mode {
            Mode::Timed => TimeLimit::Bounded(self.question_duration),
            Mode::Practice => TimeLimit::Unbounded,
        }
    }

    pub fn time_remaining(&self) -> Option<Duration> {
        match &self.current_phase {
            Phase::Question(state) => state.time_remaining(),
            _ => None,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.current_phase {
            Phase::Question(_) => SessionState::AwaitingAnswer,
            Phase::Feedback(_) => SessionState::Feedback,
            Phase::Idle(_) | Phase::Results(_) => SessionState::Idle,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.current_phase {
            Phase::Question(state) => Some(state.question()),
            Phase::Feedback(state) => Some(state.question()),
            _ => None,
        }
    }

    /// The answer being shown while in feedback.
    pub fn last_answer(&self) -> Option<AnswerResult> {
        match &self.current_phase {
            Phase::Feedback(state) => Some(*state.result()),
            _ => None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn answered_count(&self) -> usize {
        self.answered_count
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn questions_per_run(&self) -> usize {
        self.settings.questions_per_run
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn statistics(&self) -> &StatisticsDocument {
        self.statistics.document()
    }

    pub fn reset_statistics(&mut self) {
        self.statistics.reset();
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
