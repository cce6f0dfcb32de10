use itertools::Itertools;
use log::{debug, warn};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::game::quiz::definition::Question;
use crate::game::timer::TimeLimit;
use crate::game::Mode;
use crate::output::{Message, QuizOutput, Sound};

const BELL: &[u8] = b"\x07";
const BELL_INTERVAL: Duration = Duration::from_millis(150);

/// Audio feedback through the terminal bell. Playback happens on a detached
/// thread and failures are only logged.
#[derive(Clone, Debug)]
pub struct SoundManager {
    enabled: Arc<AtomicBool>,
}

impl SoundManager {
    pub fn new(enabled: bool) -> Self {
        SoundManager {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn play(&self, sound: Sound) {
        if !self.is_enabled() {
            return;
        }
        let num_bells = match sound {
            Sound::Correct => 1,
            Sound::Incorrect => 2,
            Sound::Timeout => 3,
        };
        thread::spawn(move || {
            for i in 0..num_bells {
                if i > 0 {
                    thread::sleep(BELL_INTERVAL);
                }
                let mut stdout = io::stdout();
                if let Err(e) = stdout.write_all(BELL).and_then(|_| stdout.flush()) {
                    warn!("Could not play {:?} sound: {}", sound, e);
                    return;
                }
            }
        });
    }
}

#[derive(Clone, Debug)]
pub struct ConsoleOutput {
    sound_manager: SoundManager,
}

impl ConsoleOutput {
    pub fn new(sound_manager: SoundManager) -> Self {
        ConsoleOutput { sound_manager }
    }

    fn describe_options(question: &Question) -> String {
        question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("  {}) {}", i + 1, option))
            .join("\n")
    }

    fn describe_explanation(question: &Question) -> String {
        match &question.explanation {
            Some(explanation) => format!("\n💡 {}", explanation),
            None => String::new(),
        }
    }

    fn interpret_message(message: &Message) -> String {
        use Message::*;
        match message {
            CategorySelected(category) => format!(
                "Selected category: {}\nType `start` to begin.",
                category
            ),
            DifficultySelected(difficulty) => format!(
                "Selected difficulty: {}\nType `start` to begin.",
                difficulty
            ),
            ModeChanged(mode, time_limit) => match mode {
                Mode::Practice => "📖 Practice mode: take all the time you need.".to_owned(),
                Mode::Timed => format!("⏱ Timed mode: {} per question.", time_limit),
            },
            TimerChanged(duration, mode) => match mode {
                Mode::Timed => format!(
                    "⏱ Questions now last {}.",
                    TimeLimit::Bounded(*duration)
                ),
                Mode::Practice => format!(
                    "⏱ Timed questions will last {}. Practice mode has no time limit.",
                    TimeLimit::Bounded(*duration)
                ),
            },
            NoQuestions(category, difficulty) => format!(
                "No questions available for {} ({}). Pick another category or difficulty.",
                category, difficulty
            ),
            QuestionBegins(question, number, time_limit) => format!(
                "\n❓ Question {} ({}):\n{}\n{}",
                number,
                time_limit,
                question.text,
                Self::describe_options(question)
            ),
            TimeRemaining(duration) => format!("⏳ {} seconds remaining!", duration.as_secs()),
            AnswerCorrect(question) => format!(
                "✅ Correct! The answer is **{}**.{}",
                question.correct_option(),
                Self::describe_explanation(question)
            ),
            AnswerIncorrect(question, selected) => format!(
                "❌ {} is incorrect. The answer was **{}**.{}",
                question.options[*selected],
                question.correct_option(),
                Self::describe_explanation(question)
            ),
            TimeUp(question) => format!(
                "⌛ Time's up! The correct answer was **{}**.{}",
                question.correct_option(),
                Self::describe_explanation(question)
            ),
            ScoreUpdate(score, correct, answered) => {
                format!("📈 Score: {:.1}% ({}/{})", score, correct, answered)
            }
            RunComplete(score, passed) => {
                if *passed {
                    format!("🎉 Quiz complete! You passed with {:.1}%.", score)
                } else {
                    format!("📋 Quiz complete. You scored {:.1}%, keep practicing!", score)
                }
            }
        }
    }
}

impl QuizOutput for ConsoleOutput {
    fn say(&self, message: &Message) {
        debug!("Output: {:?}", message);
        println!("{}", Self::interpret_message(message));
    }

    fn play_sound(&self, sound: Sound) {
        self.sound_manager.play(sound);
    }

    fn toggle_sound(&self) -> bool {
        self.sound_manager.toggle()
    }
}
