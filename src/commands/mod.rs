use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

use crate::game::quiz::definition::{Category, Difficulty};
use crate::game::quiz::{QuizSession, SessionState};
use crate::game::Mode;
use crate::output::QuizOutput;
use crate::stats::StatisticsDocument;


lazy_static! {
    static ref COMMAND_REGEX: Regex =
        Regex::new(r"^\s*([a-zA-Z-]+|[0-9]+|\?)\s*(.*?)\s*$").unwrap();
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Answer(usize),
    Category(Category),
    Difficulty(Difficulty),
    Help,
    Mode,
    Next,
    Quit,
    ResetStats,
    Sound,
    Start,
    Stats,
    Status,
    Stop,
    Timer(u64),
}

impl Command {
    pub fn parse(input: &str) -> Result<Command> {
        if input.trim().is_empty() {
            return Ok(Command::Next);
        }

        let captures = COMMAND_REGEX
            .captures(input)
            .context("Could not understand that, type `help` for a list of commands")?;
        let name = captures[1].to_lowercase();
        let args = &captures[2];

        if let Ok(number) = name.parse::<usize>() {
            if (1..=4).contains(&number) && args.is_empty() {
                return Ok(Command::Answer(number - 1));
            }
            return Err(anyhow!("Answers must be between 1 and 4"));
        }

        let command = match name.as_str() {
            "category" | "c" => Command::Category(args.parse()?),
            "difficulty" | "d" => Command::Difficulty(args.parse()?),
            "help" | "h" | "?" => Command::Help,
            "mode" | "practice" => Command::Mode,
            "next" | "n" => Command::Next,
            "quit" | "q" | "exit" => Command::Quit,
            "reset-stats" => Command::ResetStats,
            "sound" => Command::Sound,
            "start" | "s" => Command::Start,
            "stats" => Command::Stats,
            "status" | "where" => Command::Status,
            "stop" => Command::Stop,
            "timer" | "t" => {
                let seconds = args
                    .parse::<u64>()
                    .with_context(|| format!("`{}` is not a number of seconds", args))?;
                Command::Timer(seconds)
            }
            other => {
                return Err(anyhow!(
                    "Unknown command `{}`, type `help` for a list of commands",
                    other
                ))
            }
        };
        Ok(command)
    }
}

/// Runs a command against the session. Returns text to show the player, if any.
pub fn execute<O: QuizOutput + Clone>(
    session: &mut QuizSession<O>,
    command: &Command,
) -> Result<Option<String>> {
    match command {
        Command::Answer(index) => {
            session.submit_answer(*index)?;
        }
        Command::Category(category) => session.select_category(*category),
        Command::Difficulty(difficulty) => session.select_difficulty(*difficulty),
        Command::Help => return Ok(Some(help(session))),
        Command::Mode => {
            session.toggle_mode();
        }
        Command::Next => {
            session.next_question()?;
        }
        Command::Quit => (),
        Command::ResetStats => {
            session.reset_statistics();
            return Ok(Some("Statistics were reset".to_owned()));
        }
        Command::Sound => {
            let enabled = session.output().toggle_sound();
            let state = if enabled { "on" } else { "off" };
            return Ok(Some(format!("🔊 Sound is now {}", state)));
        }
        Command::Start => {
            session.start()?;
        }
        Command::Stats => return Ok(Some(render_statistics(session.statistics()))),
        Command::Status => return Ok(Some(status(session))),
        Command::Stop => session.stop(),
        Command::Timer(seconds) => session.set_timer_duration(*seconds)?,
    };
    Ok(None)
}

fn help<O: QuizOutput + Clone>(session: &QuizSession<O>) -> String {
    let pools = session
        .bank()
        .categories()
        .iter()
        .map(|(category, difficulty, count)| {
            format!("  {} ({}): {} questions", category, difficulty, count)
        })
        .join("\n");
    let pools = if session.bank().is_empty() {
        "  none, check your question bank file".to_owned()
    } else {
        pools
    };

    format!(
        "Commands:\n\
         \x20 category <name>    pick a category ({})\n\
         \x20 difficulty <name>  pick a difficulty ({})\n\
         \x20 start              begin a quiz of {} questions\n\
         \x20 1-4                answer the current question\n\
         \x20 next (or Enter)    skip to the next question\n\
         \x20 mode               switch between timed and practice mode\n\
         \x20 timer <seconds>    change the time allowed per question\n\
         \x20 sound              turn sound effects on or off\n\
         \x20 status             show the current question and time left\n\
         \x20 stats              show your statistics\n\
         \x20 reset-stats        erase your statistics\n\
         \x20 stop               stop the current question\n\
         \x20 quit               leave\n\
         \n\
         Currently: {} ({}), {} mode, {} per question\n\
         Available questions:\n{}",
        Category::ALL.iter().join(", "),
        Difficulty::ALL.iter().join(", "),
        session.questions_per_run(),
        session.category(),
        session.difficulty(),
        session.mode(),
        session.time_limit(),
        pools
    )
}

fn status<O: QuizOutput + Clone>(session: &QuizSession<O>) -> String {
    let mut report = format!(
        "{} ({}), {} mode, score {:.1}% ({}/{})",
        session.category(),
        session.difficulty(),
        session.mode(),
        session.calculate_score(),
        session.correct_answers(),
        session.answered_count()
    );

    if let Some(question) = session.current_question() {
        report += &format!(
            "\n❓ {}\n{}",
            question.text,
            question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("  {}) {}", i + 1, option))
                .join("\n")
        );
    }

    match session.state() {
        SessionState::Idle if session.is_complete() => {
            report += "\nQuiz complete, type `start` for a new one."
        }
        SessionState::Idle => report += "\nNo active question, type `start` to begin.",
        SessionState::AwaitingAnswer => match session.time_remaining() {
            Some(remaining) => {
                report += &format!("\n⏳ {} seconds remaining", remaining.as_secs())
            }
            None => report += "\n⏳ No time limit",
        },
        SessionState::Feedback => {
            if let Some(answer) = session.last_answer() {
                let verdict = if answer.is_correct {
                    "correct"
                } else {
                    "incorrect"
                };
                report += &format!("\nYou answered {} ({})", answer.selected + 1, verdict);
            }
        }
    }

    report
}

pub fn render_statistics(statistics: &StatisticsDocument) -> String {
    let mut report = format!(
        "📊 Overall\n\
         Total Questions: {}\n\
         Correct Answers: {}\n\
         Accuracy: {:.1}%\n",
        statistics.total_questions_answered,
        statistics.correct_answers,
        statistics.accuracy()
    );

    report += &format!(
        "\n{:<15} {:<10} {:<10} {:<10}\n{}\n",
        "Category",
        "Attempts",
        "Correct",
        "Accuracy",
        "-".repeat(45)
    );
    for category in Category::ALL.iter() {
        let entry = statistics.category(*category);
        report += &format!(
            "{:<15} {:<10} {:<10} {:.1}%\n",
            category,
            entry.attempts,
            entry.correct,
            entry.accuracy()
        );
    }

    report += &format!(
        "\n{:<15} {:<10} {:<10} {:<10}\n{}\n",
        "Difficulty",
        "Attempts",
        "Correct",
        "Accuracy",
        "-".repeat(45)
    );
    for difficulty in Difficulty::ALL.iter() {
        let entry = statistics.difficulty(*difficulty);
        report += &format!(
            "{:<15} {:<10} {:<10} {:.1}%\n",
            difficulty,
            entry.attempts,
            entry.correct,
            entry.accuracy()
        );
    }

    report += &format!(
        "\n{:<15} {:<10} {:<10} {:<10}\n{}\n",
        "Mode",
        "Attempts",
        "Correct",
        "Accuracy",
        "-".repeat(45)
    );
    for mode in [Mode::Practice, Mode::Timed].iter() {
        let entry = statistics.mode(*mode);
        report += &format!(
            "{:<15} {:<10} {:<10} {:.1}%\n",
            mode,
            entry.attempts,
            entry.correct,
            entry.accuracy()
        );
    }

    report += &format!(
        "\n🏆 High Scores\n{:<20} {:<10} {:<15} {:<10} {:<10}\n{}\n",
        "Date",
        "Score",
        "Category",
        "Difficulty",
        "Mode",
        "-".repeat(65)
    );
    for high_score in &statistics.high_scores {
        report += &format!(
            "{:<20} {:<10.1} {:<15} {:<10} {:<10}{}\n",
            high_score.date,
            high_score.score,
            high_score.category,
            high_score.difficulty,
            high_score.mode,
            if high_score.passed { " ✅" } else { "" }
        );
    }

    if let Some(last_session) = &statistics.last_session {
        report += &format!(
            "\nLast quiz: {} ({}) on {}, {:.1}%",
            last_session.category, last_session.difficulty, last_session.date, last_session.score
        );
    }

    report
}
