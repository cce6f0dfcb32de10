use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod commands;
mod game;
mod output;
mod paths;
mod stats;
#[cfg(test)]
mod test_utils;

use crate::commands::Command;
use crate::game::quiz::definition::QuestionBank;
use crate::game::quiz::settings::Settings;
use crate::game::quiz::QuizSession;
use crate::output::console::{ConsoleOutput, SoundManager};
use crate::stats::StatisticsStore;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::open(&paths::settings_file());
    let bank = QuestionBank::open(&paths::questions_file());
    let statistics = StatisticsStore::open(&paths::stats_file(), settings.high_score_limit);
    info!("Statistics are stored in {}", statistics.path().display());

    let output = ConsoleOutput::new(SoundManager::new(settings.sound_enabled));
    let session = Arc::new(Mutex::new(QuizSession::new(
        bank, statistics, settings, output,
    )));

    {
        let session = session.clone();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                thread::sleep(TICK_INTERVAL);
                let now = Instant::now();
                session.lock().tick(now.duration_since(last_tick));
                last_tick = now;
            }
        });
    }

    println!("🚗 Welcome to the DMV practice quiz! Type `help` to see what you can do.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Could not read input")?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{:#}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let mut session = session.lock();
        match commands::execute(&mut *session, &command) {
            Ok(Some(reply)) => println!("{}", reply),
            Ok(None) => (),
            Err(e) => {
                debug!("{:?} failed: {:#}", command, e);
                println!("{:#}", e);
            }
        }
    }

    Ok(())
}
