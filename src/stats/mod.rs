use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::game::quiz::definition::{Category, Difficulty};
use crate::game::Mode;


const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StatEntry {
    pub attempts: u64,
    pub correct: u64,
}

impl StatEntry {
    fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64 * 100.0
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HighScoreEntry {
    pub date: String,
    pub score: f64,
    pub category: String,
    pub difficulty: String,
    pub mode: String,
    pub passed: bool,
}

impl HighScoreEntry {
    pub fn new(
        score: f64,
        category: Category,
        difficulty: Difficulty,
        mode: Mode,
        passed: bool,
    ) -> Self {
        HighScoreEntry {
            date: timestamp(),
            score,
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            mode: mode.to_string(),
            passed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub category: Category,
    pub difficulty: Difficulty,
    pub mode: Mode,
    pub score: f64,
    pub questions_answered: usize,
    pub correct_answers: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LastSession {
    pub category: String,
    pub difficulty: String,
    #[serde(default)]
    pub mode: String,
    pub score: f64,
    #[serde(default)]
    pub questions_answered: usize,
    #[serde(default)]
    pub correct_answers: usize,
    pub date: String,
}

fn default_difficulty_stats() -> BTreeMap<String, StatEntry> {
    Difficulty::ALL
        .iter()
        .map(|d| (d.to_string(), StatEntry::default()))
        .collect()
}

/// Aggregate results across every quiz ever taken, as stored on disk.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct StatisticsDocument {
    pub total_questions_answered: u64,
    pub correct_answers: u64,
    pub categories: BTreeMap<String, StatEntry>,
    pub difficulty_stats: BTreeMap<String, StatEntry>,
    pub mode_stats: BTreeMap<String, StatEntry>,
    pub high_scores: Vec<HighScoreEntry>,
    #[serde(deserialize_with = "deserialize_last_session")]
    pub last_session: Option<LastSession>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// Older files store an empty object when no session was ever completed.
fn deserialize_last_session<'de, D>(deserializer: D) -> Result<Option<LastSession>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
        value => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl Default for StatisticsDocument {
    fn default() -> Self {
        StatisticsDocument {
            total_questions_answered: 0,
            correct_answers: 0,
            categories: BTreeMap::new(),
            difficulty_stats: default_difficulty_stats(),
            mode_stats: BTreeMap::new(),
            high_scores: Vec::new(),
            last_session: None,
            extra: BTreeMap::new(),
        }
    }
}

impl StatisticsDocument {
    pub fn accuracy(&self) -> f64 {
        StatEntry {
            attempts: self.total_questions_answered,
            correct: self.correct_answers,
        }
        .accuracy()
    }

    pub fn category(&self, category: Category) -> StatEntry {
        self.categories
            .get(category.as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> StatEntry {
        self.difficulty_stats
            .get(difficulty.as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn mode(&self, mode: Mode) -> StatEntry {
        self.mode_stats
            .get(&mode.to_string())
            .copied()
            .unwrap_or_default()
    }
}

/// File-backed statistics. Every mutation is written through to disk; write
/// failures are logged and the in-memory document stays authoritative.
#[derive(Debug)]
pub struct StatisticsStore {
    path: PathBuf,
    document: StatisticsDocument,
    high_score_limit: usize,
}

impl StatisticsStore {
    /// Loads statistics from `path`. A missing or malformed file is replaced
    /// with zeroed statistics, which are written back immediately. A file that
    /// exists but cannot be read is left alone.
    pub fn open(path: &Path, high_score_limit: usize) -> StatisticsStore {
        let (document, repair) = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(document) => (document, false),
                Err(e) => {
                    warn!("Could not parse statistics {}: {}", path.display(), e);
                    (StatisticsDocument::default(), true)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("No statistics found at {}", path.display());
                (StatisticsDocument::default(), true)
            }
            Err(e) => {
                error!("Could not read statistics {}: {}", path.display(), e);
                (StatisticsDocument::default(), false)
            }
        };

        let mut store = StatisticsStore {
            path: path.to_path_buf(),
            document,
            high_score_limit,
        };
        store.trim_high_scores();

        if repair {
            warn!("Writing fresh statistics to {}", path.display());
            store.persist();
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &StatisticsDocument {
        &self.document
    }

    pub fn record_answer(
        &mut self,
        category: Category,
        difficulty: Difficulty,
        mode: Mode,
        correct: bool,
    ) {
        let document = &mut self.document;
        document.total_questions_answered += 1;
        if correct {
            document.correct_answers += 1;
        }
        document
            .categories
            .entry(category.to_string())
            .or_default()
            .record(correct);
        document
            .difficulty_stats
            .entry(difficulty.to_string())
            .or_default()
            .record(correct);
        document
            .mode_stats
            .entry(mode.to_string())
            .or_default()
            .record(correct);
        self.persist();
    }

    pub fn add_high_score(&mut self, entry: HighScoreEntry) {
        self.document.high_scores.push(entry);
        self.trim_high_scores();
        self.persist();
    }

    fn trim_high_scores(&mut self) {
        let high_scores = &mut self.document.high_scores;
        // Stable, so equal scores keep insertion order
        high_scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        high_scores.truncate(self.high_score_limit);
    }

    pub fn set_last_session(&mut self, snapshot: SessionSnapshot) {
        self.document.last_session = Some(LastSession {
            category: snapshot.category.to_string(),
            difficulty: snapshot.difficulty.to_string(),
            mode: snapshot.mode.to_string(),
            score: snapshot.score,
            questions_answered: snapshot.questions_answered,
            correct_answers: snapshot.correct_answers,
            date: timestamp(),
        });
        self.persist();
    }

    pub fn reset(&mut self) {
        let extra = std::mem::take(&mut self.document.extra);
        self.document = StatisticsDocument {
            extra,
            ..Default::default()
        };
        self.persist();
    }

    /// Writes the whole document, overwriting the file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Could not create statistics directory {}", parent.display())
                })?;
            }
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Could not write statistics {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.document)
            .with_context(|| format!("Could not serialize statistics {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Could not write statistics {}", self.path.display()))?;
        debug!("Saved statistics to {}", self.path.display());
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            error!("{:#}", e);
        }
    }
}
