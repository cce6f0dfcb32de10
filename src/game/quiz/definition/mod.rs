use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

pub mod question;
pub mod topic;

pub use question::{Question, RawQuestion};
pub use topic::{Category, Difficulty};

/// Every question known to the quiz, grouped by category and difficulty.
/// Loaded once and never modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    pools: HashMap<(Category, Difficulty), Vec<Question>>,
}

impl QuestionBank {
    /// Reads a question bank file. A missing or malformed file yields an empty bank.
    pub fn open(source: &Path) -> QuestionBank {
        match Self::try_open(source) {
            Ok(bank) => {
                info!(
                    "Loaded {} questions from {}",
                    bank.num_questions(),
                    source.display()
                );
                bank
            }
            Err(e) => {
                warn!("{:#}", e);
                QuestionBank::default()
            }
        }
    }

    fn try_open(source: &Path) -> Result<QuestionBank> {
        let content = fs::read_to_string(source)
            .with_context(|| format!("Could not read question bank {}", source.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Could not parse question bank {}", source.display()))
    }

    /// Parses a question bank. Only content that is not a JSON object fails;
    /// unknown keys and bad records are skipped with a warning.
    pub fn from_json(content: &str) -> Result<QuestionBank> {
        let raw_bank: Map<String, Value> = match serde_json::from_str(content)? {
            Value::Object(map) => map,
            _ => return Err(anyhow!("Question bank is not a JSON object")),
        };
        let mut pools = HashMap::new();

        for (category_name, difficulties) in raw_bank {
            let category = match category_name.parse::<Category>() {
                Ok(c) => c,
                Err(e) => {
                    warn!("Skipping questions: {}", e);
                    continue;
                }
            };
            let difficulties = match difficulties {
                Value::Object(map) => map,
                _ => {
                    warn!("Skipping {}: expected difficulties", category);
                    continue;
                }
            };
            for (difficulty_name, raw_questions) in difficulties {
                let difficulty = match difficulty_name.parse::<Difficulty>() {
                    Ok(d) => d,
                    Err(e) => {
                        warn!("Skipping questions in {}: {}", category, e);
                        continue;
                    }
                };
                let raw_questions = match raw_questions {
                    Value::Array(records) => records,
                    _ => {
                        warn!("Skipping {} ({}): expected a list", category, difficulty);
                        continue;
                    }
                };
                let pool: &mut Vec<Question> = pools.entry((category, difficulty)).or_default();
                for record in raw_questions {
                    let question = serde_json::from_value::<RawQuestion>(record)
                        .map_err(anyhow::Error::from)
                        .and_then(Question::try_from);
                    match question {
                        Ok(q) => pool.push(q),
                        Err(e) => warn!(
                            "Skipping invalid question in {} ({}): {}",
                            category, difficulty, e
                        ),
                    }
                }
            }
        }

        pools.retain(|_k, pool: &mut Vec<Question>| !pool.is_empty());
        Ok(QuestionBank { pools })
    }

    /// Questions for one category and difficulty, in file order.
    pub fn get_questions(&self, category: Category, difficulty: Difficulty) -> &[Question] {
        self.pools
            .get(&(category, difficulty))
            .map(|pool| pool.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn num_questions(&self) -> usize {
        self.pools.values().map(|pool| pool.len()).sum()
    }

    pub fn categories(&self) -> Vec<(Category, Difficulty, usize)> {
        let mut listing: Vec<_> = self
            .pools
            .iter()
            .map(|((c, d), pool)| (*c, *d, pool.len()))
            .collect();
        listing.sort();
        listing
    }
}
