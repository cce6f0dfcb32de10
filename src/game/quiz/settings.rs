use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub question_duration_seconds: u64,
    pub feedback_duration_millis: u64,
    pub questions_per_run: usize,
    pub passing_score: f64,
    pub high_score_limit: usize,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            question_duration_seconds: 30,
            feedback_duration_millis: 1500,
            questions_per_run: 10,
            passing_score: 80.0,
            high_score_limit: 10,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Reads optional overrides from a JSON file, falling back to defaults.
    pub fn open(source: &Path) -> Settings {
        if !source.exists() {
            return Settings::default();
        }
        match Self::try_open(source) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{:#}", e);
                Settings::default()
            }
        }
    }

    fn try_open(source: &Path) -> Result<Settings> {
        let content = fs::read_to_string(source)
            .with_context(|| format!("Could not read settings {}", source.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Could not parse settings {}", source.display()))?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        if self.question_duration_seconds == 0 {
            self.question_duration_seconds = defaults.question_duration_seconds;
        }
        if self.questions_per_run == 0 {
            self.questions_per_run = defaults.questions_per_run;
        }
        if self.high_score_limit == 0 {
            self.high_score_limit = defaults.high_score_limit;
        }
        self.passing_score = self.passing_score.max(0.0).min(100.0);
        self
    }

    pub fn question_duration(&self) -> Duration {
        Duration::from_secs(self.question_duration_seconds)
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "questions_per_run": 20 }"#).unwrap();
        assert_eq!(settings.questions_per_run, 20);
        assert_eq!(settings.question_duration(), Duration::from_secs(30));
        assert_eq!(settings.high_score_limit, 10);
    }

    #[test]
    fn nonsensical_values_are_replaced() {
        let settings: Settings = serde_json::from_str(
            r#"{ "question_duration_seconds": 0, "passing_score": 150.0 }"#,
        )
        .unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.question_duration_seconds, 30);
        assert_eq!(settings.passing_score, 100.0);
    }
}
