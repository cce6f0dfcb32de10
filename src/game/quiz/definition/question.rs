use anyhow::{anyhow, Error, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const NUM_OPTIONS: usize = 4;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_index: usize,
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_answer_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw_question: RawQuestion) -> Result<Self> {
        let num_options = raw_question.options.len();
        if num_options != NUM_OPTIONS {
            return Err(anyhow!(
                "Question `{}` has {} options instead of {}",
                raw_question.question,
                num_options,
                NUM_OPTIONS
            ));
        }

        let correct_index = usize::try_from(raw_question.correct)
            .ok()
            .filter(|i| *i < NUM_OPTIONS)
            .ok_or_else(|| {
                anyhow!(
                    "Question `{}` has an out of range correct answer: {}",
                    raw_question.question,
                    raw_question.correct
                )
            })?;

        let mut options = raw_question.options.into_iter();
        let mut next_option = || options.next().unwrap_or_default();
        let options = [next_option(), next_option(), next_option(), next_option()];

        Ok(Question {
            text: raw_question.question,
            options,
            correct_index,
            explanation: raw_question.explanation.filter(|e| !e.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_question() -> RawQuestion {
        RawQuestion {
            question: "What does a red octagonal sign mean?".to_owned(),
            options: vec!["Stop", "Yield", "Slow", "Go"]
                .into_iter()
                .map(String::from)
                .collect(),
            correct: 0,
            explanation: Some("A red octagonal sign always means stop.".to_owned()),
        }
    }

    #[test]
    fn accepts_well_formed_question() {
        let question = Question::try_from(raw_question()).unwrap();
        assert_eq!(question.correct_index, 0);
        assert_eq!(question.correct_option(), "Stop");
        assert!(question.is_answer_correct(0));
        assert!(!question.is_answer_correct(3));
    }

    #[test]
    fn rejects_wrong_number_of_options() {
        let mut raw = raw_question();
        raw.options.pop();
        assert!(Question::try_from(raw).is_err());
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let mut raw = raw_question();
        raw.correct = 4;
        assert!(Question::try_from(raw.clone()).is_err());
        raw.correct = -1;
        assert!(Question::try_from(raw).is_err());
    }

    #[test]
    fn blank_explanation_is_dropped() {
        let mut raw = raw_question();
        raw.explanation = Some("   ".to_owned());
        let question = Question::try_from(raw).unwrap();
        assert_eq!(question.explanation, None);
    }
}
