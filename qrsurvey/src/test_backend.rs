//! Test backend for answering surveys without user interaction.
//!
//! `TestBackend` answers every question from a pre-filled table, keyed by
//! question id. Each canned answer still goes through the validator, so a
//! wrong option fails just as it would for a real respondent.
//!
//! # Example
//!
//! ```rust
//! use qrsurvey::{RespondentSession, SessionState, TestBackend};
//!
//! let link = "https://example.com/take?t=SGk&q=W3siaWQiOjEsInRleHQiOiJOYW1lPyIsInR5cGUiOiJmcmVlLXRleHQifV0";
//! let mut session = RespondentSession::from_url(link);
//! session.run(&TestBackend::new().with_answer(1u64, "Ada")).unwrap();
//! assert_eq!(session.state(), SessionState::Submitted);
//! ```

use std::collections::HashMap;

use crate::{Answers, Question, QuestionId, Survey, SurveyBackend};

/// A backend that returns pre-configured answers.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    answers: HashMap<QuestionId, String>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("Missing answer for question {0}")]
    MissingAnswer(QuestionId),

    #[error("Validation failed for question {id}: {message}")]
    ValidationFailed { id: QuestionId, message: String },
}

impl TestBackend {
    /// Create a new empty test backend.
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    /// Add the answer for a given question.
    pub fn with_answer(mut self, id: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        self.answers.insert(id.into(), value.into());
        self
    }
}

impl SurveyBackend for TestBackend {
    type Error = TestBackendError;

    fn collect(
        &self,
        survey: &Survey,
        validate: &dyn Fn(&Question, &str) -> Result<(), String>,
    ) -> Result<Answers, Self::Error> {
        let mut answers = Answers::new();
        for question in survey.questions() {
            let id = question.id();
            let value = self
                .answers
                .get(&id)
                .ok_or(TestBackendError::MissingAnswer(id))?;
            validate(question, value)
                .map_err(|message| TestBackendError::ValidationFailed { id, message })?;
            answers.insert(id, value.as_str());
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey() -> Survey {
        Survey::new(
            "Lunch Poll",
            vec![
                Question::multiple_choice(
                    QuestionId::new(1),
                    "Pizza or Sushi?",
                    ["Pizza", "Sushi"],
                ),
                Question::free_text(QuestionId::new(2), "Allergies?"),
            ],
        )
    }

    fn accept_all(_: &Question, _: &str) -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn collects_in_question_order() {
        let backend = TestBackend::new().with_answer(2u64, "none").with_answer(1u64, "Sushi");
        let answers = backend.collect(&survey(), &accept_all).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(QuestionId::new(1)), Some("Sushi"));
    }

    #[test]
    fn missing_answer_is_reported() {
        let backend = TestBackend::new().with_answer(1u64, "Pizza");
        let err = backend.collect(&survey(), &accept_all).unwrap_err();
        assert!(matches!(err, TestBackendError::MissingAnswer(id) if id == QuestionId::new(2)));
    }

    #[test]
    fn validator_is_consulted() {
        let backend = TestBackend::new().with_answer(1u64, "Pizza").with_answer(2u64, "none");
        let reject = |q: &Question, _: &str| -> Result<(), String> {
            if q.id() == QuestionId::new(2) {
                Err("nope".to_string())
            } else {
                Ok(())
            }
        };
        let err = backend.collect(&survey(), &reject).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed for question 2: nope");
    }
}
