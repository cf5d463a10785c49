use crate::{AnswerError, QuestionId};

/// Why a backend returned without a complete set of answers.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The respondent walked away: Ctrl+C, Escape or a closed window.
    #[error("survey cancelled")]
    Cancelled,

    /// The backend returned without answering every question.
    #[error("unanswered question(s): {}", format_ids(.0))]
    Incomplete(Vec<QuestionId>),

    /// The backend returned an answer the survey does not accept.
    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),

    /// The front end itself failed.
    #[error("front end failed: {0}")]
    Backend(#[source] anyhow::Error),
}

impl SurveyError {
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn format_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
