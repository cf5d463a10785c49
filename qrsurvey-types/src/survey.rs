use crate::{Question, QuestionId};

/// A complete survey: a title and the questions in display order.
///
/// A survey is presentation-agnostic. It can be encoded into a link,
/// rendered as a GUI form, walked through in a terminal wizard, or turned
/// into an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    /// Title shown above the questions.
    pub title: String,

    /// All questions, in display (and answer) order.
    pub questions: Vec<Question>,
}

impl Survey {
    /// Create a new survey.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }

    /// Get the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
