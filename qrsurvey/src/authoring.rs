//! The editable draft behind the survey builder.
//!
//! A [`SurveyDraft`] is the mutable state of one authoring session. It owns
//! its own [`IdGenerator`], so ids never leak between sessions. Every edit
//! is addressed by [`QuestionId`]; edits that would break a structural bound
//! (fewer than two or more than six options) are no-ops and report `false`.

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::codec::{self, CodecError};
use crate::{
    IdGenerator, MultipleChoiceQuestion, Question, QuestionId, QuestionKind, QuestionType, Survey,
};

/// Why a draft cannot be encoded yet.
#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    #[error("The survey needs a title")]
    EmptyTitle,

    #[error("The survey needs at least one question")]
    NoQuestions,

    #[error("Question {position} has no text")]
    EmptyQuestionText { id: QuestionId, position: usize },

    #[error("Question {position} reuses id {id}")]
    DuplicateId { id: QuestionId, position: usize },

    #[error("Question {position}, option {option} is empty")]
    EmptyOption {
        id: QuestionId,
        position: usize,
        option: usize,
    },

    #[error("Question {position}, option {option} repeats an earlier option")]
    DuplicateOption {
        id: QuestionId,
        position: usize,
        option: usize,
    },

    #[error("Question {position} has {count} options")]
    OptionCount {
        id: QuestionId,
        position: usize,
        count: usize,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Mutable survey state for one authoring session.
#[derive(Debug, Clone, Default)]
pub struct SurveyDraft {
    title: String,
    questions: Vec<Question>,
    ids: IdGenerator,
}

impl SurveyDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-open an existing survey for editing.
    ///
    /// Ids are preserved; new questions continue after the highest one and
    /// never take an id that is already present.
    pub fn from_survey(survey: &Survey) -> Self {
        let ids = survey
            .questions()
            .iter()
            .map(Question::id)
            .max()
            .map_or_else(IdGenerator::new, IdGenerator::after);
        Self {
            title: survey.title().to_string(),
            questions: survey.questions().to_vec(),
            ids,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Mutable access to the title, for text widgets.
    pub fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    fn question_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id() == id)
    }

    fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Mutable access to a question's text, for text widgets.
    pub fn question_text_mut(&mut self, id: QuestionId) -> Option<&mut String> {
        self.question_mut(id).map(Question::text_mut)
    }

    /// Mutable access to one option, for text widgets.
    pub fn option_mut(&mut self, id: QuestionId, index: usize) -> Option<&mut String> {
        match self.question_mut(id)?.kind_mut() {
            QuestionKind::FreeText => None,
            QuestionKind::MultipleChoice(mcq) => mcq.option_mut(index),
        }
    }

    /// Append a blank question and return its id.
    ///
    /// Multiple-choice questions start with two empty options.
    pub fn add_question(&mut self, question_type: QuestionType) -> QuestionId {
        let questions = &self.questions;
        let id = self
            .ids
            .next_unused(|id| questions.iter().any(|q| q.id() == id));
        self.questions
            .push(Question::new(id, "", QuestionKind::blank(question_type)));
        id
    }

    pub fn remove_question(&mut self, id: QuestionId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.questions.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn move_question_up(&mut self, id: QuestionId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.questions.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn move_question_down(&mut self, id: QuestionId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.questions.len() => {
                self.questions.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn set_question_text(&mut self, id: QuestionId, text: impl Into<String>) -> bool {
        match self.question_mut(id) {
            Some(question) => {
                *question.text_mut() = text.into();
                true
            }
            None => false,
        }
    }

    /// Change a question's type.
    ///
    /// Switching to multiple choice seeds two empty options; switching to
    /// free text drops the options. Setting the current type changes nothing.
    pub fn set_question_type(&mut self, id: QuestionId, question_type: QuestionType) -> bool {
        let Some(question) = self.question_mut(id) else {
            return false;
        };
        if question.question_type() != question_type {
            *question.kind_mut() = QuestionKind::blank(question_type);
        }
        true
    }

    /// Add an empty option. No-op at six options or for free text.
    pub fn add_option(&mut self, id: QuestionId) -> bool {
        self.with_options(id, MultipleChoiceQuestion::add_option)
    }

    /// Remove an option. No-op at two options or for free text.
    pub fn remove_option(&mut self, id: QuestionId, index: usize) -> bool {
        self.with_options(id, |mcq| mcq.remove_option(index))
    }

    pub fn set_option(&mut self, id: QuestionId, index: usize, text: impl Into<String>) -> bool {
        match self.option_mut(id, index) {
            Some(option) => {
                *option = text.into();
                true
            }
            None => false,
        }
    }

    fn with_options(
        &mut self,
        id: QuestionId,
        edit: impl FnOnce(&mut MultipleChoiceQuestion) -> bool,
    ) -> bool {
        match self.question_mut(id).map(Question::kind_mut) {
            Some(QuestionKind::MultipleChoice(mcq)) => edit(mcq),
            _ => false,
        }
    }

    /// Every reason the draft cannot be encoded, in display order.
    pub fn issues(&self) -> Vec<AuthoringError> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(AuthoringError::EmptyTitle);
        }
        if self.questions.is_empty() {
            issues.push(AuthoringError::NoQuestions);
        }
        let mut seen = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            let position = index + 1;
            let id = question.id();
            if !seen.insert(id) {
                issues.push(AuthoringError::DuplicateId { id, position });
            }
            if question.text().trim().is_empty() {
                issues.push(AuthoringError::EmptyQuestionText { id, position });
            }
            if let QuestionKind::MultipleChoice(mcq) = question.kind() {
                if !mcq.has_valid_count() {
                    issues.push(AuthoringError::OptionCount {
                        id,
                        position,
                        count: mcq.len(),
                    });
                }
                for (option, text) in mcq.options().iter().enumerate() {
                    if text.trim().is_empty() {
                        issues.push(AuthoringError::EmptyOption {
                            id,
                            position,
                            option: option + 1,
                        });
                    }
                }
                if let Some(repeat) = mcq.first_duplicate() {
                    issues.push(AuthoringError::DuplicateOption {
                        id,
                        position,
                        option: repeat + 1,
                    });
                }
            }
        }
        issues
    }

    /// Check the draft, reporting the first problem.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    /// Whether the generate action should be enabled.
    pub fn is_encodable(&self) -> bool {
        self.validate().is_ok()
    }

    /// A trimmed snapshot of the draft, if it is encodable.
    pub fn to_survey(&self) -> Result<Survey, AuthoringError> {
        self.validate()?;
        Ok(codec::trimmed(&Survey::new(
            self.title.clone(),
            self.questions.clone(),
        )))
    }

    /// Encode the draft into a link on `base`.
    pub fn encode(&self, base: &Url) -> Result<SurveyLink, AuthoringError> {
        let survey = self.to_survey()?;
        let url = codec::encode_survey(&survey, base)?;
        Ok(SurveyLink { url, survey })
    }
}

/// An encoded survey link, together with the survey it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyLink {
    url: Url,
    survey: Survey,
}

impl SurveyLink {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn into_string(self) -> String {
        self.url.into()
    }
}

impl fmt::Display for SurveyLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// What the generator turns into a QR code.
#[derive(Debug, Clone)]
pub enum QrSource {
    /// Any text, typically a URL, encoded as-is.
    Url(String),

    /// A survey, encoded as a link first.
    Survey(SurveyDraft),
}

impl Default for QrSource {
    fn default() -> Self {
        Self::Url(String::new())
    }
}

impl QrSource {
    /// The exact string to put into the code, or `None` while the input
    /// is not generatable (blank text, or a draft with issues).
    pub fn content(&self, base: &Url) -> Option<String> {
        match self {
            Self::Url(text) => {
                let text = text.trim();
                crate::qr::is_generatable(text).then(|| text.to_string())
            }
            Self::Survey(draft) => draft.encode(base).ok().map(SurveyLink::into_string),
        }
    }

    pub fn is_generatable(&self, base: &Url) -> bool {
        self.content(base).is_some()
    }
}
