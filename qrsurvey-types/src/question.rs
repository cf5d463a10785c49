use std::collections::HashSet;

use crate::QuestionId;

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Identifier, unique within the survey.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    text: String,

    /// The kind of question (determines the answer input).
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: QuestionId, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
        }
    }

    /// Create a free-text question.
    pub fn free_text(id: QuestionId, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::FreeText)
    }

    /// Create a multiple-choice question.
    pub fn multiple_choice<I, S>(id: QuestionId, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            text,
            QuestionKind::MultipleChoice(MultipleChoiceQuestion::new(options)),
        )
    }

    /// Get the question id.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get a mutable reference to the prompt text.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get a mutable reference to the question kind.
    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// Get the question type tag.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Options of a multiple-choice question, empty for free text.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::FreeText => &[],
            QuestionKind::MultipleChoice(mcq) => mcq.options(),
        }
    }

    /// Check whether `answer` is acceptable for this question.
    ///
    /// Free text accepts anything non-blank; multiple choice accepts exactly
    /// one of its options.
    pub fn accepts(&self, answer: &str) -> bool {
        match &self.kind {
            QuestionKind::FreeText => !answer.trim().is_empty(),
            QuestionKind::MultipleChoice(mcq) => mcq.options.iter().any(|o| o == answer),
        }
    }

    /// Return a copy with the text and every option trimmed.
    pub fn trimmed(&self) -> Self {
        let kind = match &self.kind {
            QuestionKind::FreeText => QuestionKind::FreeText,
            QuestionKind::MultipleChoice(mcq) => {
                QuestionKind::MultipleChoice(MultipleChoiceQuestion {
                    options: mcq.options.iter().map(|o| o.trim().to_string()).collect(),
                })
            }
        };
        Self {
            id: self.id,
            text: self.text.trim().to_string(),
            kind,
        }
    }
}

/// The kind of question, determining the answer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free-form text answer.
    FreeText,

    /// Pick exactly one of the listed options.
    MultipleChoice(MultipleChoiceQuestion),
}

impl QuestionKind {
    /// Get the type tag for this kind.
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::FreeText => QuestionType::FreeText,
            Self::MultipleChoice(_) => QuestionType::MultipleChoice,
        }
    }

    /// Create an empty kind of the given type.
    ///
    /// Multiple choice starts with the minimum number of blank options.
    pub fn blank(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::FreeText => Self::FreeText,
            QuestionType::MultipleChoice => Self::MultipleChoice(MultipleChoiceQuestion::blank()),
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, Self::MultipleChoice(_))
    }
}

/// Type tag of a question, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuestionType {
    #[default]
    FreeText,
    MultipleChoice,
}

impl QuestionType {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FreeText => "Free text",
            Self::MultipleChoice => "Multiple choice",
        }
    }
}

/// Configuration for a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceQuestion {
    /// The options, in display order.
    options: Vec<String>,
}

impl MultipleChoiceQuestion {
    /// Fewest options a multiple-choice question may have.
    pub const MIN_OPTIONS: usize = 2;

    /// Most options a multiple-choice question may have.
    pub const MAX_OPTIONS: usize = 6;

    /// Create a question with the given options.
    ///
    /// The option count is not checked here; authoring and decoding
    /// enforce the bounds.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a question with [`MIN_OPTIONS`](Self::MIN_OPTIONS) empty options.
    pub fn blank() -> Self {
        Self {
            options: vec![String::new(); Self::MIN_OPTIONS],
        }
    }

    /// Get the options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Get a mutable reference to one option.
    pub fn option_mut(&mut self, index: usize) -> Option<&mut String> {
        self.options.get_mut(index)
    }

    /// Append an empty option. No-op at the maximum; returns whether it was added.
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= Self::MAX_OPTIONS {
            return false;
        }
        self.options.push(String::new());
        true
    }

    /// Remove the option at `index`. No-op at the minimum or for an
    /// out-of-range index; returns whether it was removed.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= Self::MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Check that the option count is within bounds.
    pub fn has_valid_count(&self) -> bool {
        (Self::MIN_OPTIONS..=Self::MAX_OPTIONS).contains(&self.options.len())
    }

    /// Index of the first option that repeats an earlier one, compared
    /// after trimming. Blank options are ignored.
    pub fn first_duplicate(&self) -> Option<usize> {
        let mut seen = HashSet::new();
        self.options
            .iter()
            .map(|option| option.trim())
            .position(|option| !option.is_empty() && !seen.insert(option))
    }
}
