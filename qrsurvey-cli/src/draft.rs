//! Survey draft files read by `qrsurvey encode`.
//!
//! ```json
//! {
//!   "title": "Lunch Poll",
//!   "questions": [
//!     { "text": "Pizza or Sushi?", "type": "multiple-choice", "options": ["Pizza", "Sushi"] },
//!     { "text": "Anything else?", "type": "free-text" }
//!   ]
//! }
//! ```
//!
//! Ids are not part of the file; they are assigned in order when the
//! draft is built.

use std::path::Path;

use qrsurvey::codec::WireKind;
use qrsurvey::{MultipleChoiceQuestion, QuestionType, SurveyDraft};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A survey as written by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DraftFile {
    pub title: String,
    pub questions: Vec<DraftQuestion>,
}

/// One question of a [`DraftFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DraftQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: WireKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl DraftFile {
    /// Read and parse a draft file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a draft.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|err| Error::draft(path, err.to_string()))
    }

    /// Build an editable draft, assigning ids in file order.
    ///
    /// Option counts outside what the editor allows are rejected here, since
    /// the draft could not represent them. Everything else (blank text,
    /// blank options, missing title) is left to [`SurveyDraft::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first question the editor cannot hold.
    pub fn to_draft(&self, path: &Path) -> Result<SurveyDraft> {
        let mut draft = SurveyDraft::new();
        draft.set_title(self.title.as_str());

        for (index, question) in self.questions.iter().enumerate() {
            let position = index + 1;
            let id = match question.kind {
                WireKind::FreeText => {
                    if !question.options.is_empty() {
                        return Err(Error::draft(
                            path,
                            format!("question {position} is free-text but has options"),
                        ));
                    }
                    draft.add_question(QuestionType::FreeText)
                }
                WireKind::MultipleChoice => {
                    let count = question.options.len();
                    if !(MultipleChoiceQuestion::MIN_OPTIONS..=MultipleChoiceQuestion::MAX_OPTIONS)
                        .contains(&count)
                    {
                        return Err(Error::draft(
                            path,
                            format!(
                                "question {position} has {count} options, expected {} to {}",
                                MultipleChoiceQuestion::MIN_OPTIONS,
                                MultipleChoiceQuestion::MAX_OPTIONS
                            ),
                        ));
                    }
                    let id = draft.add_question(QuestionType::MultipleChoice);
                    for (slot, option) in question.options.iter().enumerate() {
                        if slot >= MultipleChoiceQuestion::MIN_OPTIONS {
                            draft.add_option(id);
                        }
                        draft.set_option(id, slot, option.as_str());
                    }
                    id
                }
            };
            draft.set_question_text(id, question.text.as_str());
        }

        tracing::debug!(
            path = %path.display(),
            questions = draft.questions().len(),
            "draft loaded"
        );
        Ok(draft)
    }
}
