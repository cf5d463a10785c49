//! Survey ⇄ URL query parameters.
//!
//! A survey link carries two parameters:
//! - `t`: the trimmed title
//! - `q`: the question list as a JSON array
//!
//! Both are UTF-8 bytes encoded as URL-safe base64 without padding, so
//! they survive URL transport without percent-escaping. Decoding accepts
//! padded input as well.
//!
//! Decoded payloads are checked field by field: a payload that parses as
//! JSON but breaks a survey invariant is rejected just like garbage.

use std::collections::HashSet;
use std::string::FromUtf8Error;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{MultipleChoiceQuestion, Question, QuestionId, QuestionKind, Survey};

/// Query parameter holding the encoded title.
pub const TITLE_PARAM: &str = "t";

/// Query parameter holding the encoded question list.
pub const QUESTIONS_PARAM: &str = "q";

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error type for encoding and decoding survey links.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Missing query parameter '{0}'")]
    MissingParam(&'static str),

    #[error("Parameter '{param}' is not valid base64: {source}")]
    Base64 {
        param: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Parameter '{param}' is not valid UTF-8: {source}")]
    Utf8 {
        param: &'static str,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Question list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Survey title is empty")]
    EmptyTitle,

    #[error("Survey has no questions")]
    NoQuestions,

    #[error("Question id {0} appears more than once")]
    DuplicateId(QuestionId),

    #[error("Question {position}: {reason}")]
    InvalidQuestion { position: usize, reason: String },

    #[error("Invalid survey link: {0}")]
    Url(#[from] url::ParseError),
}

impl CodecError {
    fn invalid_question(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidQuestion {
            position,
            reason: reason.into(),
        }
    }
}

/// Question type as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireKind {
    FreeText,
    MultipleChoice,
}

/// One question as it appears inside the `q` parameter.
///
/// Free-text questions carry no `options` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireQuestion {
    pub id: u64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: WireKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&Question> for WireQuestion {
    fn from(question: &Question) -> Self {
        match question.kind() {
            QuestionKind::FreeText => Self {
                id: question.id().get(),
                text: question.text().to_string(),
                kind: WireKind::FreeText,
                options: None,
            },
            QuestionKind::MultipleChoice(mcq) => Self {
                id: question.id().get(),
                text: question.text().to_string(),
                kind: WireKind::MultipleChoice,
                options: Some(mcq.options().to_vec()),
            },
        }
    }
}

impl WireQuestion {
    /// Convert into a domain question, checking every field.
    fn into_question(self, position: usize) -> Result<Question, CodecError> {
        if self.text.trim().is_empty() {
            return Err(CodecError::invalid_question(position, "text is empty"));
        }
        let kind = match (self.kind, self.options) {
            (WireKind::FreeText, None) => QuestionKind::FreeText,
            (WireKind::FreeText, Some(_)) => {
                return Err(CodecError::invalid_question(
                    position,
                    "free-text question carries options",
                ));
            }
            (WireKind::MultipleChoice, None) => {
                return Err(CodecError::invalid_question(
                    position,
                    "multiple-choice question has no options",
                ));
            }
            (WireKind::MultipleChoice, Some(options)) => {
                let mcq = MultipleChoiceQuestion::new(options);
                check_options(&mcq, position)?;
                QuestionKind::MultipleChoice(mcq)
            }
        };
        Ok(Question::new(QuestionId::new(self.id), self.text, kind))
    }
}

/// A survey as plain JSON, for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyPayload {
    pub title: String,
    pub questions: Vec<WireQuestion>,
}

impl From<&Survey> for SurveyPayload {
    fn from(survey: &Survey) -> Self {
        Self {
            title: survey.title().to_string(),
            questions: survey.questions().iter().map(WireQuestion::from).collect(),
        }
    }
}

/// Reversibly encode a string for use as a query parameter value.
pub fn encode_text(text: &str) -> String {
    ENGINE.encode(text.as_bytes())
}

/// Reverse [`encode_text`].
pub fn decode_text(param: &'static str, encoded: &str) -> Result<String, CodecError> {
    let bytes = ENGINE
        .decode(encoded.trim())
        .map_err(|source| CodecError::Base64 { param, source })?;
    String::from_utf8(bytes).map_err(|source| CodecError::Utf8 { param, source })
}

/// Encode the trimmed title.
pub fn encode_title(title: &str) -> String {
    encode_text(title.trim())
}

/// Decode the `t` parameter.
pub fn decode_title(encoded: &str) -> Result<String, CodecError> {
    let title = decode_text(TITLE_PARAM, encoded)?;
    if title.trim().is_empty() {
        return Err(CodecError::EmptyTitle);
    }
    Ok(title)
}

/// Encode the question list (each question trimmed).
pub fn encode_questions(questions: &[Question]) -> Result<String, CodecError> {
    let wire: Vec<WireQuestion> = questions
        .iter()
        .map(|q| WireQuestion::from(&q.trimmed()))
        .collect();
    let json = serde_json::to_string(&wire)?;
    Ok(encode_text(&json))
}

/// Decode and check the `q` parameter.
pub fn decode_questions(encoded: &str) -> Result<Vec<Question>, CodecError> {
    let json = decode_text(QUESTIONS_PARAM, encoded)?;
    let wire: Vec<WireQuestion> = serde_json::from_str(&json)?;
    if wire.is_empty() {
        return Err(CodecError::NoQuestions);
    }

    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(wire.len());
    for (position, item) in wire.into_iter().enumerate() {
        let question = item.into_question(position + 1)?;
        if !seen.insert(question.id()) {
            return Err(CodecError::DuplicateId(question.id()));
        }
        questions.push(question);
    }
    Ok(questions)
}

/// Check the invariants every encodable survey holds.
///
/// The survey is expected to be trimmed already.
pub fn check_survey(survey: &Survey) -> Result<(), CodecError> {
    if survey.title().trim().is_empty() {
        return Err(CodecError::EmptyTitle);
    }
    if survey.is_empty() {
        return Err(CodecError::NoQuestions);
    }
    let mut seen = HashSet::new();
    for (index, question) in survey.questions().iter().enumerate() {
        let position = index + 1;
        if !seen.insert(question.id()) {
            return Err(CodecError::DuplicateId(question.id()));
        }
        if question.text().trim().is_empty() {
            return Err(CodecError::invalid_question(position, "text is empty"));
        }
        if let QuestionKind::MultipleChoice(mcq) = question.kind() {
            check_options(mcq, position)?;
        }
    }
    Ok(())
}

fn check_options(mcq: &MultipleChoiceQuestion, position: usize) -> Result<(), CodecError> {
    if !mcq.has_valid_count() {
        return Err(CodecError::invalid_question(
            position,
            format!(
                "{} options, expected {} to {}",
                mcq.len(),
                MultipleChoiceQuestion::MIN_OPTIONS,
                MultipleChoiceQuestion::MAX_OPTIONS
            ),
        ));
    }
    if let Some(blank) = mcq.options().iter().position(|o| o.trim().is_empty()) {
        return Err(CodecError::invalid_question(
            position,
            format!("option {} is empty", blank + 1),
        ));
    }
    if let Some(repeat) = mcq.first_duplicate() {
        return Err(CodecError::invalid_question(
            position,
            format!("option {} repeats an earlier option", repeat + 1),
        ));
    }
    Ok(())
}

/// Trim a survey the way the encoder sends it.
pub fn trimmed(survey: &Survey) -> Survey {
    Survey::new(
        survey.title().trim(),
        survey.questions().iter().map(Question::trimmed).collect(),
    )
}

/// Encode a survey onto `base`, replacing any existing `t`/`q` parameters.
pub fn encode_survey(survey: &Survey, base: &Url) -> Result<Url, CodecError> {
    let survey = trimmed(survey);
    check_survey(&survey)?;

    let title = encode_title(survey.title());
    let questions = encode_questions(survey.questions())?;

    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != TITLE_PARAM && k != QUESTIONS_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs
            .append_pair(TITLE_PARAM, &title)
            .append_pair(QUESTIONS_PARAM, &questions);
    }

    tracing::debug!(
        questions = survey.len(),
        link_len = url.as_str().len(),
        "encoded survey link"
    );
    Ok(url)
}

/// Decode a survey from its two query parameter values.
///
/// Each parameter is decoded independently; a missing one is an error.
pub fn decode_survey_params(
    title: Option<&str>,
    questions: Option<&str>,
) -> Result<Survey, CodecError> {
    let title = title.ok_or(CodecError::MissingParam(TITLE_PARAM))?;
    let questions = questions.ok_or(CodecError::MissingParam(QUESTIONS_PARAM))?;
    let title = decode_title(title)?;
    let questions = decode_questions(questions)?;
    Ok(Survey::new(title, questions))
}

/// Decode a survey from a full link or a bare query string.
///
/// Accepts `https://host/take?t=..&q=..`, `?t=..&q=..`, `t=..&q=..`,
/// and hash-routed links such as `https://host/#/take?t=..&q=..`.
pub fn decode_survey_url(link: &str) -> Result<Survey, CodecError> {
    let link = link.trim();
    let (title, questions) = match Url::parse(link) {
        Ok(url) => {
            let (mut t, mut q) = find_params(url.query().unwrap_or_default());
            if (t.is_none() || q.is_none())
                && let Some((_, fragment_query)) = url.fragment().and_then(|f| f.split_once('?'))
            {
                let (ft, fq) = find_params(fragment_query);
                t = t.or(ft);
                q = q.or(fq);
            }
            (t, q)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let query = link.split_once('?').map_or(link, |(_, query)| query);
            find_params(query)
        }
        Err(err) => return Err(err.into()),
    };

    let result = decode_survey_params(title.as_deref(), questions.as_deref());
    if let Err(err) = &result {
        tracing::warn!(%err, "rejected survey link");
    }
    result
}

fn find_params(query: &str) -> (Option<String>, Option<String>) {
    let mut title = None;
    let mut questions = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            TITLE_PARAM if title.is_none() => title = Some(value.into_owned()),
            QUESTIONS_PARAM if questions.is_none() => questions = Some(value.into_owned()),
            _ => {}
        }
    }
    (title, questions)
}
