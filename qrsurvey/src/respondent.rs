//! The respondent's side: one session per opened survey link.
//!
//! ```text
//! Loading ──load──▶ Invalid            (terminal)
//!    │
//!    └─────load──▶ Active ──submit──▶ Submitted   (terminal)
//! ```
//!
//! A session never retries a failed load and never accepts a second
//! submission. Answers stay in memory and are dropped with the session.

use crate::codec::{self, CodecError};
use crate::{AnswerError, Answers, Question, QuestionId, Survey, SurveyBackend, SurveyError};

/// Observable state of a respondent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing loaded yet.
    Loading,
    /// The link did not carry a usable survey. Terminal.
    Invalid,
    /// Showing the form and accepting answers.
    Active,
    /// Answers were submitted. Terminal.
    Submitted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Invalid | Self::Submitted)
    }
}

/// Error type for respondent session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session is {0:?}, expected {1:?}")]
    WrongState(SessionState, SessionState),

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error("Cannot submit: {} question(s) unanswered", .0.len())]
    Incomplete(Vec<QuestionId>),

    #[error(transparent)]
    Survey(#[from] SurveyError),
}

#[derive(Debug)]
enum Phase {
    Loading,
    Invalid(CodecError),
    Active { survey: Survey, answers: Answers },
    Submitted { survey: Survey, answers: Answers },
}

/// State of one respondent working through one survey.
#[derive(Debug)]
pub struct RespondentSession {
    phase: Phase,
}

impl Default for RespondentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RespondentSession {
    /// Create a session in the `Loading` state.
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
        }
    }

    /// Create a session and load it from a link.
    pub fn from_url(link: &str) -> Self {
        let mut session = Self::new();
        session.load(codec::decode_survey_url(link));
        session
    }

    /// Load the survey from a link. Only valid while `Loading`.
    pub fn load_url(&mut self, link: &str) -> Result<SessionState, SessionError> {
        self.require_state(SessionState::Loading)?;
        self.load(codec::decode_survey_url(link));
        Ok(self.state())
    }

    /// Load the survey from the raw `t` and `q` values. Only valid while `Loading`.
    pub fn load_params(
        &mut self,
        title: Option<&str>,
        questions: Option<&str>,
    ) -> Result<SessionState, SessionError> {
        self.require_state(SessionState::Loading)?;
        self.load(codec::decode_survey_params(title, questions));
        Ok(self.state())
    }

    fn load(&mut self, decoded: Result<Survey, CodecError>) {
        self.phase = match decoded {
            Ok(survey) => {
                tracing::debug!(
                    title = survey.title(),
                    questions = survey.len(),
                    "survey loaded"
                );
                Phase::Active {
                    survey,
                    answers: Answers::new(),
                }
            }
            Err(err) => {
                tracing::warn!(%err, "invalid survey");
                Phase::Invalid(err)
            }
        };
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Loading => SessionState::Loading,
            Phase::Invalid(_) => SessionState::Invalid,
            Phase::Active { .. } => SessionState::Active,
            Phase::Submitted { .. } => SessionState::Submitted,
        }
    }

    /// The survey, once loaded successfully.
    pub fn survey(&self) -> Option<&Survey> {
        match &self.phase {
            Phase::Active { survey, .. } | Phase::Submitted { survey, .. } => Some(survey),
            Phase::Loading | Phase::Invalid(_) => None,
        }
    }

    /// The answers given so far (empty unless Active or Submitted).
    pub fn answers(&self) -> Option<&Answers> {
        match &self.phase {
            Phase::Active { answers, .. } | Phase::Submitted { answers, .. } => Some(answers),
            Phase::Loading | Phase::Invalid(_) => None,
        }
    }

    /// Why the link was rejected, in the `Invalid` state.
    pub fn invalid_reason(&self) -> Option<&CodecError> {
        match &self.phase {
            Phase::Invalid(err) => Some(err),
            _ => None,
        }
    }

    fn require_state(&self, expected: SessionState) -> Result<(), SessionError> {
        let state = self.state();
        if state == expected {
            Ok(())
        } else {
            Err(SessionError::WrongState(state, expected))
        }
    }

    /// Record the answer to one question. Only valid while `Active`.
    ///
    /// Multiple-choice answers must name one of the question's options.
    pub fn answer(&mut self, id: QuestionId, value: impl Into<String>) -> Result<(), SessionError> {
        let state = self.state();
        let Phase::Active { survey, answers } = &mut self.phase else {
            return Err(SessionError::WrongState(state, SessionState::Active));
        };
        let value = value.into();
        Answers::check(survey, id, &value)?;
        answers.insert(id, value);
        Ok(())
    }

    /// Forget the answer to one question. Only valid while `Active`.
    pub fn clear_answer(&mut self, id: QuestionId) -> Result<(), SessionError> {
        let state = self.state();
        let Phase::Active { answers, .. } = &mut self.phase else {
            return Err(SessionError::WrongState(state, SessionState::Active));
        };
        answers.remove(id);
        Ok(())
    }

    /// Questions that still need an answer, in display order.
    pub fn unanswered(&self) -> Vec<QuestionId> {
        match &self.phase {
            Phase::Active { survey, answers } => survey
                .questions()
                .iter()
                .map(Question::id)
                .filter(|id| !answers.has_value(*id))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        match &self.phase {
            Phase::Active { survey, answers } => answers.is_complete_for(survey),
            _ => false,
        }
    }

    /// Submit the answers, moving to `Submitted`.
    ///
    /// Nothing is sent anywhere; this only ends the session.
    pub fn submit(&mut self) -> Result<&Answers, SessionError> {
        self.require_state(SessionState::Active)?;
        let missing = self.unanswered();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete(missing));
        }
        if let Phase::Active { survey, answers } =
            std::mem::replace(&mut self.phase, Phase::Loading)
        {
            tracing::info!(title = survey.title(), answers = answers.len(), "survey submitted");
            self.phase = Phase::Submitted { survey, answers };
        }
        match &self.phase {
            Phase::Submitted { answers, .. } => Ok(answers),
            _ => Err(SessionError::WrongState(self.state(), SessionState::Submitted)),
        }
    }

    /// Collect answers through a backend and submit them.
    ///
    /// On any failure the session stays `Active`.
    pub fn run<B: SurveyBackend>(&mut self, backend: &B) -> Result<&Answers, SessionError> {
        self.require_state(SessionState::Active)?;
        let Some(survey) = self.survey().cloned() else {
            return Err(SessionError::WrongState(self.state(), SessionState::Active));
        };

        let collected = backend
            .collect(&survey, &validate_answer)
            .map_err(|err| SurveyError::backend(err))?;

        let missing: Vec<QuestionId> = survey
            .questions()
            .iter()
            .map(Question::id)
            .filter(|id| !collected.has_value(*id))
            .collect();
        if !missing.is_empty() {
            return Err(SurveyError::Incomplete(missing).into());
        }
        for question in survey.questions() {
            if let Some(value) = collected.get(question.id()) {
                Answers::check(&survey, question.id(), value).map_err(SurveyError::InvalidAnswer)?;
                self.answer(question.id(), value)?;
            }
        }
        self.submit()
    }
}

/// The per-answer check handed to backends.
pub fn validate_answer(question: &Question, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("An answer is required".to_string());
    }
    if !question.accepts(value) {
        return Err(format!("Pick one of: {}", question.options().join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::{QuestionType, SurveyDraft};

    fn lunch_link() -> (String, QuestionId, QuestionId) {
        let mut draft = SurveyDraft::new();
        draft.set_title("Lunch Poll");
        let food = draft.add_question(QuestionType::MultipleChoice);
        draft.set_question_text(food, "Pizza or Sushi?");
        draft.set_option(food, 0, "Pizza");
        draft.set_option(food, 1, "Sushi");
        let notes = draft.add_question(QuestionType::FreeText);
        draft.set_question_text(notes, "Allergies?");
        let base = Url::parse("https://example.com/take").unwrap();
        (draft.encode(&base).unwrap().into_string(), food, notes)
    }

    #[test]
    fn starts_loading() {
        let session = RespondentSession::new();
        assert_eq!(session.state(), SessionState::Loading);
        assert!(!session.can_submit());
        assert!(session.survey().is_none());
    }

    #[test]
    fn valid_link_becomes_active() {
        let (link, ..) = lunch_link();
        let session = RespondentSession::from_url(&link);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.survey().unwrap().title(), "Lunch Poll");
    }

    #[test]
    fn missing_q_is_invalid_and_terminal() {
        let mut session = RespondentSession::from_url("https://example.com/take?t=SGk");
        assert_eq!(session.state(), SessionState::Invalid);
        assert!(session.invalid_reason().is_some());
        assert!(session.survey().is_none());
        assert!(matches!(
            session.answer(QuestionId::new(1), "x"),
            Err(SessionError::WrongState(SessionState::Invalid, _))
        ));
        assert!(session.load_url("https://example.com").is_err());
        assert!(session.submit().is_err());
        assert_eq!(session.state(), SessionState::Invalid);
    }

    #[test]
    fn load_params_independently() {
        let mut session = RespondentSession::new();
        let state = session.load_params(Some("SGk"), None).unwrap();
        assert_eq!(state, SessionState::Invalid);
    }

    #[test]
    fn submit_requires_every_answer() {
        let (link, food, notes) = lunch_link();
        let mut session = RespondentSession::from_url(&link);

        session.answer(food, "Pizza").unwrap();
        assert!(!session.can_submit());
        assert_eq!(session.unanswered(), vec![notes]);
        assert!(matches!(session.submit(), Err(SessionError::Incomplete(_))));
        assert_eq!(session.state(), SessionState::Active);

        session.answer(notes, "none").unwrap();
        assert!(session.can_submit());
        let answers = session.submit().unwrap();
        assert_eq!(answers.get(food), Some("Pizza"));
        assert_eq!(session.state(), SessionState::Submitted);
    }

    #[test]
    fn submitted_is_terminal() {
        let (link, food, notes) = lunch_link();
        let mut session = RespondentSession::from_url(&link);
        session.answer(food, "Sushi").unwrap();
        session.answer(notes, "-").unwrap();
        session.submit().unwrap();

        assert!(matches!(
            session.answer(food, "Pizza"),
            Err(SessionError::WrongState(SessionState::Submitted, SessionState::Active))
        ));
        assert!(session.submit().is_err());
        assert!(matches!(
            session.load_url(&link),
            Err(SessionError::WrongState(SessionState::Submitted, SessionState::Loading))
        ));
        assert_eq!(session.answers().unwrap().get(food), Some("Sushi"));
    }

    #[test]
    fn mcq_answer_must_be_an_option() {
        let (link, food, _) = lunch_link();
        let mut session = RespondentSession::from_url(&link);
        assert!(matches!(
            session.answer(food, "Tacos"),
            Err(SessionError::Answer(AnswerError::NotAnOption { .. }))
        ));
    }

    #[test]
    fn clear_answer_disables_submit() {
        let (link, food, notes) = lunch_link();
        let mut session = RespondentSession::from_url(&link);
        session.answer(food, "Pizza").unwrap();
        session.answer(notes, "none").unwrap();
        session.clear_answer(notes).unwrap();
        assert!(!session.can_submit());
    }

    #[test]
    fn validate_answer_messages() {
        let q = Question::multiple_choice(QuestionId::new(1), "Pick", ["A", "B"]);
        assert!(validate_answer(&q, "A").is_ok());
        assert_eq!(validate_answer(&q, "").unwrap_err(), "An answer is required");
        assert_eq!(validate_answer(&q, "C").unwrap_err(), "Pick one of: A, B");
    }
}
