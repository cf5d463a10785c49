use crate::{Answers, Question, Survey};

/// A front end that puts a decoded survey in front of a respondent.
///
/// Whether questions appear one by one or as a single form is up to the
/// implementation. It keeps asking until `validate` accepts every answer.
pub trait SurveyBackend {
    type Error: Into<anyhow::Error>;

    /// Return one answer per question of `survey`.
    ///
    /// `validate` gets each candidate answer with its question and returns
    /// `Err(reason)` when it has to be asked again. An `Err` from this
    /// method means the respondent gave up or the front end failed.
    fn collect(
        &self,
        survey: &Survey,
        validate: &dyn Fn(&Question, &str) -> Result<(), String>,
    ) -> Result<Answers, Self::Error>;
}
