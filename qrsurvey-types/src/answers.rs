use std::collections::HashMap;

use crate::{QuestionId, Survey};

/// Error type for answering a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("No question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("Answer to question {0} is empty")]
    Empty(QuestionId),

    #[error("'{value}' is not an option of question {id}")]
    NotAnOption { id: QuestionId, value: String },
}

/// Answers collected from a respondent.
///
/// One string per question: the typed text for free-text questions, the
/// chosen option for multiple-choice questions. Answers only ever live in
/// memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: HashMap<QuestionId, String>,
}

impl Answers {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer, replacing any previous one.
    pub fn insert(&mut self, id: QuestionId, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    /// Check if an answer exists for a question.
    pub fn contains(&self, id: QuestionId) -> bool {
        self.values.contains_key(&id)
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, id: QuestionId) -> Option<String> {
        self.values.remove(&id)
    }

    /// Get an iterator over all id-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &str)> {
        self.values.iter().map(|(id, v)| (*id, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if an answer exists and is not blank.
    pub fn has_value(&self, id: QuestionId) -> bool {
        self.get(id).is_some_and(|v| !v.trim().is_empty())
    }

    /// Check that every question of `survey` has a non-empty answer.
    pub fn is_complete_for(&self, survey: &Survey) -> bool {
        survey.questions().iter().all(|q| self.has_value(q.id()))
    }

    /// Answers in the survey's question order, skipping unanswered questions.
    pub fn ordered<'a>(
        &'a self,
        survey: &'a Survey,
    ) -> impl Iterator<Item = (QuestionId, &'a str)> {
        survey
            .questions()
            .iter()
            .filter_map(|q| self.get(q.id()).map(|v| (q.id(), v)))
    }

    /// Check `value` against the question `id` of `survey`.
    pub fn check(survey: &Survey, id: QuestionId, value: &str) -> Result<(), AnswerError> {
        let question = survey.question(id).ok_or(AnswerError::UnknownQuestion(id))?;
        if value.trim().is_empty() {
            return Err(AnswerError::Empty(id));
        }
        if !question.accepts(value) {
            return Err(AnswerError::NotAnOption {
                id,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, String);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Question;

    fn lunch_poll() -> Survey {
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

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(1), "Pizza");
        assert_eq!(answers.get(QuestionId::new(1)), Some("Pizza"));
        assert_eq!(answers.get(QuestionId::new(2)), None);
    }

    #[test]
    fn complete_requires_every_question() {
        let survey = lunch_poll();
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(1), "Pizza");
        assert!(!answers.is_complete_for(&survey));

        answers.insert(QuestionId::new(2), "  ");
        assert!(!answers.is_complete_for(&survey));

        answers.insert(QuestionId::new(2), "none");
        assert!(answers.is_complete_for(&survey));
    }

    #[test]
    fn check_rejects_unlisted_option() {
        let survey = lunch_poll();
        let result = Answers::check(&survey, QuestionId::new(1), "Tacos");
        assert!(matches!(result, Err(AnswerError::NotAnOption { .. })));
    }

    #[test]
    fn check_rejects_unknown_question() {
        let survey = lunch_poll();
        assert_eq!(
            Answers::check(&survey, QuestionId::new(9), "x"),
            Err(AnswerError::UnknownQuestion(QuestionId::new(9)))
        );
    }

    #[test]
    fn ordered_follows_survey() {
        let survey = lunch_poll();
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(2), "none");
        answers.insert(QuestionId::new(1), "Sushi");
        let ids: Vec<_> = answers.ordered(&survey).map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
