//! Ready-made survey drafts used by tests and demos across the workspace.

pub mod event_feedback;
pub mod lunch_poll;
pub mod team_retro;

pub use event_feedback::event_feedback;
pub use lunch_poll::lunch_poll;
pub use team_retro::team_retro;

use qrsurvey::{QuestionId, QuestionType, SurveyDraft};

/// Append a multiple-choice question with the given options.
fn add_choice(draft: &mut SurveyDraft, text: &str, options: &[&str]) -> QuestionId {
    let id = draft.add_question(QuestionType::MultipleChoice);
    draft.set_question_text(id, text);
    for (index, option) in options.iter().enumerate() {
        if index >= 2 {
            draft.add_option(id);
        }
        draft.set_option(id, index, *option);
    }
    id
}

/// Append a free-text question.
fn add_free_text(draft: &mut SurveyDraft, text: &str) -> QuestionId {
    let id = draft.add_question(QuestionType::FreeText);
    draft.set_question_text(id, text);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_example_is_encodable() {
        for draft in [lunch_poll(), team_retro(), event_feedback()] {
            assert!(draft.is_encodable(), "{}: {:?}", draft.title(), draft.issues());
        }
    }
}
