use qrsurvey::SurveyDraft;

use crate::{add_choice, add_free_text};

/// A sprint retrospective with a mood scale.
pub fn team_retro() -> SurveyDraft {
    let mut draft = SurveyDraft::new();
    draft.set_title("Sprint 42 Retro");
    add_choice(
        &mut draft,
        "How did this sprint feel?",
        &["Great", "Good", "Okay", "Rough", "Terrible"],
    );
    add_free_text(&mut draft, "What went well?");
    add_free_text(&mut draft, "What should we change?");
    add_choice(&mut draft, "Keep the daily stand-up time?", &["Yes", "No"]);
    draft
}
