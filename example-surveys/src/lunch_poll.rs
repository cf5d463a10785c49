use qrsurvey::SurveyDraft;

use crate::{add_choice, add_free_text};

/// The smallest useful survey: one choice, one comment.
pub fn lunch_poll() -> SurveyDraft {
    let mut draft = SurveyDraft::new();
    draft.set_title("Lunch Poll");
    add_choice(&mut draft, "Pizza or Sushi?", &["Pizza", "Sushi"]);
    add_free_text(&mut draft, "Any allergies we should know about?");
    draft
}
