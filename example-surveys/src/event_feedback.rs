use qrsurvey::SurveyDraft;

use crate::{add_choice, add_free_text};

/// Feedback form for a meetup, using the maximum of six options.
pub fn event_feedback() -> SurveyDraft {
    let mut draft = SurveyDraft::new();
    draft.set_title("Café Rust Meetup ☕ Feedback");
    add_choice(
        &mut draft,
        "How did you hear about us?",
        &["Friend", "Mastodon", "Newsletter", "Meetup.com", "Poster", "Other"],
    );
    add_choice(&mut draft, "Would you come again?", &["Definitely", "Maybe", "No"]);
    add_free_text(&mut draft, "Which talk did you like best, and why?");
    draft
}
