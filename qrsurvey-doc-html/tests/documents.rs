//! Integration tests for qrsurvey-doc-html

use qrsurvey::codec::decode_survey_url;
use qrsurvey::{QrStyle, Question, QuestionId, Survey};
use qrsurvey_doc_html::{HtmlOptions, respondent_form_html, share_page_html};
use url::Url;

fn decoded(draft: qrsurvey::SurveyDraft) -> Survey {
    let base = Url::parse("https://qrsurvey.app/take").unwrap();
    let link = draft.encode(&base).unwrap();
    decode_survey_url(link.as_str()).unwrap()
}

#[test]
fn lunch_poll_form_lists_every_question() {
    let survey = decoded(example_surveys::lunch_poll());
    let html = respondent_form_html(&survey, &HtmlOptions::new());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Lunch Poll</title>"));
    assert!(html.contains("<legend>1. Pizza or Sushi?</legend>"));
    assert!(html.contains("value=\"Pizza\""));
    assert!(html.contains("value=\"Sushi\""));
    assert!(html.contains("<input type=\"text\" id=\"q2\" name=\"q2\""));
    assert_eq!(html.matches(" required>").count(), 3);
    assert!(!html.contains("action="));
}

#[test]
fn six_options_render_six_radios() {
    let survey = decoded(example_surveys::event_feedback());
    let html = respondent_form_html(&survey, &HtmlOptions::new());
    assert_eq!(html.matches("name=\"q1\"").count(), 6);
    assert!(html.contains("Café Rust Meetup ☕ Feedback"));
}

#[test]
fn hostile_text_is_escaped() {
    let survey = Survey::new(
        "<script>alert(1)</script>",
        vec![Question::multiple_choice(
            QuestionId::new(1),
            "Pick \"one\"",
            ["a<b", "c&d"],
        )],
    );
    let html = respondent_form_html(&survey, &HtmlOptions::new());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("value=\"a&lt;b\""));
    assert!(html.contains("Pick &quot;one&quot;"));
}

#[test]
fn custom_prefix_and_title() {
    let survey = decoded(example_surveys::team_retro());
    let options = HtmlOptions::new()
        .with_title("Retro")
        .with_class_prefix("retro");
    let html = respondent_form_html(&survey, &options);
    assert!(html.contains("<title>Retro</title>"));
    assert!(html.contains("class=\"retro-form\""));
    assert!(html.contains("<h1 class=\"retro-title\">Sprint 42 Retro</h1>"));
}

#[test]
fn share_page_embeds_svg_and_content() {
    let link = "https://example.com/take?t=a&q=b";
    let html = share_page_html(link, &QrStyle::default(), &HtmlOptions::new()).unwrap();
    assert!(html.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(html.contains("<code>https://example.com/take?t=a&amp;q=b</code>"));
    assert!(html.contains("<title>QR code</title>"));
}

#[test]
fn share_page_rejects_blank_content() {
    assert!(share_page_html("  ", &QrStyle::default(), &HtmlOptions::new()).is_err());
}
