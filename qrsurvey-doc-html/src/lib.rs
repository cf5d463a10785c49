//! # qrsurvey-doc-html
//!
//! Static HTML for qrsurvey.
//!
//! - [`respondent_form_html`] turns a decoded survey into a fillable form:
//!   a text input per free-text question and a radio group per
//!   multiple-choice question, every field `required`.
//! - [`share_page_html`] embeds the QR code for any string as inline SVG,
//!   with the literal string printed beneath it.
//!
//! ## Usage
//!
//! ```rust
//! use qrsurvey::{QrStyle, Question, QuestionId, Survey};
//! use qrsurvey_doc_html::{HtmlOptions, respondent_form_html, share_page_html};
//!
//! let survey = Survey::new(
//!     "Lunch Poll",
//!     vec![Question::multiple_choice(QuestionId::new(1), "Pizza or Sushi?", ["Pizza", "Sushi"])],
//! );
//! let form = respondent_form_html(&survey, &HtmlOptions::new());
//! assert!(form.contains("type=\"radio\""));
//!
//! let page = share_page_html("https://example.com", &QrStyle::default(), &HtmlOptions::new()).unwrap();
//! assert!(page.contains("<svg"));
//! ```

mod generator;

pub use generator::{HtmlOptions, escape_html, respondent_form_html, share_page_html};
