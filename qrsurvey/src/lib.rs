//! # qrsurvey
//!
//! Turn a URL, or a survey you author, into a scannable QR code, and turn
//! a scanned survey link back into a form. Backend-agnostic.
//!
//! A survey travels entirely inside its link: the title and the question
//! list are encoded into the `t` and `q` query parameters. Nothing is
//! stored anywhere else, and answers never leave the respondent's session.
//!
//! ## Usage
//!
//! ```rust
//! use qrsurvey::{QuestionType, RespondentSession, SessionState, SurveyDraft};
//! use url::Url;
//!
//! let mut draft = SurveyDraft::new();
//! draft.set_title("Lunch Poll");
//! let id = draft.add_question(QuestionType::MultipleChoice);
//! draft.set_question_text(id, "Pizza or Sushi?");
//! draft.set_option(id, 0, "Pizza");
//! draft.set_option(id, 1, "Sushi");
//!
//! let base = Url::parse("https://example.com/take").unwrap();
//! let link = draft.encode(&base).unwrap();
//!
//! let mut session = RespondentSession::from_url(link.as_str());
//! assert_eq!(session.state(), SessionState::Active);
//! session.answer(id, "Pizza").unwrap();
//! session.submit().unwrap();
//! assert_eq!(session.state(), SessionState::Submitted);
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - Survey ⇄ URL query parameters
//! - [`authoring`] - The editable draft behind the survey builder
//! - [`respondent`] - The respondent's `Loading → Invalid | Active → Submitted` session
//! - [`qr`] - QR rendering, previews and downloads
//!
//! ## Backends
//!
//! Backends are separate crates that implement `SurveyBackend`:
//! - `qrsurvey-wizard-dialoguer` - terminal prompts via dialoguer
//! - `qrsurvey-form-egui` - GUI form via egui
//!
//! `qrsurvey-doc-html` renders the same surveys as static HTML.

// Re-export all types from qrsurvey-types
pub use qrsurvey_types::*;

pub mod authoring;
pub mod codec;
pub mod qr;
pub mod respondent;

pub use authoring::{AuthoringError, QrSource, SurveyDraft, SurveyLink};
pub use codec::CodecError;
pub use qr::{QrError, QrMatrix, QrPanel, QrStyle};
pub use respondent::{RespondentSession, SessionError, SessionState};

// Test backend for answering surveys without user interaction
mod test_backend;
pub use test_backend::{TestBackend, TestBackendError};
