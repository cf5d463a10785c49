//! # qrsurvey-wizard-dialoguer
//!
//! Dialoguer wizard backend for qrsurvey.
//!
//! Answers a decoded survey in the terminal, one prompt per question:
//! free-text questions become text inputs, multiple-choice questions become
//! arrow-key selections over the question's options.
//!
//! ## Example
//!
//! ```rust,ignore
//! use qrsurvey::RespondentSession;
//! use qrsurvey_wizard_dialoguer::DialoguerBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = RespondentSession::from_url("https://qrsurvey.app/take?t=..&q=..");
//!     let answers = session.run(&DialoguerBackend::new())?;
//!     println!("{answers:?}");
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerBackend, DialoguerError};
