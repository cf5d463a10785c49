//! # qrsurvey-form-egui
//!
//! Native egui windows for qrsurvey.
//!
//! - [`run_authoring`] opens the generator: type a URL or build a survey,
//!   preview its QR code and save the full-size PNG.
//! - [`run_respondent`] opens a survey link as a fill-in form.
//! - [`EguiBackend`] implements `SurveyBackend`, so a
//!   `RespondentSession` can collect its answers through a window.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qrsurvey::RespondentSession;
//! use qrsurvey_form_egui::EguiBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = RespondentSession::from_url("https://qrsurvey.app/take?t=..&q=..");
//!     let backend = EguiBackend::new()
//!         .with_title("Lunch Poll")
//!         .with_window_size([400.0, 300.0]);
//!
//!     let answers = session.run(&backend)?;
//!     println!("{answers:?}");
//!     Ok(())
//! }
//! ```

mod authoring;
mod backend;
mod form;
mod respondent;

pub use authoring::{AuthoringOptions, AuthoringState, Mode, run_authoring};
pub use backend::{EguiBackend, EguiError};
pub use respondent::run_respondent;
