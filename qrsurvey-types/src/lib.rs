//! Core types for the qrsurvey crate.
//!
//! This crate provides the foundational types for defining surveys:
//! - `Survey` - The title plus the ordered question list
//! - `Question` and `QuestionKind` - Individual questions and their types
//! - `QuestionId` and `IdGenerator` - Session-scoped question identifiers
//! - `Answers` - Collected data, keyed by question id
//! - `SurveyBackend` trait - For implementing respondent front ends

mod question_id;
pub use question_id::{IdGenerator, QuestionId};

mod question;
pub use question::{MultipleChoiceQuestion, Question, QuestionKind, QuestionType};

mod survey;
pub use survey::Survey;

mod answers;
pub use answers::{AnswerError, Answers};

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::SurveyBackend;
