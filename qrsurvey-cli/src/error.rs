//! Error types for the qrsurvey command line.

use std::path::PathBuf;

use qrsurvey::{AuthoringError, QrError, SessionError};
use thiserror::Error;

/// The main error type for CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Survey Errors ===
    /// A link did not carry a usable survey.
    #[error("invalid survey: {0}")]
    InvalidSurvey(String),

    /// A draft file could not be turned into a survey.
    #[error("invalid draft {path}: {message}")]
    Draft {
        /// The draft file.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// The draft parsed but is not encodable.
    #[error(transparent)]
    Authoring(#[from] AuthoringError),

    /// Answering the survey failed or was cancelled.
    #[error(transparent)]
    Session(#[from] SessionError),

    // === Output Errors ===
    /// Rendering or saving a QR code failed.
    #[error(transparent)]
    Qr(#[from] QrError),

    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A window could not be opened or was closed with an error.
    #[cfg(feature = "gui")]
    #[error(transparent)]
    Gui(#[from] qrsurvey_form_egui::EguiError),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a draft file error.
    #[must_use]
    pub fn draft(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Draft {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error means a link held no usable survey.
    #[must_use]
    pub fn is_invalid_survey(&self) -> bool {
        matches!(self, Self::InvalidSurvey(_))
    }
}
