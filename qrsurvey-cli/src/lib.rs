//! `qrsurvey-cli` - the `qrsurvey` command line.
//!
//! Renders QR codes, encodes survey draft files into links, decodes links,
//! and opens surveys in the terminal, as HTML, or in a window.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod handlers;
pub mod logging;

pub use config::Config;
pub use draft::DraftFile;
pub use error::{Error, Result};
pub use handlers::run;
pub use logging::init_logging;
