//! Logging configuration for the qrsurvey command line.
//!
//! Log lines go to stderr so that links and documents printed on stdout
//! stay pipeable.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events are shown by default.
const TARGETS: [&str; 5] = [
    "qrsurvey",
    "qrsurvey_cli",
    "qrsurvey_doc_html",
    "qrsurvey_form_egui",
    "qrsurvey_wizard_dialoguer",
];

/// How much the command line reports on stderr.
///
/// Chosen with `-q` / `-v` / `-vv`; `RUST_LOG` overrides it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Directive string applying this level to every workspace crate and
    /// leaving dependencies at their defaults.
    #[must_use]
    pub fn default_filter(&self) -> String {
        let level = self.to_level_filter();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Verbose)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init();
}
