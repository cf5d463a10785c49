//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Render a QR code for any text.
#[derive(Debug, Args)]
pub struct QrCommand {
    /// The text to encode, typically a URL
    pub text: String,

    /// Where to write the PNG (defaults to `<download_dir>/qr-code.png`)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Render at preview size instead of download size
    #[arg(short, long)]
    pub preview: bool,
}

/// Turn a survey draft file into a link.
#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// JSON draft: `{title, questions: [{text, type, options?}]}`
    pub file: PathBuf,

    /// Override the configured base URL
    #[arg(short, long, value_name = "URL")]
    pub base: Option<String>,

    /// Also save the download-size QR code for the link
    #[arg(long)]
    pub qr: bool,
}

/// Show the survey inside a link.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// The survey link
    pub url: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Answer a survey in the terminal.
#[derive(Debug, Args)]
pub struct TakeCommand {
    /// The survey link
    pub url: String,

    /// Use prompts without colors
    #[arg(long)]
    pub plain: bool,
}

/// Write the fillable HTML form for a survey link.
#[derive(Debug, Args)]
pub struct HtmlCommand {
    /// The survey link
    pub url: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Write an HTML page showing the QR code for some text.
#[derive(Debug, Args)]
pub struct ShareCommand {
    /// The text to encode, typically a URL
    pub text: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Open a window.
#[cfg(feature = "gui")]
#[derive(Debug, Args)]
pub struct GuiCommand {
    /// Open this survey link as a form instead of the generator
    #[arg(short, long, value_name = "URL", conflicts_with = "draft")]
    pub respond: Option<String>,

    /// Start the generator from a draft file
    #[arg(short, long, value_name = "FILE")]
    pub draft: Option<PathBuf>,
}

/// Configuration management commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate a configuration file
    Validate {
        /// Path to config file (uses default if not specified)
        file: Option<PathBuf>,
    },
}
