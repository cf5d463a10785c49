//! Command-line interface for qrsurvey.
//!
//! This module provides the CLI structure for the `qrsurvey` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[cfg(feature = "gui")]
pub use commands::GuiCommand;
pub use commands::{
    ConfigCommand, DecodeCommand, EncodeCommand, HtmlCommand, QrCommand, ShareCommand,
    TakeCommand,
};

use crate::logging::Verbosity;

/// qrsurvey - QR codes for links and self-contained surveys
///
/// Turns any text into a QR code, or a survey into a link that carries
/// the whole survey, and opens such links as forms.
#[derive(Debug, Parser)]
#[command(name = "qrsurvey")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a QR code PNG for any text
    Qr(QrCommand),

    /// Encode a survey draft file into a link
    Encode(EncodeCommand),

    /// Print the survey carried by a link
    Decode(DecodeCommand),

    /// Answer a survey in the terminal
    Take(TakeCommand),

    /// Write the HTML form for a survey link
    Html(HtmlCommand),

    /// Write an HTML page showing a QR code
    Share(ShareCommand),

    /// Open the generator or a survey form in a window
    #[cfg(feature = "gui")]
    Gui(GuiCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
