//! `qrsurvey` - QR codes for links and self-contained surveys.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use clap::Parser;

use qrsurvey_cli::cli::Cli;
use qrsurvey_cli::{init_logging, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());
    tracing::debug!(command = ?cli.command, "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;
    out.flush()?;
    Ok(())
}
