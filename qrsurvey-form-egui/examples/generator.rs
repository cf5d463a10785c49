//! Open the QR generator with the team retro survey loaded.
//! Run with: cargo run -p qrsurvey-form-egui --example generator

use qrsurvey_form_egui::{AuthoringOptions, run_authoring};
use url::Url;

fn main() -> anyhow::Result<()> {
    let mut options = AuthoringOptions::new(Url::parse("https://qrsurvey.app/take")?);
    options.draft = Some(example_surveys::team_retro());
    options.download_dir = std::env::temp_dir();

    run_authoring(options)?;
    Ok(())
}
