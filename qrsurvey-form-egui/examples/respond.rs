//! Fill in the event feedback survey in a window.
//! Run with: cargo run -p qrsurvey-form-egui --example respond

use qrsurvey_form_egui::{EguiBackend, run_respondent};
use url::Url;

fn main() -> anyhow::Result<()> {
    let link = example_surveys::event_feedback().encode(&Url::parse("https://qrsurvey.app/take")?)?;
    let window = EguiBackend::new().with_title("Event feedback");

    match run_respondent(link.as_str(), &window)? {
        Some(answers) => println!("{answers:#?}"),
        None => println!("closed without submitting"),
    }
    Ok(())
}
