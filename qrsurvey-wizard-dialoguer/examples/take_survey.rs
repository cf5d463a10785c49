//! Answer a survey link in the terminal.
//! Run with: cargo run -p qrsurvey-wizard-dialoguer --example take_survey [LINK]
//!
//! Without a link the bundled lunch poll is used.

use qrsurvey::RespondentSession;
use qrsurvey_wizard_dialoguer::DialoguerBackend;
use url::Url;

fn main() -> anyhow::Result<()> {
    let link = match std::env::args().nth(1) {
        Some(link) => link,
        None => example_surveys::lunch_poll()
            .encode(&Url::parse("https://qrsurvey.app/take")?)?
            .into_string(),
    };

    let mut session = RespondentSession::from_url(&link);
    let answers = session.run(&DialoguerBackend::new())?;
    println!("{answers:#?}");
    Ok(())
}
