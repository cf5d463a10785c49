//! Build a one-question survey, print its link and save the QR code.
//! Run with: cargo run -p qrsurvey --example share_link

use std::path::Path;

use qrsurvey::qr::save_download;
use qrsurvey::{QrStyle, QuestionType, SurveyDraft};
use url::Url;

fn main() -> anyhow::Result<()> {
    let mut draft = SurveyDraft::new();
    draft.set_title("Lunch Poll");
    let id = draft.add_question(QuestionType::MultipleChoice);
    draft.set_question_text(id, "Pizza or Sushi?");
    draft.set_option(id, 0, "Pizza");
    draft.set_option(id, 1, "Sushi");

    let link = draft.encode(&Url::parse("https://qrsurvey.app/take")?)?;
    println!("{link}");

    let saved = save_download(link.as_str(), &QrStyle::default(), Path::new("."))?;
    println!("QR code saved to {}", saved.display());
    Ok(())
}
