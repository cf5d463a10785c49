//! Command handlers.
//!
//! Every handler writes its primary output to `out` so that the binary can
//! hand in stdout and tests can hand in a buffer. Log lines go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use qrsurvey::codec::{self, SurveyPayload};
use qrsurvey::qr::{self, DOWNLOAD_FILE_NAME};
use qrsurvey::{Answers, QuestionKind, RespondentSession, SessionState, Survey, SurveyBackend};
use qrsurvey_doc_html::{HtmlOptions, respondent_form_html, share_page_html};
use qrsurvey_wizard_dialoguer::DialoguerBackend;
use url::Url;

use crate::cli::{
    Cli, Command, ConfigCommand, DecodeCommand, EncodeCommand, HtmlCommand, QrCommand,
    ShareCommand, TakeCommand,
};
use crate::config::Config;
use crate::draft::DraftFile;
use crate::error::{Error, Result};

/// Execute the parsed command line.
///
/// Configuration is only loaded by commands that use it, so `decode` and
/// `config path` keep working when the config file is broken.
///
/// # Errors
///
/// Returns the first error the command runs into.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let load = || Config::load_from(cli.config.clone());
    match &cli.command {
        Command::Qr(cmd) => handle_qr(&load()?, cmd, out),
        Command::Encode(cmd) => handle_encode(&load()?, cmd, out),
        Command::Decode(cmd) => handle_decode(cmd, out),
        Command::Take(cmd) => handle_take(cmd, out),
        Command::Html(cmd) => handle_html(cmd, out),
        Command::Share(cmd) => handle_share(&load()?, cmd, out),
        #[cfg(feature = "gui")]
        Command::Gui(cmd) => gui::handle_gui(&load()?, cmd, out),
        Command::Config(cmd) => handle_config(cli.config.as_deref(), cmd, out),
    }
}

/// Decode a link, turning any failure into the "invalid survey" error.
///
/// # Errors
///
/// Returns [`Error::InvalidSurvey`] unless the link carries a valid survey.
pub fn decode_link(link: &str) -> Result<Survey> {
    codec::decode_survey_url(link).map_err(|err| {
        tracing::warn!(%err, "link does not carry a valid survey");
        Error::InvalidSurvey(err.to_string())
    })
}

fn handle_qr(config: &Config, cmd: &QrCommand, out: &mut dyn Write) -> Result<()> {
    let path = cmd
        .out
        .clone()
        .unwrap_or_else(|| config.download_dir().join(DOWNLOAD_FILE_NAME));
    let size = if cmd.preview {
        config.qr.preview_size
    } else {
        config.qr.download_size
    };

    qr::save_png(&cmd.text, size, &config.qr, &path)?;
    writeln!(out, "Saved {size}x{size} QR code to {}", path.display())?;
    Ok(())
}

fn handle_encode(config: &Config, cmd: &EncodeCommand, out: &mut dyn Write) -> Result<()> {
    let base = match &cmd.base {
        Some(base) => Url::parse(base)
            .map_err(|err| Error::config(format!("--base '{base}' is not a valid URL: {err}")))?,
        None => config.base_url()?,
    };

    let draft = DraftFile::read(&cmd.file)?.to_draft(&cmd.file)?;
    let link = draft.encode(&base)?;
    writeln!(out, "{}", link.as_str())?;

    if cmd.qr {
        let path = qr::save_download(link.as_str(), &config.qr, &config.download_dir())?;
        writeln!(out, "Saved QR code to {}", path.display())?;
    }
    Ok(())
}

fn handle_decode(cmd: &DecodeCommand, out: &mut dyn Write) -> Result<()> {
    let survey = decode_link(&cmd.url)?;

    if cmd.json {
        let json = serde_json::to_string_pretty(&SurveyPayload::from(&survey))?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(out, "{}", survey.title())?;
    writeln!(out)?;
    for (index, question) in survey.questions().iter().enumerate() {
        let position = index + 1;
        match question.kind() {
            QuestionKind::FreeText => {
                writeln!(out, "{position}. {} (free text)", question.text())?;
            }
            QuestionKind::MultipleChoice(mcq) => {
                writeln!(out, "{position}. {} (multiple choice)", question.text())?;
                for option in mcq.options() {
                    writeln!(out, "   - {option}")?;
                }
            }
        }
    }
    Ok(())
}

fn handle_take(cmd: &TakeCommand, out: &mut dyn Write) -> Result<()> {
    let backend = if cmd.plain {
        DialoguerBackend::plain()
    } else {
        DialoguerBackend::new()
    };
    take_with(&cmd.url, &backend, out)
}

/// Answer the survey behind `link` through `backend` and print the answers.
///
/// # Errors
///
/// Returns [`Error::InvalidSurvey`] for a bad link, or the session error if
/// the backend fails or is cancelled.
pub fn take_with<B: SurveyBackend>(link: &str, backend: &B, out: &mut dyn Write) -> Result<()> {
    let mut session = RespondentSession::from_url(link);
    if session.state() == SessionState::Invalid {
        let reason = session
            .invalid_reason()
            .map(ToString::to_string)
            .unwrap_or_default();
        return Err(Error::InvalidSurvey(reason));
    }

    session.run(backend)?;
    if let (Some(survey), Some(answers)) = (session.survey(), session.answers()) {
        print_answers(survey, answers, out)?;
    }
    Ok(())
}

fn print_answers(survey: &Survey, answers: &Answers, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Submitted answers for \"{}\":", survey.title())?;
    for (id, value) in answers.ordered(survey) {
        if let Some(question) = survey.question(id) {
            writeln!(out, "  {}: {value}", question.text())?;
        }
    }
    Ok(())
}

fn handle_html(cmd: &HtmlCommand, out: &mut dyn Write) -> Result<()> {
    let survey = decode_link(&cmd.url)?;
    let html = respondent_form_html(&survey, &HtmlOptions::new());
    emit(&html, cmd.out.as_deref(), out)
}

fn handle_share(config: &Config, cmd: &ShareCommand, out: &mut dyn Write) -> Result<()> {
    let html = share_page_html(&cmd.text, &config.qr, &HtmlOptions::new())?;
    emit(&html, cmd.out.as_deref(), out)
}

/// Write `text` to `path`, or to `out` when no path was given.
fn emit(text: &str, path: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote HTML");
            writeln!(out, "Wrote {}", path.display())?;
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}

fn handle_config(
    config_path: Option<&Path>,
    cmd: &ConfigCommand,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path.map(Path::to_path_buf))?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Survey]")?;
                writeln!(out, "  Base URL:       {}", config.survey.base_url)?;
                writeln!(out)?;
                writeln!(out, "[QR]")?;
                writeln!(out, "  Dark:           {}", config.qr.dark)?;
                writeln!(out, "  Light:          {}", config.qr.light)?;
                writeln!(out, "  Margin:         {}", config.qr.margin)?;
                writeln!(out, "  Preview size:   {}", config.qr.preview_size)?;
                writeln!(out, "  Download size:  {}", config.qr.download_size)?;
                writeln!(out)?;
                writeln!(out, "[Output]")?;
                writeln!(out, "  Download dir:   {}", config.download_dir().display())?;
            }
        }
        ConfigCommand::Path => {
            let path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            writeln!(out, "{}", path.display())?;
        }
        ConfigCommand::Validate { file } => {
            let path: PathBuf = file
                .clone()
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            Config::load_from(Some(path.clone()))?;
            writeln!(out, "Configuration is valid: {}", path.display())?;
        }
    }
    Ok(())
}

#[cfg(feature = "gui")]
mod gui {
    use std::io::Write;

    use qrsurvey_form_egui::{AuthoringOptions, EguiBackend, run_authoring, run_respondent};

    use super::{decode_link, print_answers};
    use crate::cli::GuiCommand;
    use crate::config::Config;
    use crate::draft::DraftFile;
    use crate::error::Result;

    pub(super) fn handle_gui(config: &Config, cmd: &GuiCommand, out: &mut dyn Write) -> Result<()> {
        if let Some(link) = &cmd.respond {
            let window = EguiBackend::new().with_title("Survey");
            let Some(answers) = run_respondent(link, &window)? else {
                return Ok(());
            };
            let survey = decode_link(link)?;
            return print_answers(&survey, &answers, out);
        }

        let mut options = AuthoringOptions::new(config.base_url()?);
        options.style = config.qr.clone();
        options.download_dir = config.download_dir();
        if let Some(path) = &cmd.draft {
            options.draft = Some(DraftFile::read(path)?.to_draft(path)?);
        }
        run_authoring(options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrsurvey::{Question, QuestionId, TestBackend};

    fn lunch_link() -> String {
        let survey = Survey::new(
            "Lunch Poll",
            vec![
                Question::multiple_choice(
                    QuestionId::new(1),
                    "Pizza or Sushi?",
                    ["Pizza", "Sushi"],
                ),
                Question::free_text(QuestionId::new(2), "Anything else?"),
            ],
        );
        let base = Url::parse("https://qrsurvey.app/take").unwrap();
        codec::encode_survey(&survey, &base).unwrap().to_string()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn decode_prints_numbered_questions() {
        let mut buf = Vec::new();
        let cmd = DecodeCommand {
            url: lunch_link(),
            json: false,
        };
        handle_decode(&cmd, &mut buf).unwrap();

        let text = output(buf);
        assert!(text.starts_with("Lunch Poll\n"));
        assert!(text.contains("1. Pizza or Sushi? (multiple choice)"));
        assert!(text.contains("   - Sushi"));
        assert!(text.contains("2. Anything else? (free text)"));
    }

    #[test]
    fn decode_json_is_wire_payload() {
        let mut buf = Vec::new();
        let cmd = DecodeCommand {
            url: lunch_link(),
            json: true,
        };
        handle_decode(&cmd, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["title"], "Lunch Poll");
        assert_eq!(value["questions"][0]["type"], "multiple-choice");
        assert!(value["questions"][1].get("options").is_none());
    }

    #[test]
    fn decode_rejects_link_without_questions() {
        let mut buf = Vec::new();
        let cmd = DecodeCommand {
            url: "https://qrsurvey.app/take?t=THVuY2g".to_string(),
            json: false,
        };
        let err = handle_decode(&cmd, &mut buf).unwrap_err();
        assert!(err.is_invalid_survey());
        assert!(err.to_string().starts_with("invalid survey"));
        assert!(buf.is_empty());
    }

    #[test]
    fn take_prints_answers_in_survey_order() {
        let backend = TestBackend::new()
            .with_answer(2u64, "Extra napkins")
            .with_answer(1u64, "Pizza");
        let mut buf = Vec::new();
        take_with(&lunch_link(), &backend, &mut buf).unwrap();

        let text = output(buf);
        let pizza = text.find("Pizza or Sushi?: Pizza").unwrap();
        let napkins = text.find("Anything else?: Extra napkins").unwrap();
        assert!(pizza < napkins);
    }

    #[test]
    fn take_rejects_invalid_link() {
        let mut buf = Vec::new();
        let err =
            take_with("https://qrsurvey.app/take", &TestBackend::new(), &mut buf).unwrap_err();
        assert!(err.is_invalid_survey());
    }

    #[test]
    fn take_rejects_answer_outside_options() {
        let backend = TestBackend::new()
            .with_answer(1u64, "Burgers")
            .with_answer(2u64, "-");
        let mut buf = Vec::new();
        let err = take_with(&lunch_link(), &backend, &mut buf).unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }

    #[test]
    fn html_goes_to_out_without_path() {
        let mut buf = Vec::new();
        let cmd = HtmlCommand {
            url: lunch_link(),
            out: None,
        };
        handle_html(&cmd, &mut buf).unwrap();

        let html = output(buf);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("value=\"Pizza\""));
    }

    #[test]
    fn share_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("share.html");
        let mut buf = Vec::new();
        let cmd = ShareCommand {
            text: "https://example.com".to_string(),
            out: Some(path.clone()),
        };
        handle_share(&Config::default(), &cmd, &mut buf).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<svg"));
        assert!(output(buf).contains("share.html"));
    }

    #[test]
    fn qr_saves_into_download_dir_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.download_dir = Some(dir.path().to_path_buf());
        let cmd = QrCommand {
            text: "https://example.com".to_string(),
            out: None,
            preview: true,
        };
        let mut buf = Vec::new();
        handle_qr(&config, &cmd, &mut buf).unwrap();

        let path = dir.path().join(DOWNLOAD_FILE_NAME);
        let (width, height) = image_dimensions(&path);
        assert_eq!((width, height), (256, 256));
        assert!(output(buf).contains("256x256"));
    }

    #[test]
    fn qr_rejects_blank_text() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = QrCommand {
            text: "   ".to_string(),
            out: Some(dir.path().join("blank.png")),
            preview: false,
        };
        let err = handle_qr(&Config::default(), &cmd, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Qr(qrsurvey::QrError::EmptyContent)));
        assert!(!dir.path().join("blank.png").exists());
    }

    #[test]
    fn config_path_prefers_explicit_file() {
        let mut buf = Vec::new();
        handle_config(Some(Path::new("/etc/qrsurvey.toml")), &ConfigCommand::Path, &mut buf)
            .unwrap();
        assert_eq!(output(buf).trim(), "/etc/qrsurvey.toml");
    }

    fn image_dimensions(path: &Path) -> (u32, u32) {
        let bytes = std::fs::read(path).unwrap();
        // PNG IHDR: width and height are the big-endian words at offsets 16 and 20.
        let word = |at: usize| {
            u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        (word(16), word(20))
    }
}
