//! End-to-end runs of the command line against temporary files.

use std::path::{Path, PathBuf};

use clap::Parser;
use qrsurvey::codec::{WireKind, decode_survey_url};
use qrsurvey::{QuestionKind, SurveyDraft};
use qrsurvey_cli::cli::Cli;
use qrsurvey_cli::draft::{DraftFile, DraftQuestion};
use qrsurvey_cli::{Error, run};
use tempfile::TempDir;

/// A scratch directory with a config file pointing downloads into it.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let downloads = dir.path().join("downloads");
        std::fs::create_dir(&downloads).unwrap();
        std::fs::write(
            &config,
            format!(
                "[survey]\nbase_url = \"https://forms.example.org/take\"\n\n\
                 [output]\ndownload_dir = {:?}\n",
                downloads.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn downloads(&self) -> PathBuf {
        self.path("downloads")
    }

    /// Run `qrsurvey <args>` with this workspace's config, returning stdout.
    fn run(&self, args: &[&str]) -> Result<String, Error> {
        let config = self.config.display().to_string();
        let argv = ["qrsurvey", "-c", config.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn write_draft(&self, name: &str, draft: &SurveyDraft) -> PathBuf {
        let file = DraftFile {
            title: draft.title().to_string(),
            questions: draft
                .questions()
                .iter()
                .map(|question| DraftQuestion {
                    text: question.text().to_string(),
                    kind: match question.kind() {
                        QuestionKind::FreeText => WireKind::FreeText,
                        QuestionKind::MultipleChoice(_) => WireKind::MultipleChoice,
                    },
                    options: question.options().to_vec(),
                })
                .collect(),
        };
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string_pretty(&file).unwrap()).unwrap();
        path
    }
}

fn arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn encode_then_decode_lunch_poll() {
    let ws = Workspace::new();
    let draft = ws.write_draft("lunch.json", &example_surveys::lunch_poll());

    let link = ws.run(&["encode", &arg(&draft)]).unwrap();
    let link = link.trim();
    assert!(link.starts_with("https://forms.example.org/take?"));

    let survey = decode_survey_url(link).unwrap();
    assert_eq!(survey.title(), example_surveys::lunch_poll().title());

    let printed = ws.run(&["decode", link]).unwrap();
    assert!(printed.starts_with(survey.title()));
    assert!(printed.contains("(multiple choice)"));
}

#[test]
fn encode_with_qr_saves_download() {
    let ws = Workspace::new();
    let draft = ws.write_draft("retro.json", &example_surveys::team_retro());

    let output = ws.run(&["encode", &arg(&draft), "--qr"]).unwrap();
    let png = ws.downloads().join("qr-code.png");
    assert!(png.exists());
    assert!(output.contains("qr-code.png"));
    assert!(std::fs::read(&png).unwrap().starts_with(b"\x89PNG"));
}

#[test]
fn encode_base_flag_overrides_config() {
    let ws = Workspace::new();
    let draft = ws.write_draft("event.json", &example_surveys::event_feedback());

    let link = ws
        .run(&["encode", &arg(&draft), "--base", "https://other.example.net/s"])
        .unwrap();
    assert!(link.starts_with("https://other.example.net/s?"));
}

#[test]
fn encode_rejects_untitled_draft() {
    let ws = Workspace::new();
    let path = ws.path("untitled.json");
    std::fs::write(
        &path,
        r#"{ "title": "  ", "questions": [ { "text": "Name?", "type": "free-text" } ] }"#,
    )
    .unwrap();

    let err = ws.run(&["encode", &arg(&path)]).unwrap_err();
    assert!(matches!(err, Error::Authoring(_)));
}

#[test]
fn decode_garbage_is_invalid_survey() {
    let ws = Workspace::new();
    let err = ws
        .run(&["decode", "https://forms.example.org/take?t=eA&q=not-json"])
        .unwrap_err();
    assert!(err.is_invalid_survey());
}

#[test]
fn html_form_written_to_file() {
    let ws = Workspace::new();
    let draft = ws.write_draft("lunch.json", &example_surveys::lunch_poll());
    let link = ws.run(&["encode", &arg(&draft)]).unwrap();

    let out = ws.path("form.html");
    ws.run(&["html", link.trim(), "--out", &arg(&out)]).unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<form"));
    assert!(html.contains("type=\"radio\""));
}

#[test]
fn qr_command_honours_out_path() {
    let ws = Workspace::new();
    let out = ws.path("custom.png");
    ws.run(&["qr", "https://example.com", "--out", &arg(&out)]).unwrap();

    assert!(out.exists());
    assert!(!ws.downloads().join("qr-code.png").exists());
}

#[test]
fn config_show_json_reflects_file() {
    let ws = Workspace::new();
    let json = ws.run(&["config", "show", "--json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["survey"]["base_url"], "https://forms.example.org/take");
    assert_eq!(value["qr"]["download_size"], 1024);
}

#[test]
fn config_validate_reports_bad_file() {
    let ws = Workspace::new();
    let bad = ws.path("bad.toml");
    std::fs::write(&bad, "[qr]\npreview_size = 4096\n").unwrap();

    let err = ws.run(&["config", "validate", &arg(&bad)]).unwrap_err();
    assert!(matches!(err, Error::ConfigValidation { .. }));

    let ok = ws.run(&["config", "validate"]).unwrap();
    assert!(ok.starts_with("Configuration is valid"));
}

#[test]
fn decode_works_with_broken_config() {
    let ws = Workspace::new();
    let base = url::Url::parse("https://forms.example.org/take").unwrap();
    let link = example_surveys::lunch_poll().encode(&base).unwrap();
    std::fs::write(&ws.config, "[qr]\nmargin = 99\n").unwrap();

    assert!(ws.run(&["decode", link.as_str()]).is_ok());
    assert!(matches!(
        ws.run(&["qr", "hello"]),
        Err(Error::ConfigValidation { .. })
    ));
}
