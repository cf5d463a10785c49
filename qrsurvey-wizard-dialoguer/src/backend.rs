//! Terminal prompts for a decoded survey.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, Select};
use qrsurvey::{Answers, Question, QuestionKind, Survey, SurveyBackend};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialoguerError {
    /// The respondent hit Ctrl+C or Escape.
    #[error("survey aborted at the terminal")]
    Cancelled,

    #[error("terminal prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl DialoguerError {
    fn from_prompt(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Self::Cancelled
            }
            other => Self::Dialoguer(other),
        }
    }
}

/// Asks each question of a survey in turn on the terminal.
///
/// Free-text questions become a line input, multiple-choice questions a
/// selection list. A rejected answer prints the reason and asks again.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    colorful: bool,
}

impl DialoguerBackend {
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Same prompts without ANSI colours, for dumb terminals and logs.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        match self.colorful {
            true => Box::new(ColorfulTheme::default()),
            false => Box::new(SimpleTheme),
        }
    }

    /// One raw reading from the terminal, not yet validated.
    fn read(
        &self,
        theme: &dyn Theme,
        label: &str,
        question: &Question,
    ) -> Result<String, DialoguerError> {
        let value = match question.kind() {
            QuestionKind::FreeText => Input::<String>::with_theme(theme)
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()
                .map_err(DialoguerError::from_prompt)?,
            QuestionKind::MultipleChoice(mcq) => {
                let picked = Select::with_theme(theme)
                    .with_prompt(label)
                    .items(mcq.options())
                    .default(0)
                    .interact()
                    .map_err(DialoguerError::from_prompt)?;
                mcq.options()[picked].clone()
            }
        };
        Ok(value)
    }
}

fn numbered(position: usize, total: usize, question: &Question) -> String {
    format!("[{position}/{total}] {}", question.text())
}

impl SurveyBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn collect(
        &self,
        survey: &Survey,
        validate: &dyn Fn(&Question, &str) -> Result<(), String>,
    ) -> Result<Answers, Self::Error> {
        let theme = self.theme();
        let total = survey.len();
        let mut answers = Answers::new();

        println!("{}\n", survey.title());

        for (index, question) in survey.questions().iter().enumerate() {
            let label = numbered(index + 1, total, question);
            let accepted = loop {
                let value = self.read(theme.as_ref(), &label, question)?;
                match validate(question, &value) {
                    Ok(()) => break value,
                    Err(reason) => println!("  {reason}"),
                }
            };
            answers.insert(question.id(), accepted);
        }

        Ok(answers)
    }
}
