//! The fill-in form shared by the backend and the respondent window.

use std::collections::HashMap;

use eframe::egui;
use qrsurvey::{Answers, Question, QuestionId, QuestionKind, Survey};

pub(crate) type Validator = fn(&Question, &str) -> Result<(), String>;

/// An edit made in the form: the new answer, or `None` once the field is
/// blank or invalid.
pub(crate) type Change = (QuestionId, Option<String>);

/// Field buffers and per-question errors for one survey.
#[derive(Debug, Clone)]
pub(crate) struct FormState {
    survey: Survey,
    values: HashMap<QuestionId, String>,
    errors: HashMap<QuestionId, String>,
}

impl FormState {
    pub(crate) fn new(survey: Survey) -> Self {
        Self {
            survey,
            values: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub(crate) fn survey(&self) -> &Survey {
        &self.survey
    }

    pub(crate) fn value(&self, id: QuestionId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn error(&self, id: QuestionId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    /// Replace a field's contents, as if typed or clicked.
    pub(crate) fn edit(
        &mut self,
        id: QuestionId,
        value: impl Into<String>,
        validate: Validator,
    ) -> Change {
        let value = value.into();
        let Some(question) = self.survey.question(id) else {
            return (id, None);
        };
        let change = check(question, &value, &mut self.errors, validate);
        self.values.insert(id, value);
        change
    }

    /// Valid answers entered so far.
    pub(crate) fn answers(&self, validate: Validator) -> Answers {
        let mut answers = Answers::new();
        for question in self.survey.questions() {
            let value = self.value(question.id());
            if validate(question, value).is_ok() {
                answers.insert(question.id(), value);
            }
        }
        answers
    }

    /// Whether every question holds a valid answer.
    pub(crate) fn is_complete(&self, validate: Validator) -> bool {
        self.survey
            .questions()
            .iter()
            .all(|q| validate(q, self.value(q.id())).is_ok())
    }

    /// Flag every unanswered or invalid question.
    pub(crate) fn validate_all(&mut self, validate: Validator) -> bool {
        for question in self.survey.questions() {
            let value = self.values.get(&question.id()).map(String::as_str).unwrap_or_default();
            match validate(question, value) {
                Ok(()) => self.errors.remove(&question.id()),
                Err(message) => self.errors.insert(question.id(), message),
            };
        }
        self.errors.is_empty()
    }

    /// Draw every question and return the edits made this frame.
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, validate: Validator) -> Vec<Change> {
        let Self {
            survey,
            values,
            errors,
        } = self;
        let mut changes = Vec::new();

        for (index, question) in survey.questions().iter().enumerate() {
            let id = question.id();
            ui.label(egui::RichText::new(format!("{}. {}", index + 1, question.text())).strong());

            let value = values.entry(id).or_default();
            let mut changed = false;
            match question.kind() {
                QuestionKind::FreeText => {
                    changed = ui
                        .add(
                            egui::TextEdit::multiline(value)
                                .desired_width(f32::INFINITY)
                                .desired_rows(2),
                        )
                        .changed();
                }
                QuestionKind::MultipleChoice(mcq) => {
                    for option in mcq.options() {
                        let selected = *value == *option;
                        if ui.radio(selected, option.as_str()).clicked() && !selected {
                            value.clone_from(option);
                            changed = true;
                        }
                    }
                }
            }
            if changed {
                changes.push(check(question, value, errors, validate));
            }

            if let Some(error) = errors.get(&id) {
                ui.colored_label(egui::Color32::RED, format!("⚠ {error}"));
            }
            ui.add_space(8.0);
        }
        changes
    }
}

fn check(
    question: &Question,
    value: &str,
    errors: &mut HashMap<QuestionId, String>,
    validate: Validator,
) -> Change {
    let id = question.id();
    if value.trim().is_empty() {
        // Blank is "not answered yet", not an error worth shouting about.
        errors.remove(&id);
        return (id, None);
    }
    match validate(question, value) {
        Ok(()) => {
            errors.remove(&id);
            (id, Some(value.to_string()))
        }
        Err(message) => {
            errors.insert(id, message);
            (id, None)
        }
    }
}
