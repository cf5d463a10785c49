//! Native window collecting a survey's answers.

use std::sync::{Arc, Mutex, MutexGuard};

use eframe::egui;
use qrsurvey::respondent::validate_answer;
use qrsurvey::{Answers, Question, QuestionId, Survey, SurveyBackend};
use thiserror::Error;

use crate::form::FormState;

#[derive(Debug, Error)]
pub enum EguiError {
    /// The window was closed before the form was submitted.
    #[error("survey window closed without submitting")]
    Cancelled,

    /// The caller's validator refused a submitted answer.
    #[error("question {id}: {message}")]
    Rejected { id: QuestionId, message: String },

    #[error("window error: {0}")]
    Eframe(String),
}

impl From<eframe::Error> for EguiError {
    fn from(err: eframe::Error) -> Self {
        Self::Eframe(err.to_string())
    }
}

/// Shows the whole survey as one form in a blocking window.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    title: String,
    window_size: [f32; 2],
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiBackend {
    pub fn new() -> Self {
        Self {
            title: "Survey".to_string(),
            window_size: [500.0, 600.0],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Inner size as `[width, height]` in points.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }

    pub(crate) fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }
}

/// Shared between the window and the caller waiting on it.
#[derive(Debug)]
struct BackendState {
    form: FormState,
    submitted: bool,
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct SurveyApp {
    state: Arc<Mutex<BackendState>>,
}

impl eframe::App for SurveyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut state = lock(&self.state);

            ui.heading(state.form.survey().title());
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                state.form.show(ui, validate_answer);
                ui.separator();

                ui.horizontal(|ui| {
                    let complete = state.form.is_complete(validate_answer);
                    if ui
                        .add_enabled(complete, egui::Button::new("Submit"))
                        .clicked()
                        && state.form.validate_all(validate_answer)
                    {
                        state.submitted = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }

                    if ui.button("Cancel").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }

                    if !complete {
                        ui.weak("Answer every question to submit");
                    }
                });
            });
        });
    }
}

impl SurveyBackend for EguiBackend {
    type Error = EguiError;

    fn collect(
        &self,
        survey: &Survey,
        validate: &dyn Fn(&Question, &str) -> Result<(), String>,
    ) -> Result<Answers, Self::Error> {
        let state = Arc::new(Mutex::new(BackendState {
            form: FormState::new(survey.clone()),
            submitted: false,
        }));

        let app_state = Arc::clone(&state);
        eframe::run_native(
            self.title(),
            self.native_options(),
            Box::new(move |_cc| {
                Ok(Box::new(SurveyApp { state: app_state }) as Box<dyn eframe::App>)
            }),
        )?;

        let state = lock(&state);
        if !state.submitted {
            tracing::debug!(survey = survey.title(), "form window dismissed");
            return Err(EguiError::Cancelled);
        }

        let answers = state.form.answers(validate_answer);
        recheck(survey, &answers, validate)?;
        Ok(answers)
    }
}

/// Run the caller's validator over answers the window already accepted
/// under the built-in rules.
fn recheck(
    survey: &Survey,
    answers: &Answers,
    validate: &dyn Fn(&Question, &str) -> Result<(), String>,
) -> Result<(), EguiError> {
    survey.questions().iter().try_for_each(|question| {
        let value = answers.get(question.id()).unwrap_or_default();
        validate(question, value).map_err(|message| EguiError::Rejected {
            id: question.id(),
            message,
        })
    })
}
