//! The respondent window: opens a link and walks its session to the end.

use std::sync::{Arc, Mutex};

use eframe::egui;
use qrsurvey::respondent::validate_answer;
use qrsurvey::{Answers, RespondentSession, SessionState};

use crate::backend::{EguiBackend, EguiError, lock};
use crate::form::FormState;

struct RespondentApp {
    session: Arc<Mutex<RespondentSession>>,
    form: Option<FormState>,
}

impl RespondentApp {
    fn new(session: Arc<Mutex<RespondentSession>>) -> Self {
        let form = lock(&session).survey().cloned().map(FormState::new);
        Self { session, form }
    }
}

impl eframe::App for RespondentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut session = lock(&self.session);
            match session.state() {
                SessionState::Loading => {
                    ui.spinner();
                }
                SessionState::Invalid => {
                    ui.heading("Invalid survey");
                    ui.label("This link does not contain a valid survey.");
                    if let Some(reason) = session.invalid_reason() {
                        ui.weak(reason.to_string());
                    }
                }
                SessionState::Active => {
                    let Some(form) = self.form.as_mut() else {
                        return;
                    };
                    ui.heading(form.survey().title());
                    ui.separator();
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for (id, value) in form.show(ui, validate_answer) {
                            let result = match value {
                                Some(value) => session.answer(id, value),
                                None => session.clear_answer(id),
                            };
                            if let Err(err) = result {
                                tracing::warn!(%err, %id, "answer not recorded");
                            }
                        }
                        ui.separator();
                        if ui
                            .add_enabled(session.can_submit(), egui::Button::new("Submit"))
                            .clicked()
                            && let Err(err) = session.submit()
                        {
                            tracing::warn!(%err, "submit failed");
                        }
                    });
                }
                SessionState::Submitted => {
                    ui.heading("Thank you!");
                    ui.label("Your answers were recorded.");
                    if let (Some(survey), Some(answers)) = (session.survey(), session.answers()) {
                        ui.separator();
                        for (id, value) in answers.ordered(survey) {
                            if let Some(question) = survey.question(id) {
                                ui.label(egui::RichText::new(question.text()).strong());
                                ui.label(value);
                            }
                        }
                    }
                    if ui.button("Close").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            }
        });
    }
}

/// Open `link` in a respondent window.
///
/// Returns the submitted answers, or `None` if the window was closed first
/// (including when the link was invalid).
pub fn run_respondent(link: &str, window: &EguiBackend) -> Result<Option<Answers>, EguiError> {
    let session = Arc::new(Mutex::new(RespondentSession::from_url(link)));
    let app_session = Arc::clone(&session);

    eframe::run_native(
        window.title(),
        window.native_options(),
        Box::new(move |_cc| {
            Ok(Box::new(RespondentApp::new(app_session)) as Box<dyn eframe::App>)
        }),
    )?;

    let session = lock(&session);
    tracing::debug!(state = ?session.state(), "respondent window closed");
    Ok(match session.state() {
        SessionState::Submitted => session.answers().cloned(),
        _ => None,
    })
}
