//! The generator window: URL or survey in, QR preview and PNG out.

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use qrsurvey::qr::{
    self, QrError, QrPanel, QrPreview, QrStyle, QrTicket, RenderJob, RgbaImage, spawn_render,
};
use qrsurvey::{MultipleChoiceQuestion, QrSource, QuestionId, QuestionType, SurveyDraft};
use url::Url;

use crate::backend::{EguiBackend, EguiError};

/// What the generator encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Any text, typically a URL.
    #[default]
    Url,
    /// A survey built in the editor.
    Survey,
}

/// Settings for the generator window.
#[derive(Debug, Clone)]
pub struct AuthoringOptions {
    /// Where survey links point.
    pub base_url: Url,
    pub style: QrStyle,
    /// Where the download button saves `qr-code.png`.
    pub download_dir: PathBuf,
    /// Survey to start from instead of a blank draft.
    pub draft: Option<SurveyDraft>,
    pub window: EguiBackend,
}

impl AuthoringOptions {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            style: QrStyle::default(),
            download_dir: PathBuf::from("."),
            draft: None,
            window: EguiBackend::new()
                .with_title("QR Survey")
                .with_window_size([900.0, 640.0]),
        }
    }
}

/// A structural edit to the draft, collected while drawing and applied after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DraftAction {
    AddQuestion(QuestionType),
    RemoveQuestion(QuestionId),
    MoveUp(QuestionId),
    MoveDown(QuestionId),
    SetType(QuestionId, QuestionType),
    AddOption(QuestionId),
    RemoveOption(QuestionId, usize),
}

/// Everything the generator window shows, independent of egui.
#[derive(Debug)]
pub struct AuthoringState {
    mode: Mode,
    url_text: String,
    draft: SurveyDraft,
    base_url: Url,
    style: QrStyle,
    download_dir: PathBuf,
    panel: QrPanel,
    job: Option<RenderJob>,
    status: Option<String>,
}

impl AuthoringState {
    pub fn new(options: AuthoringOptions) -> Self {
        let mode = if options.draft.is_some() {
            Mode::Survey
        } else {
            Mode::Url
        };
        Self {
            mode,
            url_text: String::new(),
            draft: options.draft.unwrap_or_default(),
            base_url: options.base_url,
            style: options.style,
            download_dir: options.download_dir,
            panel: QrPanel::new(),
            job: None,
            status: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.edited();
        }
    }

    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    /// Direct access for text widgets. Call [`Self::edited`] after a change.
    pub fn url_text_mut(&mut self) -> &mut String {
        &mut self.url_text
    }

    pub fn set_url_text(&mut self, text: impl Into<String>) {
        self.url_text = text.into();
        self.edited();
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    /// Direct access for the editor. Call [`Self::edited`] after a change.
    pub fn draft_mut(&mut self) -> &mut SurveyDraft {
        &mut self.draft
    }

    /// The input changed: whatever is shown or rendering no longer applies.
    pub fn edited(&mut self) {
        self.panel.invalidate();
        self.job = None;
        self.status = None;
    }

    pub fn source(&self) -> QrSource {
        match self.mode {
            Mode::Url => QrSource::Url(self.url_text.clone()),
            Mode::Survey => QrSource::Survey(self.draft.clone()),
        }
    }

    /// The exact string the next code would encode.
    pub fn content(&self) -> Option<String> {
        self.source().content(&self.base_url)
    }

    pub fn can_generate(&self) -> bool {
        self.content().is_some()
    }

    /// Start rendering a preview in the background.
    pub fn generate(&mut self) -> bool {
        let Some(content) = self.content() else {
            return false;
        };
        let Some(ticket) = self.panel.request(&content) else {
            return false;
        };
        tracing::debug!(mode = ?self.mode, len = content.len(), "generating QR preview");
        self.status = None;
        self.job = Some(spawn_render(ticket, self.style.preview_size, self.style.clone()));
        true
    }

    /// Apply a finished background render. Returns `true` if the panel changed.
    pub fn poll(&mut self) -> bool {
        let Some(job) = &self.job else {
            return false;
        };
        let Some(result) = job.try_take() else {
            return false;
        };
        let ticket = job.ticket().clone();
        self.job = None;
        self.finish(&ticket, result)
    }

    /// Block until the outstanding render finishes.
    pub fn wait(&mut self) -> bool {
        let Some(job) = self.job.take() else {
            return false;
        };
        let (ticket, result) = job.wait();
        self.finish(&ticket, result)
    }

    fn finish(&mut self, ticket: &QrTicket, result: Result<RgbaImage, QrError>) -> bool {
        let applied = self.panel.resolve(ticket, result);
        if applied && let Some(err) = self.panel.last_error() {
            self.status = Some(err.to_string());
        }
        applied
    }

    pub fn is_pending(&self) -> bool {
        self.panel.is_pending()
    }

    pub fn preview(&self) -> Option<&QrPreview> {
        self.panel.preview()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Save the full-size image of what the preview shows.
    pub fn download(&mut self) -> Result<PathBuf, QrError> {
        let content = self
            .preview()
            .map(|p| p.content.clone())
            .ok_or(QrError::EmptyContent)?;
        let result = qr::save_download(&content, &self.style, &self.download_dir);
        self.status = Some(match &result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => format!("Download failed: {err}"),
        });
        result
    }

    pub(crate) fn apply(&mut self, action: DraftAction) -> bool {
        let draft = &mut self.draft;
        let changed = match action {
            DraftAction::AddQuestion(kind) => {
                draft.add_question(kind);
                true
            }
            DraftAction::RemoveQuestion(id) => draft.remove_question(id),
            DraftAction::MoveUp(id) => draft.move_question_up(id),
            DraftAction::MoveDown(id) => draft.move_question_down(id),
            DraftAction::SetType(id, kind) => draft.set_question_type(id, kind),
            DraftAction::AddOption(id) => draft.add_option(id),
            DraftAction::RemoveOption(id, index) => draft.remove_option(id, index),
        };
        if changed {
            self.edited();
        }
        changed
    }
}

struct AuthoringApp {
    state: AuthoringState,
    texture: Option<egui::TextureHandle>,
}

impl AuthoringApp {
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        self.texture = self.state.preview().map(|preview| {
            let size = [
                preview.image.width() as usize,
                preview.image.height() as usize,
            ];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, preview.image.as_raw());
            ctx.load_texture("qr-preview", image, egui::TextureOptions::NEAREST)
        });
    }
}

impl eframe::App for AuthoringApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll() {
            self.refresh_texture(ctx);
        }

        egui::SidePanel::left("source")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| show_source(ui, &mut self.state));
            });

        if self.texture.is_some() && self.state.preview().is_none() {
            self.texture = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            show_preview(ui, &mut self.state, self.texture.as_ref());
        });

        if self.state.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}

fn show_source(ui: &mut egui::Ui, state: &mut AuthoringState) {
    let mut mode = state.mode();
    ui.horizontal(|ui| {
        ui.radio_value(&mut mode, Mode::Url, "URL");
        ui.radio_value(&mut mode, Mode::Survey, "Survey");
    });
    state.set_mode(mode);
    ui.separator();

    match mode {
        Mode::Url => {
            ui.label("Text or URL to encode");
            let response = ui.add(
                egui::TextEdit::singleline(state.url_text_mut())
                    .hint_text("https://example.com")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                state.edited();
            }
        }
        Mode::Survey => show_draft_editor(ui, state),
    }

    ui.separator();
    if ui
        .add_enabled(state.can_generate(), egui::Button::new("Generate QR code"))
        .clicked()
    {
        state.generate();
    }
    if mode == Mode::Survey {
        for issue in state.draft().issues() {
            ui.weak(issue.to_string());
        }
    }
}

fn show_draft_editor(ui: &mut egui::Ui, state: &mut AuthoringState) {
    let mut edited = false;
    let mut actions = Vec::new();

    ui.label("Title");
    edited |= ui
        .add(egui::TextEdit::singleline(state.draft_mut().title_mut()).desired_width(f32::INFINITY))
        .changed();

    let questions: Vec<_> = state
        .draft()
        .questions()
        .iter()
        .map(|q| (q.id(), q.question_type(), q.options().len()))
        .collect();
    let count = questions.len();

    for (index, (id, kind, options)) in questions.into_iter().enumerate() {
        ui.push_id(id.get(), |ui| {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(format!("Question {}", index + 1));
                    let mut selected = kind;
                    egui::ComboBox::from_id_salt("type")
                        .selected_text(selected.label())
                        .show_ui(ui, |ui| {
                            for choice in [QuestionType::FreeText, QuestionType::MultipleChoice] {
                                ui.selectable_value(&mut selected, choice, choice.label());
                            }
                        });
                    if selected != kind {
                        actions.push(DraftAction::SetType(id, selected));
                    }
                    if ui.add_enabled(index > 0, egui::Button::new("⬆")).clicked() {
                        actions.push(DraftAction::MoveUp(id));
                    }
                    if ui.add_enabled(index + 1 < count, egui::Button::new("⬇")).clicked() {
                        actions.push(DraftAction::MoveDown(id));
                    }
                    if ui.button("🗑").clicked() {
                        actions.push(DraftAction::RemoveQuestion(id));
                    }
                });

                if let Some(text) = state.draft_mut().question_text_mut(id) {
                    edited |= ui
                        .add(
                            egui::TextEdit::singleline(text)
                                .hint_text("Question")
                                .desired_width(f32::INFINITY),
                        )
                        .changed();
                }

                if kind == QuestionType::MultipleChoice {
                    for option in 0..options {
                        ui.horizontal(|ui| {
                            if let Some(text) = state.draft_mut().option_mut(id, option) {
                                edited |= ui
                                    .add(
                                        egui::TextEdit::singleline(text)
                                            .hint_text(format!("Option {}", option + 1)),
                                    )
                                    .changed();
                            }
                            let removable = options > MultipleChoiceQuestion::MIN_OPTIONS;
                            if ui.add_enabled(removable, egui::Button::new("✕")).clicked() {
                                actions.push(DraftAction::RemoveOption(id, option));
                            }
                        });
                    }
                    let addable = options < MultipleChoiceQuestion::MAX_OPTIONS;
                    if ui.add_enabled(addable, egui::Button::new("Add option")).clicked() {
                        actions.push(DraftAction::AddOption(id));
                    }
                }
            });
        });
    }

    ui.horizontal(|ui| {
        if ui.button("Add free-text question").clicked() {
            actions.push(DraftAction::AddQuestion(QuestionType::FreeText));
        }
        if ui.button("Add multiple-choice question").clicked() {
            actions.push(DraftAction::AddQuestion(QuestionType::MultipleChoice));
        }
    });

    if edited {
        state.edited();
    }
    for action in actions {
        state.apply(action);
    }
}

fn show_preview(
    ui: &mut egui::Ui,
    state: &mut AuthoringState,
    texture: Option<&egui::TextureHandle>,
) {
    ui.heading("Preview");
    if state.is_pending() {
        ui.spinner();
    }

    let shown = state.preview().map(|preview| preview.content.clone());
    if let (Some(texture), Some(content)) = (texture, shown) {
        ui.add(egui::Image::new(egui::load::SizedTexture::from_handle(texture)));
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&content).monospace());
            if ui.small_button("Copy").clicked() {
                ui.ctx().copy_text(content.clone());
            }
        });
        if ui.button("Download PNG").clicked()
            && let Err(err) = state.download()
        {
            tracing::warn!(%err, "download failed");
        }
    } else if !state.is_pending() {
        ui.weak("Generate a code to see it here.");
    }

    if let Some(status) = state.status() {
        ui.label(status);
    }
}

/// Open the generator window and block until it is closed.
pub fn run_authoring(options: AuthoringOptions) -> Result<(), EguiError> {
    let window = options.window.clone();
    let state = AuthoringState::new(options);
    eframe::run_native(
        window.title(),
        window.native_options(),
        Box::new(move |_cc| {
            Ok(Box::new(AuthoringApp {
                state,
                texture: None,
            }) as Box<dyn eframe::App>)
        }),
    )?;
    Ok(())
}
