//! The preview slot of the generator UI.
//!
//! Rendering may finish after the user has already edited the input. Each
//! request therefore gets a [`QrTicket`] stamped with the panel's current
//! generation; any input change bumps the generation, and a result whose
//! ticket is no longer current is dropped instead of shown.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::RgbaImage;

use super::{QrError, QrStyle, render};

/// Identifies one preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrTicket {
    generation: u64,
    content: String,
}

impl QrTicket {
    /// The string this request encodes.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A rendered preview and the exact string it encodes.
#[derive(Debug, Clone)]
pub struct QrPreview {
    pub content: String,
    pub image: RgbaImage,
}

/// What the preview slot currently shows.
#[derive(Debug, Clone, Default)]
pub enum PanelState {
    /// Nothing generated (initial, after an edit, or after a failure).
    #[default]
    Empty,
    /// Waiting for a render.
    Pending(QrTicket),
    /// A finished preview.
    Ready(QrPreview),
}

/// Preview slot with stale-result suppression.
#[derive(Debug, Clone, Default)]
pub struct QrPanel {
    generation: u64,
    state: PanelState,
    last_error: Option<String>,
}

impl QrPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn preview(&self) -> Option<&QrPreview> {
        match &self.state {
            PanelState::Ready(preview) => Some(preview),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PanelState::Pending(_))
    }

    /// Message of the most recent failed render, cleared by the next request.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a request for `content`.
    ///
    /// Returns `None` (and changes nothing) for blank content. Any earlier
    /// outstanding ticket becomes stale.
    pub fn request(&mut self, content: &str) -> Option<QrTicket> {
        if !super::is_generatable(content) {
            return None;
        }
        self.generation += 1;
        let ticket = QrTicket {
            generation: self.generation,
            content: content.to_string(),
        };
        self.state = PanelState::Pending(ticket.clone());
        self.last_error = None;
        Some(ticket)
    }

    /// Apply a finished render. Returns `false` if the ticket was stale
    /// and the result discarded.
    ///
    /// A failure reverts the panel to `Empty`.
    pub fn resolve(&mut self, ticket: &QrTicket, result: Result<RgbaImage, QrError>) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale QR render"
            );
            return false;
        }
        self.state = match result {
            Ok(image) => PanelState::Ready(QrPreview {
                content: ticket.content.clone(),
                image,
            }),
            Err(err) => {
                tracing::warn!(%err, "QR render failed");
                self.last_error = Some(err.to_string());
                PanelState::Empty
            }
        };
        true
    }

    /// Drop whatever is shown or pending because the input changed.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = PanelState::Empty;
    }

    /// Request and render synchronously.
    pub fn generate(&mut self, content: &str, style: &QrStyle) -> Option<&QrPreview> {
        let ticket = self.request(content)?;
        let result = render(ticket.content(), style.preview_size, style);
        self.resolve(&ticket, result);
        self.preview()
    }
}

/// A render running on a worker thread.
#[derive(Debug)]
pub struct RenderJob {
    ticket: QrTicket,
    receiver: Receiver<Result<RgbaImage, QrError>>,
}

impl RenderJob {
    pub fn ticket(&self) -> &QrTicket {
        &self.ticket
    }

    /// Poll without blocking. Returns the result once, when ready.
    pub fn try_take(&self) -> Option<Result<RgbaImage, QrError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(QrError::WorkerLost)),
        }
    }

    /// Block until the render finishes.
    pub fn wait(self) -> (QrTicket, Result<RgbaImage, QrError>) {
        let result = self.receiver.recv().unwrap_or(Err(QrError::WorkerLost));
        (self.ticket, result)
    }
}

/// Render `ticket`'s content at `size` on a worker thread.
pub fn spawn_render(ticket: QrTicket, size: u32, style: QrStyle) -> RenderJob {
    let (sender, receiver) = mpsc::channel();
    let content = ticket.content.clone();
    thread::spawn(move || {
        // The receiver may be gone if the UI moved on; nothing to do then.
        let _ = sender.send(render(&content, size, &style));
    });
    RenderJob { ticket, receiver }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_request_is_ignored() {
        let mut panel = QrPanel::new();
        assert!(panel.request("   ").is_none());
        assert!(matches!(panel.state(), PanelState::Empty));
    }

    #[test]
    fn current_ticket_is_applied() {
        let style = QrStyle::default();
        let mut panel = QrPanel::new();
        let ticket = panel.request("https://example.com").unwrap();
        assert!(panel.is_pending());
        let image = render(ticket.content(), style.preview_size, &style);
        assert!(panel.resolve(&ticket, image));
        assert_eq!(panel.preview().unwrap().content, "https://example.com");
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let style = QrStyle::default();
        let mut panel = QrPanel::new();
        let old = panel.request("first").unwrap();
        let new = panel.request("second").unwrap();

        assert!(!panel.resolve(&old, render("first", 64, &style)));
        assert!(panel.is_pending());

        assert!(panel.resolve(&new, render("second", 64, &style)));
        assert_eq!(panel.preview().unwrap().content, "second");
    }

    #[test]
    fn edit_after_request_discards_result() {
        let style = QrStyle::default();
        let mut panel = QrPanel::new();
        let ticket = panel.request("first").unwrap();
        panel.invalidate();
        assert!(!panel.resolve(&ticket, render("first", 64, &style)));
        assert!(panel.preview().is_none());
    }

    #[test]
    fn failure_reverts_to_empty() {
        let mut panel = QrPanel::new();
        let ticket = panel.request("x").unwrap();
        assert!(panel.resolve(&ticket, Err(QrError::TooLong(9999))));
        assert!(matches!(panel.state(), PanelState::Empty));
        assert!(panel.last_error().unwrap().contains("9999"));

        // Retrying works and clears the error.
        let style = QrStyle::default();
        assert!(panel.generate("x", &style).is_some());
        assert!(panel.last_error().is_none());
    }

    #[test]
    fn background_render_completes() {
        let style = QrStyle::default();
        let mut panel = QrPanel::new();
        let ticket = panel.request("https://example.com").unwrap();
        let job = spawn_render(ticket, style.preview_size, style.clone());
        let (ticket, result) = job.wait();
        assert!(panel.resolve(&ticket, result));
        assert_eq!(
            panel.preview().unwrap().image.width(),
            style.preview_size
        );
    }
}
