//! Upload pane: a path field for the PDF and the upload action.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::components::{DocumentUploader, SelectedFile};
use crate::core::desk::Desk;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

#[derive(Debug, Default)]
pub struct UploadView {
    pub path: InputBuffer,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter selects the typed path (if any) and starts the upload.
    pub fn handle_input(&mut self, event: &Event, desk: &mut Desk) -> ViewResult {
        let Some((modifiers, code)) = key_press(event) else {
            return ViewResult::Ignored;
        };
        if modifiers.contains(KeyModifiers::CONTROL) {
            return ViewResult::Ignored;
        }

        match code {
            KeyCode::Enter => {
                let path = self.path.text().trim();
                if path.is_empty() {
                    desk.uploader.clear_selection();
                } else {
                    desk.select_file(SelectedFile::new(expand_home(path)));
                }
                ViewResult::Dispatch(desk.upload())
            }
            code if self.path.handle_key(code) => ViewResult::Consumed,
            _ => ViewResult::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, uploader: &DocumentUploader, focused: bool) {
        let block = theme::pane("Upload", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            self.path.to_line("PDF path:", "~/invoice.pdf", focused),
            status_line(uploader),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn status_line(uploader: &DocumentUploader) -> Line<'static> {
    if uploader.is_uploading() {
        return Line::from(vec![
            Span::styled(" Uploading... ", theme::busy_badge()),
            Span::styled(" upload disabled until it finishes", theme::dim()),
        ]);
    }

    let mut spans = Vec::new();
    if let Some(kind) = uploader.last_classified_type() {
        spans.push(Span::styled("Document type: ", theme::muted()));
        spans.push(Span::styled(kind.to_string(), theme::highlight()));
        spans.push(Span::raw("  "));
    }
    if uploader
        .selected_file()
        .is_some_and(|file| !file.looks_like_pdf())
    {
        spans.push(Span::styled("(not a .pdf) ", theme::error()));
    }
    spans.push(Span::styled("Enter to upload", theme::key_hint()));
    Line::from(spans)
}

fn expand_home(path: &str) -> std::path::PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => std::path::PathBuf::from(path),
    }
}
