//! Document list pane. Each entry links to the stored document.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::api::DocumentSummary;
use crate::core::components::DocumentLister;
use crate::core::desk::Desk;
use crate::core::links::LinkResolver;
use crate::tui::theme;

#[derive(Debug, Default)]
pub struct DocumentsView {
    selected: usize,
}

impl DocumentsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_input(&mut self, event: &Event, desk: &mut Desk, links: &LinkResolver) -> ViewResult {
        let Some((modifiers, code)) = key_press(event) else {
            return ViewResult::Ignored;
        };
        if modifiers != KeyModifiers::NONE {
            return ViewResult::Ignored;
        }

        // the list may have shrunk since the last key press
        let count = desk.lister.documents().len();
        self.selected = self.selected.min(count.saturating_sub(1));
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                ViewResult::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                ViewResult::Consumed
            }
            KeyCode::Char('r') => ViewResult::Dispatch(desk.refresh_documents()),
            KeyCode::Enter | KeyCode::Char('o') => match desk.lister.documents().get(self.selected) {
                Some(document) => ViewResult::OpenLink(links.resolve(document)),
                None => ViewResult::Consumed,
            },
            _ => ViewResult::Ignored,
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        lister: &DocumentLister,
        links: &LinkResolver,
        focused: bool,
    ) {
        let title = if lister.is_loading() {
            "Documents (loading...)"
        } else {
            "Documents"
        };
        let block = theme::pane(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected = self.selected.min(lister.documents().len().saturating_sub(1));
        let lines = document_lines(lister.documents(), links, focused.then_some(selected));
        let scroll = selected.saturating_sub(inner.height.saturating_sub(1) as usize);
        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
    }
}

/// One line per document: the name as a link, then the resolved location.
pub fn document_lines(
    documents: &[DocumentSummary],
    links: &LinkResolver,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    if documents.is_empty() {
        return vec![Line::from(Span::styled("No documents yet.", theme::dim()))];
    }

    documents
        .iter()
        .enumerate()
        .map(|(i, document)| {
            let marker = if selected == Some(i) { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, theme::highlight()),
                Span::styled(document.name.clone(), theme::link()),
                Span::styled(format!("  {}", links.resolve(document)), theme::dim()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn doc(name: &str, url: &str) -> DocumentSummary {
        DocumentSummary {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn loaded_desk(documents: Vec<DocumentSummary>) -> Desk {
        let mut desk = Desk::new();
        let command = desk.submit_email("a@b.com").remove(0);
        desk.apply(crate::core::command::Outcome::Documents {
            ticket: command.ticket(),
            result: Ok(documents),
        });
        desk
    }

    #[test]
    fn test_one_line_per_document() {
        let lines = document_lines(&[doc("x.pdf", "u")], &LinkResolver::verbatim(), None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[1].content, "x.pdf");
        assert_eq!(lines[0].spans[2].content, "  u");
    }

    #[test]
    fn test_empty_list_placeholder() {
        let lines = document_lines(&[], &LinkResolver::verbatim(), None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, "No documents yet.");
    }

    #[test]
    fn test_enter_opens_resolved_link() {
        let mut desk = loaded_desk(vec![doc("a.pdf", "docs/a.pdf"), doc("b.pdf", "docs/b.pdf")]);
        let links = LinkResolver::prefixed("https://s3.amazonaws.com/bucket");
        let mut view = DocumentsView::new();

        view.handle_input(&key(KeyCode::Char('j')), &mut desk, &links);
        view.handle_input(&key(KeyCode::Char('j')), &mut desk, &links);
        assert_eq!(view.selected(), 1);
        assert_eq!(
            view.handle_input(&key(KeyCode::Enter), &mut desk, &links),
            ViewResult::OpenLink("https://s3.amazonaws.com/bucket/docs/b.pdf".to_string())
        );
    }

    #[test]
    fn test_selection_follows_shorter_list() {
        let mut desk = loaded_desk(vec![doc("a.pdf", "docs/a.pdf"), doc("b.pdf", "docs/b.pdf")]);
        let links = LinkResolver::verbatim();
        let mut view = DocumentsView::new();
        view.handle_input(&key(KeyCode::Char('j')), &mut desk, &links);
        assert_eq!(view.selected(), 1);

        let refresh = desk.refresh_documents().remove(0);
        desk.apply(crate::core::command::Outcome::Documents {
            ticket: refresh.ticket(),
            result: Ok(vec![doc("c.pdf", "docs/c.pdf")]),
        });

        assert_eq!(
            view.handle_input(&key(KeyCode::Enter), &mut desk, &links),
            ViewResult::OpenLink("docs/c.pdf".to_string())
        );
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_refresh_issues_listing() {
        let mut desk = loaded_desk(Vec::new());
        let mut view = DocumentsView::new();
        match view.handle_input(&key(KeyCode::Char('r')), &mut desk, &LinkResolver::verbatim()) {
            ViewResult::Dispatch(commands) => assert_eq!(commands.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
