//! `/document_details/:id` route.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::api::DocumentDetail;
use crate::core::components::DocumentDetailPage;
use crate::core::route::Route;
use crate::tui::theme;

pub fn handle_input(event: &Event, page: &mut DocumentDetailPage) -> ViewResult {
    let Some((modifiers, code)) = key_press(event) else {
        return ViewResult::Ignored;
    };
    if modifiers != KeyModifiers::NONE {
        return ViewResult::Ignored;
    }

    match code {
        KeyCode::Esc | KeyCode::Backspace => ViewResult::Navigate(Route::Home),
        KeyCode::Char('r') => match page.document_id().map(str::to_string) {
            Some(id) => ViewResult::Dispatch(vec![page.mount(&id)]),
            None => ViewResult::Consumed,
        },
        _ => ViewResult::Ignored,
    }
}

pub fn render(frame: &mut Frame, area: Rect, page: &DocumentDetailPage) {
    let title = match page.document_id() {
        Some(id) => format!("Document {id}"),
        None => "Document".to_string(),
    };
    let block = theme::pane(&title, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(page_lines(page)), inner);
}

fn page_lines(page: &DocumentDetailPage) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if page.is_loading() {
        lines.push(Line::from(Span::styled("Loading...", theme::muted())));
    }
    if let Some(error) = page.error() {
        lines.push(Line::from(Span::styled(error.to_string(), theme::error())));
    }
    if let Some(detail) = page.detail() {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.extend(detail_lines(detail));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Esc", theme::key_hint()),
        Span::raw(":back "),
        Span::styled("r", theme::key_hint()),
        Span::raw(":reload"),
    ]));
    lines
}

/// Kind label, then a section for each record present. `invoice` only
/// decides the label; a purchase order alongside it is still shown.
pub fn detail_lines(detail: &DocumentDetail) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Document Type: {}", detail.kind().label()),
        theme::title(),
    ))];

    if let Some(invoice) = &detail.invoice {
        lines.push(Line::raw(""));
        lines.extend(section(
            "Invoice Details",
            [
                ("Invoice #", &invoice.number),
                ("Date", &invoice.date),
                ("Total", &invoice.total_amount),
                ("Vendor", &invoice.vendor_name),
            ],
        ));
    }

    if let Some(order) = &detail.purchase_order {
        lines.push(Line::raw(""));
        lines.extend(section(
            "Purchase Order Details",
            [
                ("PO #", &order.number),
                ("Order date", &order.date),
                ("Total", &order.total_amount),
                ("Supplier", &order.supplier_name),
            ],
        ));
    }

    lines
}

fn section(heading: &str, fields: [(&str, &String); 4]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(heading.to_string(), theme::heading()))];
    lines.extend(fields.into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), theme::muted()),
            Span::raw(value.clone()),
        ])
    }));
    lines
}
