//! Key details pane: invoice and purchase order tables.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::api::{ExtractedDetails, InvoiceRecord, PurchaseOrderRecord};
use crate::core::components::DocumentDetailFetcher;
use crate::core::desk::Desk;
use crate::tui::theme;

#[derive(Debug, Default)]
pub struct KeyDetailsView {
    scroll: usize,
}

impl KeyDetailsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(&mut self, event: &Event, desk: &mut Desk) -> ViewResult {
        let Some((modifiers, code)) = key_press(event) else {
            return ViewResult::Ignored;
        };
        if modifiers != KeyModifiers::NONE {
            return ViewResult::Ignored;
        }

        match code {
            KeyCode::Enter | KeyCode::Char('r') => {
                self.scroll = 0;
                ViewResult::Dispatch(desk.fetch_key_details())
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                ViewResult::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                ViewResult::Consumed
            }
            _ => ViewResult::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, fetcher: &DocumentDetailFetcher, focused: bool) {
        let block = theme::pane("Key Details", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = if fetcher.is_loading() {
            vec![Line::from(Span::styled("Loading...", theme::muted()))]
        } else {
            match fetcher.details() {
                Some(details) => detail_lines(details),
                None => vec![Line::from(Span::styled(
                    "Press Enter to fetch extracted fields.",
                    theme::dim(),
                ))],
            }
        };

        let scroll = self.scroll.min(lines.len().saturating_sub(1));
        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
    }
}

/// A table per present key. An empty list still gets its header.
pub fn detail_lines(details: &ExtractedDetails) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(invoices) = &details.invoices {
        lines.push(Line::from(Span::styled("Invoices", theme::heading())));
        lines.push(header_row(["Invoice #", "Date", "Total", "Vendor"]));
        lines.extend(invoices.iter().map(invoice_row));
        lines.push(Line::raw(""));
    }

    if let Some(orders) = &details.purchase_orders {
        lines.push(Line::from(Span::styled("Purchase Orders", theme::heading())));
        lines.push(header_row(["PO #", "Date", "Total", "Supplier"]));
        lines.extend(orders.iter().map(purchase_order_row));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No extracted fields.", theme::dim())));
    }
    lines
}

fn header_row(cells: [&str; 4]) -> Line<'static> {
    Line::from(Span::styled(
        format!("{:<16} {:<12} {:>12}  {}", cells[0], cells[1], cells[2], cells[3]),
        theme::muted(),
    ))
}

fn invoice_row(invoice: &InvoiceRecord) -> Line<'static> {
    Line::raw(format!(
        "{:<16} {:<12} {:>12}  {}",
        invoice.number, invoice.date, invoice.total_amount, invoice.vendor_name
    ))
}

fn purchase_order_row(order: &PurchaseOrderRecord) -> Line<'static> {
    Line::raw(format!(
        "{:<16} {:<12} {:>12}  {}",
        order.number, order.date, order.total_amount, order.supplier_name
    ))
}
