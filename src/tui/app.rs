use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification};
use super::layout::{AppLayout, HomeLayout};
use super::services::Services;
use super::theme;
use super::views::chat::ChatView;
use super::views::documents::DocumentsView;
use super::views::email::EmailView;
use super::views::key_details::KeyDetailsView;
use super::views::upload::UploadView;
use super::views::{detail, key_press, ViewResult};
use super::widgets::InputBuffer;
use crate::core::command::{Command, Outcome};
use crate::core::components::{DocumentDetailPage, NoticeLevel};
use crate::core::desk::Desk;
use crate::core::route::Route;

const MAX_NOTIFICATIONS: usize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    pub route: Route,
    /// Focused pane of the home route.
    pub focus: Focus,
    /// Components of the home route.
    pub desk: Desk,
    /// Component of the detail route.
    pub detail_page: DocumentDetailPage,
    pub email: EmailView,
    pub upload: UploadView,
    pub documents: DocumentsView,
    pub key_details: KeyDetailsView,
    pub chat: ChatView,
    /// "Go to" prompt (Some when open).
    pub goto: Option<InputBuffer>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for request outcomes and other background events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        let detail_page = DocumentDetailPage::new(services.config.detail_page.email.clone());
        Self {
            running: true,
            route: Route::Home,
            focus: Focus::Email,
            desk: Desk::new(),
            detail_page,
            email: EmailView::new(),
            upload: UploadView::new(),
            documents: DocumentsView::new(),
            key_details: KeyDetailsView::new(),
            chat: ChatView::new(),
            goto: None,
            notifications: Vec::new(),
            show_help: false,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
        initial_route: Route,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.navigate(initial_route);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                self.handle_input(&crossterm_event);
                self.drain_notices();
            }
            AppEvent::Outcome(outcome) => {
                self.on_outcome(outcome);
                self.drain_notices();
            }
            AppEvent::Notification(notice) => {
                self.push_notification(notice.message, notice.level);
            }
            AppEvent::Tick => self.on_tick(),
        }
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: go-to prompt consumes all input when open
        if self.goto.is_some() {
            self.handle_goto_input(event);
            return;
        }

        // Priority 2: help modal
        if self.show_help {
            if let Some((_, KeyCode::Esc | KeyCode::Char('?'))) = key_press(event) {
                self.handle_action(Action::CloseHelp);
            }
            return;
        }

        // Priority 3: active route's view
        let result = self.dispatch_view_input(event);
        if result.is_consumed() {
            self.apply_view_result(result);
            return;
        }

        // Priority 4: global keybindings
        if let Some(action) = self.map_input_to_action(event) {
            self.handle_action(action);
        }
    }

    fn dispatch_view_input(&mut self, event: &Event) -> ViewResult {
        match self.route {
            Route::DocumentDetails(_) => detail::handle_input(event, &mut self.detail_page),
            Route::Home => match self.focus {
                Focus::Email => self.email.handle_input(event, &mut self.desk),
                Focus::Upload => self.upload.handle_input(event, &mut self.desk),
                Focus::Documents => {
                    self.documents
                        .handle_input(event, &mut self.desk, &self.services.links)
                }
                Focus::KeyDetails => self.key_details.handle_input(event, &mut self.desk),
                Focus::Chat => self.chat.handle_input(event, &mut self.desk),
            },
        }
    }

    fn apply_view_result(&mut self, result: ViewResult) {
        match result {
            ViewResult::Ignored | ViewResult::Consumed => {}
            ViewResult::Dispatch(commands) => self.dispatch(commands),
            ViewResult::Navigate(route) => self.handle_action(Action::Navigate(route)),
            ViewResult::OpenLink(url) => self.services.open_link(&url),
        }
    }

    fn handle_goto_input(&mut self, event: &Event) {
        let Some((_, code)) = key_press(event) else {
            return;
        };
        match code {
            KeyCode::Esc => self.handle_action(Action::CloseGoTo),
            KeyCode::Enter => {
                let path = self.goto.take().map(|mut input| input.take()).unwrap_or_default();
                match path.parse::<Route>() {
                    Ok(route) => self.handle_action(Action::Navigate(route)),
                    Err(e) => self.push_notification(e.to_string(), NoticeLevel::Warning),
                }
            }
            code => {
                if let Some(input) = self.goto.as_mut() {
                    input.handle_key(code);
                }
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let (modifiers, code) = key_press(event)?;

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(Action::OpenGoTo),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('g') => Some(Action::OpenGoTo),
                KeyCode::Tab if self.route == Route::Home => Some(Action::FocusNext),
                KeyCode::BackTab if self.route == Route::Home => Some(Action::FocusPrev),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::OpenGoTo => self.goto = Some(InputBuffer::with_text(&self.route.path())),
            Action::CloseGoTo => self.goto = None,
            Action::Navigate(route) => self.navigate(route),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Switch routes. Entering a detail route always (re)mounts the page.
    pub fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {route}");
        if let Route::DocumentDetails(id) = &route {
            let command = self.detail_page.mount(id);
            self.dispatch(vec![command]);
        }
        self.route = route;
    }

    fn dispatch(&self, commands: Vec<Command>) {
        self.services.dispatch(commands);
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DocumentDetail { ticket, result } => self.detail_page.apply(ticket, result),
            other => {
                let follow_up = self.desk.apply(other);
                self.dispatch(follow_up);
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    fn drain_notices(&mut self) {
        for notice in self.desk.take_notices() {
            self.push_notification(notice.message, notice.level);
        }
    }

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NoticeLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notifications.push(Notification {
            message,
            level,
            ttl_ticks: self.services.config.tui.notification_ttl_ticks,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        match self.route {
            Route::Home => self.render_home(frame, layout.main),
            Route::DocumentDetails(_) => detail::render(frame, layout.main, &self.detail_page),
        }

        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }

        if let Some(ref input) = self.goto {
            self.render_goto(frame, area, input);
        }
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let panes = HomeLayout::compute(area);
        let focused = |f: Focus| self.focus == f;

        self.email
            .render(frame, panes.email, &self.desk.gate, focused(Focus::Email));
        self.upload
            .render(frame, panes.upload, &self.desk.uploader, focused(Focus::Upload));
        self.documents.render(
            frame,
            panes.documents,
            &self.desk.lister,
            &self.services.links,
            focused(Focus::Documents),
        );
        self.key_details.render(
            frame,
            panes.key_details,
            &self.desk.key_details,
            focused(Focus::KeyDetails),
        );
        self.chat
            .render(frame, panes.chat, &self.desk.conversation, focused(Focus::Chat));
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = match self.desk.email() {
            Some(email) => Span::styled(email.to_string(), Style::default().fg(theme::SUCCESS)),
            None => Span::styled("no email", theme::muted()),
        };

        let busy = self.desk.uploader.is_uploading()
            || self.desk.lister.is_loading()
            || self.desk.key_details.is_loading()
            || self.desk.conversation.is_typing()
            || self.detail_page.is_loading();
        let busy_badge = if busy {
            Span::styled(" BUSY ", theme::busy_badge())
        } else {
            Span::raw("")
        };

        // text panes swallow `q`
        let quit_key = if self.route == Route::Home && self.focus.takes_text() {
            "Ctrl+C"
        } else {
            "q"
        };

        let location = match self.route {
            Route::Home => self.focus.label().to_string(),
            Route::DocumentDetails(_) => self.route.path(),
        };

        let status = Line::from(vec![
            Span::styled(" DocDesk ", theme::brand_badge()),
            Span::raw(" "),
            busy_badge,
            Span::raw(" "),
            Span::styled(
                location,
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            session,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":pane "),
            Span::styled("Ctrl+G", theme::key_hint()),
            Span::raw(":go to "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled(quit_key, theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NoticeLevel::Info => ("ℹ", theme::INFO),
                    NoticeLevel::Success => ("✓", theme::SUCCESS),
                    NoticeLevel::Warning => ("⚠", theme::WARNING),
                    NoticeLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).bold()),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_goto(&self, frame: &mut Frame, area: Rect, input: &InputBuffer) {
        let width = 60.min(area.width.saturating_sub(4));
        let modal = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + area.height / 3,
            width,
            3,
        );
        let block = Block::default()
            .title(" Go to ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(input.to_line("Route:", "/document_details/<id>", true)).block(block),
            modal,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("Tab / Shift+Tab", "Next / previous pane"),
            ("Ctrl+G (g)", "Go to a route"),
            ("?", "Toggle this help"),
            ("q", "Quit (outside text fields)"),
            ("Ctrl+C", "Quit"),
            ("", ""),
            ("Email / Upload / Chat:", ""),
            ("Enter", "Submit"),
            ("", ""),
            ("Documents:", ""),
            ("j/k", "Select document"),
            ("Enter / o", "Open link in browser"),
            ("r", "Refresh list"),
            ("", ""),
            ("Key Details:", ""),
            ("Enter / r", "Fetch extracted fields"),
            ("", ""),
            ("Document view:", ""),
            ("r", "Reload"),
            ("Esc", "Back to home"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).bold(),
                    ),
                    Span::raw(desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    use crate::config::AppConfig;
    use crate::core::api::{DocumentDetail, DocumentSummary, InvoiceRecord, MockDocumentApi};

    fn key(code: KeyCode) -> AppEvent {
        key_with(KeyModifiers::NONE, code)
    }

    fn key_with(modifiers: KeyModifiers, code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_event(key(KeyCode::Char(c)));
        }
    }

    fn app(api: MockDocumentApi) -> AppState {
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Services::with_api(Arc::new(api), AppConfig::default(), tx);
        AppState::new(rx, services)
    }

    async fn pump(state: &mut AppState) {
        let event = state.event_rx.recv().await.expect("event channel open");
        state.handle_event(event);
    }

    #[tokio::test]
    async fn test_email_submission_lists_documents() {
        let mut api = MockDocumentApi::new();
        api.expect_list_documents()
            .withf(|email| email == "a@b.com")
            .times(1)
            .returning(|_| {
                Ok(vec![DocumentSummary {
                    name: "x.pdf".to_string(),
                    url: "u".to_string(),
                }])
            });
        let mut state = app(api);

        type_text(&mut state, "a@b.com");
        state.handle_event(key(KeyCode::Enter));
        pump(&mut state).await;

        assert_eq!(state.desk.lister.documents().len(), 1);
        assert!(state.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_ungated_upload_notifies_without_requests() {
        let mut api = MockDocumentApi::new();
        api.expect_upload_document().times(0);
        api.expect_list_documents().times(0);
        let mut state = app(api);

        state.handle_event(key(KeyCode::Tab));
        assert_eq!(state.focus, Focus::Upload);
        type_text(&mut state, "/tmp/x.pdf");
        state.handle_event(key(KeyCode::Enter));

        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].message, "Please submit your email first.");
    }

    #[tokio::test]
    async fn test_goto_detail_route_fetches_with_configured_email() {
        let mut api = MockDocumentApi::new();
        api.expect_document_details()
            .withf(|id, email| id == "abc" && email == "user@example.com")
            .times(1)
            .returning(|_, _| {
                Ok(DocumentDetail {
                    invoice: Some(InvoiceRecord::default()),
                    purchase_order: None,
                })
            });
        let mut state = app(api);

        state.handle_event(key(KeyCode::Tab));
        state.handle_event(key(KeyCode::Tab));
        state.handle_event(key(KeyCode::Char('g')));
        let goto = state.goto.as_mut().expect("go-to prompt open");
        goto.clear();
        type_text(&mut state, "/document_details/abc");
        state.handle_event(key(KeyCode::Enter));

        assert_eq!(state.route, Route::DocumentDetails("abc".to_string()));
        assert!(state.goto.is_none());
        pump(&mut state).await;
        assert!(state.detail_page.detail().is_some());

        state.handle_event(key(KeyCode::Esc));
        assert_eq!(state.route, Route::Home);
    }

    #[tokio::test]
    async fn test_bad_route_notifies() {
        let mut state = app(MockDocumentApi::new());
        state.handle_event(key_with(KeyModifiers::CONTROL, KeyCode::Char('g')));
        state.goto.as_mut().unwrap().clear();
        type_text(&mut state, "/nowhere");
        state.handle_event(key(KeyCode::Enter));
        assert_eq!(state.route, Route::Home);
        assert_eq!(state.notifications[0].message, "Unknown route: /nowhere");
    }

    #[tokio::test]
    async fn test_notifications_dedup_and_cap() {
        let mut state = app(MockDocumentApi::new());
        state.push_notification("same".into(), NoticeLevel::Info);
        state.push_notification("same".into(), NoticeLevel::Info);
        assert_eq!(state.notifications.len(), 1);

        for i in 0..5 {
            state.push_notification(format!("n{i}"), NoticeLevel::Warning);
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "n2");
    }

    #[tokio::test]
    async fn test_notifications_expire() {
        let mut state = app(MockDocumentApi::new());
        state.push_notification("bye".into(), NoticeLevel::Info);
        for _ in 0..AppConfig::default().tui.notification_ttl_ticks {
            state.handle_event(AppEvent::Tick);
        }
        assert!(state.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_q_quits_outside_text_panes_only() {
        let mut state = app(MockDocumentApi::new());
        state.handle_event(key(KeyCode::Char('q')));
        assert!(state.running);
        assert_eq!(state.email.input.text(), "q");

        state.focus = Focus::Documents;
        state.handle_event(key(KeyCode::Char('q')));
        assert!(!state.running);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.x + centered.width <= area.width);
        assert!(centered.y + centered.height <= area.height);
    }
}
