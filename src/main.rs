use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use docdesk::config::AppConfig;
use docdesk::core::route::Route;
use docdesk::tui::services::Services;
use docdesk::tui::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (file only; stdout belongs to the terminal UI)
    let _log_guard = docdesk::core::logging::init_tui();
    log::info!("{} v{} starting", docdesk::NAME, docdesk::VERSION);

    let config = AppConfig::load();
    let tick_rate = config.tick_rate();

    // Optional start route, e.g. `docdesk /document_details/42`
    let initial_route = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path)?,
        None => Route::Home,
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(config, event_tx)?;
    let mut app = AppState::new(event_rx, services);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, tick_rate, initial_route).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return so `_log_guard` drops and flushes the log.
    if let Err(e) = result {
        log::error!("TUI exited with error: {e}");
        return Err(e.into());
    }

    log::info!("Shutting down");
    Ok(())
}
