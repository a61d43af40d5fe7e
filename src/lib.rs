/// DocDesk - terminal front-end for the document management service
///
/// Upload PDFs, list them, inspect extracted invoice and purchase order
/// fields, and ask questions about them. All processing happens in the
/// remote service; this crate holds the client state machines and the TUI.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
