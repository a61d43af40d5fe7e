//! Terminal shell: routes, panes, event loop and notifications.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::AppState;
