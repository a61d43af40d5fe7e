use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::api::{ApiError, DocumentApi, HttpDocumentApi};
use crate::core::command::Command;
use crate::core::components::Notice;
use crate::core::links::LinkResolver;

use super::events::AppEvent;

/// Handle to the document service and the other process-wide resources.
///
/// Created once at startup and passed by reference to whatever needs to
/// issue requests. Requests run on spawned tasks and report back through
/// `event_tx`.
pub struct Services {
    pub api: Arc<dyn DocumentApi>,
    pub links: LinkResolver,
    pub config: AppConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Build the HTTP client from config.
    pub fn init(
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, ApiError> {
        let api = HttpDocumentApi::new(&config.api.base_url, config.timeout())?;
        log::info!("Document service at {}", api.base_url());
        Ok(Self::with_api(Arc::new(api), config, event_tx))
    }

    pub fn with_api(
        api: Arc<dyn DocumentApi>,
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let links = LinkResolver::from_config(&config.links);
        Self {
            api,
            links,
            config,
            event_tx,
        }
    }

    /// Run each command on its own task; outcomes arrive as `AppEvent::Outcome`.
    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            log::debug!("Dispatching {}", command.name());
            let api = Arc::clone(&self.api);
            let tx = self.event_tx.clone();
            tokio::spawn(async move {
                let outcome = command.run(api.as_ref()).await;
                let _ = tx.send(AppEvent::Outcome(outcome));
            });
        }
    }

    /// Open a document link in the system browser.
    pub fn open_link(&self, url: &str) {
        log::info!("Opening {url}");
        if let Err(e) = open::that_detached(url) {
            log::warn!("Failed to open {url}: {e}");
            let _ = self
                .event_tx
                .send(AppEvent::Notification(Notice::error(format!(
                    "Could not open link: {e}"
                ))));
        }
    }
}
