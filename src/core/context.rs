//! Composition-root application state.
//!
//! All mutable process state (settings, last-seen clipboard text, cache)
//! lives in explicit structs owned here and passed down by reference; there
//! are no ambient globals.

use std::sync::{Arc, RwLock};

use crate::config::Setting;
use crate::core::event_bus::EventBus;
use crate::error::Result;
use crate::infrastructure::clipboard::port::{ClipboardPort, SystemClipboard};
use crate::infrastructure::storage::db::pool::init_db_pool;
use crate::infrastructure::storage::ClipboardStore;
use crate::services::history::HistoryService;

/// Shared state wired up once at startup.
pub struct AppContext {
    pub settings: Arc<RwLock<Setting>>,
    pub event_bus: Arc<EventBus>,
    pub store: Arc<ClipboardStore>,
    pub history: Arc<HistoryService>,
}

impl AppContext {
    /// Open the database, run migrations and wire the store and services.
    pub fn initialize(setting: Setting, database_url: &str) -> Result<Self> {
        Self::with_clipboard(setting, database_url, Arc::new(SystemClipboard))
    }

    /// Same as [`AppContext::initialize`] with an injected clipboard port.
    pub fn with_clipboard(
        setting: Setting,
        database_url: &str,
        clipboard: Arc<dyn ClipboardPort>,
    ) -> Result<Self> {
        let settings = Arc::new(RwLock::new(setting));
        let event_bus = Arc::new(EventBus::new());

        let pool = init_db_pool(database_url)?;
        let store = Arc::new(ClipboardStore::new(pool, settings.clone()));

        let history = Arc::new(HistoryService::new(
            Some(store.clone()),
            clipboard,
            event_bus.clone(),
            settings.clone(),
        ));

        Ok(Self {
            settings,
            event_bus,
            store,
            history,
        })
    }
}
