use std::sync::Arc;

use log::{debug, error, info};

use clipkeeper::config::setting::Setting;
use clipkeeper::config::utils::get_db_path;
use clipkeeper::core::event_bus::{DataChangedEvent, ThemeChangedEvent};
use clipkeeper::core::AppContext;
use clipkeeper::infrastructure::clipboard::{ClipboardPoller, SystemClipboard, SystemClock};
use clipkeeper::utils::logging;

#[tokio::main]
async fn main() {
    logging::init();

    // Load user settings; fall back to (and persist) the defaults
    let setting = match Setting::load(None) {
        Ok(setting) => setting,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            let default_setting = Setting::default();
            if let Err(e) = default_setting.save(None) {
                error!("Failed to save default settings: {}", e);
            }
            default_setting
        }
    };

    let db_path = match get_db_path() {
        Ok(path) => path,
        Err(e) => {
            panic!("Failed to resolve database path: {}", e);
        }
    };

    let context = match AppContext::initialize(setting, &db_path.to_string_lossy()) {
        Ok(context) => {
            info!("Database initialized successfully");
            context
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            panic!("Failed to initialize database: {}", e);
        }
    };

    // Stand-ins for the presentation shells: shells subscribe here and
    // re-render on notification
    context.event_bus.subscribe::<DataChangedEvent, _>(|event| {
        debug!("History changed at {}", event.timestamp);
    });
    context.event_bus.subscribe::<ThemeChangedEvent, _>(|event| {
        debug!("Theme changed to {:?}", event.mode);
    });

    let poller = Arc::new(ClipboardPoller::new(
        Arc::new(SystemClipboard),
        Arc::new(SystemClock),
        context.history.clone(),
        context.settings.clone(),
    ));
    let poller_task = tokio::spawn(poller.run());

    {
        let settings = context.settings.read().unwrap();
        info!(
            "clipkeeper started: polling every {} ms, retention ceiling {} entries",
            settings.clipboard_check_interval, settings.max_entries
        );
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutting down");
    poller_task.abort();
}
