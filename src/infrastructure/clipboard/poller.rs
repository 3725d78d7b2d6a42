//! Polling-based clipboard change detection.
//!
//! The OS clipboard has no portable change notification, so the poller reads
//! it on a timer, debounces, and forwards new observations to the history
//! service. Read failures are logged and swallowed; a missed tick costs
//! nothing because the next one re-reads full state.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use log::{debug, warn};

use crate::config::Setting;
use crate::infrastructure::clipboard::port::{Clock, ClipboardPort};
use crate::infrastructure::storage::AddOptions;
use crate::services::history::HistoryService;

struct PollerState {
    /// Last clipboard text accepted as an observation
    last_seen: Option<String>,
    /// Time of the previous accepted check, for the debounce floor
    last_accepted: Option<Instant>,
}

/// Timer-driven clipboard observer.
///
/// An observation is accepted when the clipboard text is non-empty after
/// trimming, differs from the last-seen value, and at least the configured
/// debounce floor has elapsed since the previous accepted check. Skipped
/// checks leave the last-seen state untouched so the content is picked up
/// by a later tick.
pub struct ClipboardPoller {
    clipboard: Arc<dyn ClipboardPort>,
    clock: Arc<dyn Clock>,
    history: Arc<HistoryService>,
    settings: Arc<RwLock<Setting>>,
    state: Mutex<PollerState>,
}

impl ClipboardPoller {
    pub fn new(
        clipboard: Arc<dyn ClipboardPort>,
        clock: Arc<dyn Clock>,
        history: Arc<HistoryService>,
        settings: Arc<RwLock<Setting>>,
    ) -> Self {
        Self {
            clipboard,
            clock,
            history,
            settings,
            state: Mutex::new(PollerState {
                last_seen: None,
                last_accepted: None,
            }),
        }
    }

    /// Run one check; returns `true` when a new observation was recorded.
    pub async fn poll_once(&self) -> bool {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                // Not fatal: clipboard may be locked by another process
                warn!("Clipboard read failed: {}", e);
                return false;
            }
        };

        if text.trim().is_empty() {
            return false;
        }

        {
            let mut state = self.state.lock().unwrap();

            if state.last_seen.as_deref() == Some(text.as_str()) {
                return false;
            }

            let now = self.clock.now();
            let min_delay = self.settings.read().unwrap().min_delay();
            if let Some(last_accepted) = state.last_accepted {
                if now.duration_since(last_accepted) < min_delay {
                    debug!("Clipboard check debounced");
                    return false;
                }
            }

            state.last_seen = Some(text.clone());
            state.last_accepted = Some(now);
        }

        // Observations from the poller are stored with default options
        if self.history.add_entry(&text, AddOptions::default()).await.is_none() {
            warn!("Failed to record clipboard observation");
        }

        true
    }

    /// Force a check outside the timer, e.g. when the tray menu opens.
    pub async fn check_now(&self) -> bool {
        self.poll_once().await
    }

    /// Poll forever, sleeping the configured interval between ticks.
    ///
    /// The interval is re-read from settings every iteration so changes
    /// apply without a restart. Cancellation is dropping the task.
    pub async fn run(self: Arc<Self>) {
        loop {
            self.poll_once().await;
            let interval = self.settings.read().unwrap().check_interval();
            tokio::time::sleep(interval).await;
        }
    }
}
