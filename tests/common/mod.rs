//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use clipkeeper::config::Setting;
use clipkeeper::core::AppContext;
use clipkeeper::error::Result;
use clipkeeper::infrastructure::clipboard::ClipboardPort;

/// Clipboard double: readable/writable text behind a mutex.
pub struct FakeClipboard {
    text: Mutex<String>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self {
            text: Mutex::new(String::new()),
        }
    }

    pub fn set(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    pub fn current(&self) -> String {
        self.text.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardPort for FakeClipboard {
    async fn read_text(&self) -> Result<String> {
        Ok(self.current())
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        self.set(text);
        Ok(())
    }
}

/// Build a context over a temp-file database with a fake clipboard.
///
/// The TempDir must stay alive for the duration of the test.
pub fn test_context(setting: Setting) -> (AppContext, Arc<FakeClipboard>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("clipboard.db");
    let clipboard = Arc::new(FakeClipboard::new());

    let context = AppContext::with_clipboard(
        setting,
        &db_path.to_string_lossy(),
        clipboard.clone(),
    )
    .expect("Failed to initialize test context");

    (context, clipboard, temp_dir)
}
