use crate::error::{AppError, Result};
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};
use std::time::Instant;

/// Text access to the OS clipboard.
///
/// The poller and the command surface only talk to this trait; tests inject
/// fakes instead of touching the real clipboard.
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    async fn read_text(&self) -> Result<String>;
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// `clipboard-rs` backed implementation.
///
/// A context is created per call: the platform handles inside
/// `ClipboardContext` are not shareable across threads.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn read_text(&self) -> Result<String> {
        let ctx = ClipboardContext::new()
            .map_err(|e| AppError::clipboard(format!("Failed to open clipboard: {}", e)))?;
        ctx.get_text()
            .map_err(|e| AppError::clipboard(format!("Failed to read clipboard text: {}", e)))
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let ctx = ClipboardContext::new()
            .map_err(|e| AppError::clipboard(format!("Failed to open clipboard: {}", e)))?;
        ctx.set_text(text.to_string())
            .map_err(|e| AppError::clipboard(format!("Failed to write clipboard text: {}", e)))
    }
}

/// Monotonic clock dependency of the poller, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
