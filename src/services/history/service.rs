//! Command/query surface consumed by the presentation shells.
//!
//! Thin request/response layer over the store: input shaping (page-size
//! clamping, defaulted category colors), a short-lived read cache, and a
//! data-changed notification on every mutating call. Store-level errors
//! never cross this boundary: each operation degrades to an
//! empty/false/None result and logs the failure. Decryption is the one
//! exception — its failure is the result the caller asked about.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{error, warn};

use crate::config::{Setting, SettingPatch, ThemeMode};
use crate::core::event_bus::{DataChangedEvent, EventBus, ThemeChangedEvent};
use crate::error::{AppError, Result};
use crate::infrastructure::clipboard::port::ClipboardPort;
use crate::infrastructure::storage::db::models::category::DbCategory;
use crate::infrastructure::storage::db::models::entry::{DbClipboardEntry, EntryWithCategories};
use crate::infrastructure::storage::{AddOptions, ClipboardStore};
use crate::services::history::cache::QueryCache;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;
const CACHE_TTL: Duration = Duration::from_secs(5);

/// Request/response facade over the clipboard store.
///
/// Holds the store as an `Option` so shells issuing calls before
/// initialization completes get empty results instead of hard failures.
pub struct HistoryService {
    store: Option<Arc<ClipboardStore>>,
    clipboard: Arc<dyn ClipboardPort>,
    event_bus: Arc<EventBus>,
    settings: Arc<RwLock<Setting>>,
    cache: QueryCache,
}

impl HistoryService {
    pub fn new(
        store: Option<Arc<ClipboardStore>>,
        clipboard: Arc<dyn ClipboardPort>,
        event_bus: Arc<EventBus>,
        settings: Arc<RwLock<Setting>>,
    ) -> Self {
        Self {
            store,
            clipboard,
            event_bus,
            settings,
            cache: QueryCache::new(CACHE_TTL),
        }
    }

    fn store(&self) -> Option<&Arc<ClipboardStore>> {
        if self.store.is_none() {
            warn!("History store not initialized; degrading to empty result");
        }
        self.store.as_ref()
    }

    fn notify_data_changed(&self) {
        self.cache.invalidate();
        self.event_bus.publish(DataChangedEvent::now());
    }

    // ========== Entry commands ==========

    /// Add a clipboard snapshot; returns the entry id, or `None` on failure.
    pub async fn add_entry(&self, content: &str, opts: AddOptions) -> Option<i32> {
        let store = self.store()?;
        match store.add_entry(content, opts).await {
            Ok(id) => {
                self.notify_data_changed();
                Some(id)
            }
            Err(e) => {
                error!("Failed to add clipboard entry: {}", e);
                None
            }
        }
    }

    pub async fn delete_entry(&self, id: i32) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.delete(id).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!("Failed to delete entry {}: {}", id, e);
                false
            }
        }
    }

    pub async fn clear_all_entries(&self) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.clear_all().await {
            Ok(_) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!("Failed to clear clipboard history: {}", e);
                false
            }
        }
    }

    /// Flip an entry's favorite flag; returns the new state.
    pub async fn toggle_favorite(&self, id: i32) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.toggle_favorite(id).await {
            Ok(new_state) => {
                self.notify_data_changed();
                new_state
            }
            Err(e) => {
                error!("Failed to toggle favorite on entry {}: {}", id, e);
                false
            }
        }
    }

    /// Set or clear an entry's custom name.
    pub async fn rename_entry(&self, id: i32, name: Option<&str>) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.rename(id, name).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!("Failed to rename entry {}: {}", id, e);
                false
            }
        }
    }

    /// Copy an entry's stored content back onto the OS clipboard.
    ///
    /// Encrypted entries are copied as stored; decryption is an explicit,
    /// separate request.
    pub async fn copy_entry(&self, id: i32) -> bool {
        let Some(entry) = self.get_entry(id).await else {
            return false;
        };
        match self.clipboard.write_text(&entry.content).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to copy entry {} to clipboard: {}", id, e);
                false
            }
        }
    }

    /// Decrypt an encrypted entry, trying the master password second.
    ///
    /// Returns a structured error on a wrong password rather than degrading:
    /// the caller needs to distinguish failure from empty content.
    pub async fn decrypt_entry(
        &self,
        id: i32,
        password: &str,
        master_password: Option<&str>,
    ) -> Result<String> {
        let store = self
            .store()
            .ok_or_else(|| AppError::storage("History store not initialized"))?;
        store.decrypt_entry(id, password, master_password).await
    }

    // ========== Entry queries ==========

    pub async fn get_entry(&self, id: i32) -> Option<DbClipboardEntry> {
        let store = self.store()?;
        match store.get_by_id(id).await {
            Ok(entry) => entry,
            Err(e) => {
                error!("Failed to get entry {}: {}", id, e);
                None
            }
        }
    }

    pub async fn get_all_entries(&self) -> Vec<DbClipboardEntry> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_all().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to get entries: {}", e);
                Vec::new()
            }
        }
    }

    /// Most recent entries; the requested page size is clamped.
    pub async fn get_recent_entries(&self, limit: Option<i64>) -> Vec<DbClipboardEntry> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        match store.get_recent(limit).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to get recent entries: {}", e);
                Vec::new()
            }
        }
    }

    /// Case-insensitive substring search over content and custom names.
    pub async fn search_entries(&self, query: &str) -> Vec<DbClipboardEntry> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.search(query).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to search entries: {}", e);
                Vec::new()
            }
        }
    }

    /// Entries last seen within `[start, end]` (epoch ms, inclusive).
    pub async fn get_entries_by_date_range(&self, start: i64, end: i64) -> Vec<DbClipboardEntry> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_by_date_range(start, end).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to get entries by date range: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_count(&self) -> i64 {
        let Some(store) = self.store() else {
            return 0;
        };
        match store.count().await {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to get entry count: {}", e);
                0
            }
        }
    }

    /// All entries with their categories, served from the read cache when
    /// fresh.
    pub async fn get_entries_with_categories(&self) -> Vec<EntryWithCategories> {
        if let Some(cached) = self.cache.get() {
            return cached;
        }
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_entries_with_categories().await {
            Ok(entries) => {
                self.cache.put(entries.clone());
                entries
            }
            Err(e) => {
                error!("Failed to get entries with categories: {}", e);
                Vec::new()
            }
        }
    }

    // ========== Categories ==========

    /// Create a category; omitted color/icon fall back to defaults.
    pub async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Option<i32> {
        let store = self.store()?;
        match store.create_category(name, color, icon).await {
            Ok(id) => {
                self.notify_data_changed();
                Some(id)
            }
            Err(e) => {
                error!("Failed to create category: {}", e);
                None
            }
        }
    }

    pub async fn get_categories(&self) -> Vec<DbCategory> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!("Failed to get categories: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn update_category(&self, id: i32, name: &str, color: &str, icon: &str) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.update_category(id, name, color, icon).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!("Failed to update category {}: {}", id, e);
                false
            }
        }
    }

    /// Delete a category; its entry links go with it, the entries stay.
    pub async fn delete_category(&self, id: i32) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.delete_category(id).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!("Failed to delete category {}: {}", id, e);
                false
            }
        }
    }

    pub async fn assign_category(&self, entry_id: i32, category_id: i32) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.assign_category(entry_id, category_id).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!(
                    "Failed to assign category {} to entry {}: {}",
                    category_id, entry_id, e
                );
                false
            }
        }
    }

    pub async fn unassign_category(&self, entry_id: i32, category_id: i32) -> bool {
        let Some(store) = self.store() else {
            return false;
        };
        match store.unassign_category(entry_id, category_id).await {
            Ok(()) => {
                self.notify_data_changed();
                true
            }
            Err(e) => {
                error!(
                    "Failed to unassign category {} from entry {}: {}",
                    category_id, entry_id, e
                );
                false
            }
        }
    }

    pub async fn get_entry_categories(&self, entry_id: i32) -> Vec<DbCategory> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_categories_for_entry(entry_id).await {
            Ok(categories) => categories,
            Err(e) => {
                error!("Failed to get categories for entry {}: {}", entry_id, e);
                Vec::new()
            }
        }
    }

    pub async fn get_entries_by_category(&self, category_id: i32) -> Vec<DbClipboardEntry> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        match store.get_entries_for_category(category_id).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to get entries for category {}: {}", category_id, e);
                Vec::new()
            }
        }
    }

    // ========== Settings / theme ==========

    pub fn get_settings(&self) -> Setting {
        self.settings.read().unwrap().clone()
    }

    /// Apply a settings patch (values clamped into range) and persist it.
    pub fn update_settings(&self, patch: SettingPatch) -> bool {
        let updated = {
            let mut settings = self.settings.write().unwrap();
            settings.apply(patch);
            settings.clone()
        };
        if let Err(e) = updated.save(None) {
            error!("Failed to persist settings: {}", e);
            return false;
        }
        true
    }

    pub fn get_theme_mode(&self) -> ThemeMode {
        self.settings.read().unwrap().theme_mode
    }

    /// Switch the theme, persist it, and notify every shell.
    pub fn set_theme_mode(&self, mode: ThemeMode) -> bool {
        let updated = {
            let mut settings = self.settings.write().unwrap();
            settings.theme_mode = mode;
            settings.clone()
        };
        if let Err(e) = updated.save(None) {
            error!("Failed to persist theme mode: {}", e);
            return false;
        }
        self.event_bus.publish(ThemeChangedEvent { mode });
        true
    }
}
