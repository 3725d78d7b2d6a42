//! Persistence store for clipboard history.
//!
//! Single active writer over an embedded SQLite database. Deduplication is
//! by SHA-256 fingerprint of the captured text: re-adding identical content
//! touches the existing row's timestamp instead of inserting a duplicate.

use std::sync::{Arc, RwLock};

use log::info;

use crate::config::Setting;
use crate::error::{AppError, Result};
use crate::infrastructure::security;
use crate::infrastructure::storage::db::dao;
use crate::infrastructure::storage::db::models::category::{
    DbCategory, NewCategory, UpdateCategory, DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON,
};
use crate::infrastructure::storage::db::models::entry::{
    DbClipboardEntry, EntryWithCategories, NewClipboardEntry,
};
use crate::infrastructure::storage::db::pool::DbPool;
use crate::utils::helpers::{current_time_millis, sha256_hex};

/// Options for [`ClipboardStore::add_entry`].
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Encrypt the stored content with `password`
    pub encrypt: bool,
    pub password: Option<String>,
    /// Custom display name for the entry
    pub title: Option<String>,
}

/// Clipboard history store.
///
/// Owns the connection pool; every operation acquires a connection, runs its
/// statements and returns. Overlapping calls serialize on the store itself.
pub struct ClipboardStore {
    pool: DbPool,
    settings: Arc<RwLock<Setting>>,
}

impl ClipboardStore {
    pub fn new(pool: DbPool, settings: Arc<RwLock<Setting>>) -> Self {
        Self { pool, settings }
    }

    /// Add a clipboard snapshot, or touch the existing row on duplicate content.
    ///
    /// The fingerprint is computed over the captured text before encryption,
    /// so identical text always collapses to one row regardless of
    /// encryption options; the first stored form wins. When the insert
    /// pushes the total past the retention ceiling, the oldest non-favorite
    /// entries are evicted before returning.
    ///
    /// Returns the id of the inserted or touched entry.
    pub async fn add_entry(&self, content: &str, opts: AddOptions) -> Result<i32> {
        let content_hash = sha256_hex(content);
        let now = current_time_millis();

        let mut conn = self.pool.get()?;

        // Dedup by fingerprint: identical content only moves up in history
        if let Some(existing) = dao::entry::find_by_content_hash(&mut conn, &content_hash)? {
            dao::entry::touch_timestamp(&mut conn, existing.id, now)?;
            return Ok(existing.id);
        }

        let (db_content, is_encrypted, iv) = match (opts.encrypt, &opts.password) {
            (true, Some(password)) if !password.is_empty() => {
                let encrypted = security::encrypt_text(content, password)
                    .map_err(|e| AppError::encryption(e.to_string()))?;
                (encrypted.ciphertext, true, Some(encrypted.iv))
            }
            _ => (content.to_string(), false, None),
        };

        let custom_name = opts.title.filter(|t| !t.is_empty());

        let id = dao::entry::insert_entry(
            &mut conn,
            &NewClipboardEntry {
                content: db_content,
                content_hash,
                timestamp: now,
                is_favorite: false,
                custom_name,
                is_encrypted,
                iv,
                created_at: now,
            },
        )?;

        self.enforce_retention(&mut conn)?;

        Ok(id)
    }

    /// The `limit` most recently seen entries.
    pub async fn get_recent(&self, limit: i64) -> Result<Vec<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::query_entries(&mut conn, Some(limit))?)
    }

    /// All entries, newest first.
    pub async fn get_all(&self) -> Result<Vec<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::query_entries(&mut conn, None)?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::get_entry_by_id(&mut conn, id)?)
    }

    /// Total number of stored entries.
    pub async fn count(&self) -> Result<i64> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::get_entry_count(&mut conn)?)
    }

    /// Case-insensitive substring search over content and custom name.
    pub async fn search(&self, query: &str) -> Result<Vec<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::search_entries(&mut conn, query)?)
    }

    /// Entries last seen within `[start, end]` (epoch ms, inclusive).
    pub async fn get_by_date_range(&self, start: i64, end: i64) -> Result<Vec<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::query_entries_by_date_range(&mut conn, start, end)?)
    }

    /// Delete an entry by id.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut conn = self.pool.get()?;
        let deleted = dao::entry::delete_entry(&mut conn, id)?;
        if deleted == 0 {
            return Err(AppError::not_found(format!("No entry with id {}", id)));
        }
        Ok(())
    }

    /// Delete every entry, favorites included.
    pub async fn clear_all(&self) -> Result<usize> {
        let mut conn = self.pool.get()?;
        Ok(dao::entry::clear_all_entries(&mut conn)?)
    }

    /// Flip the favorite flag; returns the new state.
    pub async fn toggle_favorite(&self, id: i32) -> Result<bool> {
        let mut conn = self.pool.get()?;
        let entry = dao::entry::get_entry_by_id(&mut conn, id)?
            .ok_or_else(|| AppError::not_found(format!("No entry with id {}", id)))?;
        let new_state = !entry.is_favorite;
        dao::entry::set_favorite(&mut conn, id, new_state)?;
        Ok(new_state)
    }

    /// Set or clear an entry's custom name.
    pub async fn rename(&self, id: i32, custom_name: Option<&str>) -> Result<()> {
        let mut conn = self.pool.get()?;
        let name = custom_name.filter(|n| !n.is_empty());
        let updated = dao::entry::update_custom_name(&mut conn, id, name)?;
        if updated == 0 {
            return Err(AppError::not_found(format!("No entry with id {}", id)));
        }
        Ok(())
    }

    /// Decrypt an encrypted entry's content.
    ///
    /// The user password is tried first, then the master password when one
    /// is supplied. A wrong password surfaces as an `Encryption` error.
    pub async fn decrypt_entry(
        &self,
        id: i32,
        password: &str,
        master_password: Option<&str>,
    ) -> Result<String> {
        let entry = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No entry with id {}", id)))?;

        if !entry.is_encrypted {
            return Err(AppError::validation("Entry is not encrypted"));
        }
        let iv = entry
            .iv
            .as_deref()
            .ok_or_else(|| AppError::encryption("Encrypted entry has no initialization vector"))?;

        if let Ok(plaintext) = security::decrypt_text(&entry.content, iv, password) {
            return Ok(plaintext);
        }
        if let Some(master) = master_password {
            if let Ok(plaintext) = security::decrypt_text(&entry.content, iv, master) {
                return Ok(plaintext);
            }
        }

        Err(AppError::encryption("Invalid password or corrupt data"))
    }

    // ========== Categories ==========

    /// Create a category; color and icon fall back to the defaults.
    pub async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<i32> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }
        let mut conn = self.pool.get()?;
        let id = dao::category::insert_category(
            &mut conn,
            &NewCategory {
                name: name.to_string(),
                color: color.unwrap_or(DEFAULT_CATEGORY_COLOR).to_string(),
                icon: icon.unwrap_or(DEFAULT_CATEGORY_ICON).to_string(),
                created_at: current_time_millis(),
            },
        )?;
        Ok(id)
    }

    pub async fn get_categories(&self) -> Result<Vec<DbCategory>> {
        let mut conn = self.pool.get()?;
        Ok(dao::category::get_all_categories(&mut conn)?)
    }

    pub async fn update_category(
        &self,
        id: i32,
        name: &str,
        color: &str,
        icon: &str,
    ) -> Result<()> {
        let mut conn = self.pool.get()?;
        let updated = dao::category::update_category(
            &mut conn,
            id,
            &UpdateCategory {
                name: name.to_string(),
                color: color.to_string(),
                icon: icon.to_string(),
            },
        )?;
        if updated == 0 {
            return Err(AppError::not_found(format!("No category with id {}", id)));
        }
        Ok(())
    }

    /// Delete a category. Links cascade; the linked entries stay.
    pub async fn delete_category(&self, id: i32) -> Result<()> {
        let mut conn = self.pool.get()?;
        let deleted = dao::category::delete_category(&mut conn, id)?;
        if deleted == 0 {
            return Err(AppError::not_found(format!("No category with id {}", id)));
        }
        Ok(())
    }

    /// Link an entry to a category (idempotent).
    pub async fn assign_category(&self, entry_id: i32, category_id: i32) -> Result<()> {
        let mut conn = self.pool.get()?;
        Ok(dao::category::assign_category(&mut conn, entry_id, category_id)?)
    }

    /// Remove a link between an entry and a category.
    pub async fn unassign_category(&self, entry_id: i32, category_id: i32) -> Result<()> {
        let mut conn = self.pool.get()?;
        dao::category::unassign_category(&mut conn, entry_id, category_id)?;
        Ok(())
    }

    pub async fn get_categories_for_entry(&self, entry_id: i32) -> Result<Vec<DbCategory>> {
        let mut conn = self.pool.get()?;
        Ok(dao::category::get_categories_for_entry(&mut conn, entry_id)?)
    }

    pub async fn get_entries_for_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<DbClipboardEntry>> {
        let mut conn = self.pool.get()?;
        Ok(dao::category::get_entries_for_category(&mut conn, category_id)?)
    }

    /// All entries joined with their categories, newest first.
    pub async fn get_entries_with_categories(&self) -> Result<Vec<EntryWithCategories>> {
        let mut conn = self.pool.get()?;
        let entries = dao::entry::query_entries(&mut conn, None)?;
        let pairs = dao::category::get_entry_category_pairs(&mut conn)?;

        let mut by_entry: std::collections::HashMap<i32, Vec<DbCategory>> =
            std::collections::HashMap::new();
        for (entry_id, category) in pairs {
            by_entry.entry(entry_id).or_default().push(category);
        }

        Ok(entries
            .into_iter()
            .map(|entry| {
                let categories = by_entry.remove(&entry.id).unwrap_or_default();
                EntryWithCategories { entry, categories }
            })
            .collect())
    }

    // ========== Retention ==========

    /// Evict the oldest non-favorite entries until the count is back at the
    /// configured ceiling. Favorites are never auto-evicted, so the count
    /// can stay above the ceiling when everything old is a favorite.
    fn enforce_retention(&self, conn: &mut diesel::sqlite::SqliteConnection) -> Result<()> {
        let max_entries = self.settings.read().unwrap().max_entries as i64;
        let count = dao::entry::get_entry_count(conn)?;

        if count <= max_entries {
            return Ok(());
        }

        let to_delete = count - max_entries;
        let ids = dao::entry::oldest_non_favorite_ids(conn, to_delete)?;
        if ids.is_empty() {
            return Ok(());
        }

        let deleted = dao::entry::delete_entries_by_ids(conn, &ids)?;
        info!("Evicted {} old clipboard entries", deleted);

        Ok(())
    }
}
