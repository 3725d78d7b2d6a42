use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::category::DbCategory;

/// One stored clipboard snapshot plus its metadata.
///
/// `content` holds plaintext, or base64 ciphertext when `is_encrypted` is
/// set (`iv` then carries the hex-encoded nonce). `content_hash` is the
/// SHA-256 fingerprint of the captured text and is unique per row.
#[derive(Queryable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clipboard_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbClipboardEntry {
    pub id: i32,
    pub content: String,
    pub content_hash: String,
    /// Last-seen time (epoch ms); touched when identical content reappears
    pub timestamp: i64,
    pub is_favorite: bool,
    pub custom_name: Option<String>,
    pub is_encrypted: bool,
    pub iv: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clipboard_entries)]
pub struct NewClipboardEntry {
    pub content: String,
    pub content_hash: String,
    pub timestamp: i64,
    pub is_favorite: bool,
    pub custom_name: Option<String>,
    pub is_encrypted: bool,
    pub iv: Option<String>,
    pub created_at: i64,
}

/// Entry joined with its assigned categories, for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryWithCategories {
    #[serde(flatten)]
    pub entry: DbClipboardEntry,
    pub categories: Vec<DbCategory>,
}
