use crate::infrastructure::storage::db::models::entry::{DbClipboardEntry, NewClipboardEntry};
use crate::infrastructure::storage::db::schema::clipboard_entries;
use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Insert a clipboard entry and return its generated id.
pub fn insert_entry(conn: &mut SqliteConnection, entry: &NewClipboardEntry) -> Result<i32> {
    let id = diesel::insert_into(clipboard_entries::table)
        .values(entry)
        .returning(clipboard_entries::id)
        .get_result(conn)
        .context("Failed to insert clipboard entry")?;
    Ok(id)
}

/// Look up an entry by its content fingerprint.
pub fn find_by_content_hash(
    conn: &mut SqliteConnection,
    content_hash: &str,
) -> Result<Option<DbClipboardEntry>> {
    let entry = clipboard_entries::table
        .filter(clipboard_entries::content_hash.eq(content_hash))
        .select(DbClipboardEntry::as_select())
        .first(conn)
        .optional()
        .context("Failed to query clipboard entry by content hash")?;
    Ok(entry)
}

/// Bump the last-seen timestamp of an existing entry.
pub fn touch_timestamp(conn: &mut SqliteConnection, id: i32, timestamp: i64) -> Result<()> {
    diesel::update(clipboard_entries::table.find(id))
        .set(clipboard_entries::timestamp.eq(timestamp))
        .execute(conn)
        .context("Failed to update clipboard entry timestamp")?;
    Ok(())
}

/// Query entries newest-first, optionally limited.
pub fn query_entries(
    conn: &mut SqliteConnection,
    limit: Option<i64>,
) -> Result<Vec<DbClipboardEntry>> {
    let mut query = clipboard_entries::table
        .order(clipboard_entries::timestamp.desc())
        .into_boxed();

    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let entries = query
        .select(DbClipboardEntry::as_select())
        .load(conn)
        .context("Failed to query clipboard entries")?;
    Ok(entries)
}

/// Query a single entry by id.
pub fn get_entry_by_id(conn: &mut SqliteConnection, id: i32) -> Result<Option<DbClipboardEntry>> {
    let entry = clipboard_entries::table
        .find(id)
        .select(DbClipboardEntry::as_select())
        .first(conn)
        .optional()
        .context("Failed to get clipboard entry by id")?;
    Ok(entry)
}

/// Case-insensitive substring search over content and custom name.
pub fn search_entries(conn: &mut SqliteConnection, query: &str) -> Result<Vec<DbClipboardEntry>> {
    let pattern = format!("%{}%", query);
    let entries = clipboard_entries::table
        .filter(
            clipboard_entries::content
                .like(pattern.clone())
                .or(clipboard_entries::custom_name.like(pattern)),
        )
        .order(clipboard_entries::timestamp.desc())
        .select(DbClipboardEntry::as_select())
        .load(conn)
        .context("Failed to search clipboard entries")?;
    Ok(entries)
}

/// Query entries whose last-seen time falls within [start, end], newest first.
pub fn query_entries_by_date_range(
    conn: &mut SqliteConnection,
    start: i64,
    end: i64,
) -> Result<Vec<DbClipboardEntry>> {
    let entries = clipboard_entries::table
        .filter(clipboard_entries::timestamp.ge(start))
        .filter(clipboard_entries::timestamp.le(end))
        .order(clipboard_entries::timestamp.desc())
        .select(DbClipboardEntry::as_select())
        .load(conn)
        .context("Failed to query clipboard entries by date range")?;
    Ok(entries)
}

/// Delete an entry; returns the number of rows removed.
pub fn delete_entry(conn: &mut SqliteConnection, id: i32) -> Result<usize> {
    let count = diesel::delete(clipboard_entries::table.find(id))
        .execute(conn)
        .context("Failed to delete clipboard entry")?;
    Ok(count)
}

/// Delete all entries.
pub fn clear_all_entries(conn: &mut SqliteConnection) -> Result<usize> {
    let count = diesel::delete(clipboard_entries::table)
        .execute(conn)
        .context("Failed to clear clipboard entries")?;
    Ok(count)
}

/// Total number of stored entries.
pub fn get_entry_count(conn: &mut SqliteConnection) -> Result<i64> {
    let count = clipboard_entries::table
        .count()
        .get_result(conn)
        .context("Failed to get clipboard entry count")?;
    Ok(count)
}

/// Set the favorite flag of an entry.
pub fn set_favorite(conn: &mut SqliteConnection, id: i32, is_favorite: bool) -> Result<usize> {
    let count = diesel::update(clipboard_entries::table.find(id))
        .set(clipboard_entries::is_favorite.eq(is_favorite))
        .execute(conn)
        .context("Failed to update favorite flag")?;
    Ok(count)
}

/// Set or clear the custom name of an entry.
pub fn update_custom_name(
    conn: &mut SqliteConnection,
    id: i32,
    custom_name: Option<&str>,
) -> Result<usize> {
    let count = diesel::update(clipboard_entries::table.find(id))
        .set(clipboard_entries::custom_name.eq(custom_name))
        .execute(conn)
        .context("Failed to update custom name")?;
    Ok(count)
}

/// Ids of the `limit` oldest entries that are not favorites.
///
/// Eviction candidates: favorites are never auto-evicted.
pub fn oldest_non_favorite_ids(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<i32>> {
    let ids = clipboard_entries::table
        .filter(clipboard_entries::is_favorite.eq(false))
        .order(clipboard_entries::timestamp.asc())
        .limit(limit)
        .select(clipboard_entries::id)
        .load(conn)
        .context("Failed to query eviction candidates")?;
    Ok(ids)
}

/// Delete the entries with the given ids; returns the number removed.
pub fn delete_entries_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> Result<usize> {
    let count = diesel::delete(
        clipboard_entries::table.filter(clipboard_entries::id.eq_any(ids.iter().copied())),
    )
    .execute(conn)
    .context("Failed to delete clipboard entries")?;
    Ok(count)
}
