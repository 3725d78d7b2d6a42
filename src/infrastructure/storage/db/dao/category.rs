use crate::infrastructure::storage::db::models::category::{
    DbCategory, DbEntryCategory, NewCategory, UpdateCategory,
};
use crate::infrastructure::storage::db::models::entry::DbClipboardEntry;
use crate::infrastructure::storage::db::schema::{categories, clipboard_entries, entry_categories};
use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Insert a category and return its generated id.
pub fn insert_category(conn: &mut SqliteConnection, category: &NewCategory) -> Result<i32> {
    let id = diesel::insert_into(categories::table)
        .values(category)
        .returning(categories::id)
        .get_result(conn)
        .context("Failed to insert category")?;
    Ok(id)
}

/// All categories, ordered by name.
pub fn get_all_categories(conn: &mut SqliteConnection) -> Result<Vec<DbCategory>> {
    let result = categories::table
        .order(categories::name.asc())
        .select(DbCategory::as_select())
        .load(conn)
        .context("Failed to query categories")?;
    Ok(result)
}

/// Query a single category by id.
pub fn get_category_by_id(conn: &mut SqliteConnection, id: i32) -> Result<Option<DbCategory>> {
    let category = categories::table
        .find(id)
        .select(DbCategory::as_select())
        .first(conn)
        .optional()
        .context("Failed to get category by id")?;
    Ok(category)
}

/// Update a category's name, color and icon.
pub fn update_category(
    conn: &mut SqliteConnection,
    id: i32,
    update: &UpdateCategory,
) -> Result<usize> {
    let count = diesel::update(categories::table.find(id))
        .set(update)
        .execute(conn)
        .context("Failed to update category")?;
    Ok(count)
}

/// Delete a category; its entry links cascade away with it.
pub fn delete_category(conn: &mut SqliteConnection, id: i32) -> Result<usize> {
    let count = diesel::delete(categories::table.find(id))
        .execute(conn)
        .context("Failed to delete category")?;
    Ok(count)
}

/// Link an entry to a category. Idempotent: an existing link is kept as-is.
pub fn assign_category(conn: &mut SqliteConnection, entry_id: i32, category_id: i32) -> Result<()> {
    diesel::insert_into(entry_categories::table)
        .values(&DbEntryCategory {
            entry_id,
            category_id,
        })
        .on_conflict_do_nothing()
        .execute(conn)
        .context("Failed to assign category to entry")?;
    Ok(())
}

/// Remove the link between an entry and a category.
pub fn unassign_category(
    conn: &mut SqliteConnection,
    entry_id: i32,
    category_id: i32,
) -> Result<usize> {
    let count = diesel::delete(
        entry_categories::table
            .filter(entry_categories::entry_id.eq(entry_id))
            .filter(entry_categories::category_id.eq(category_id)),
    )
    .execute(conn)
    .context("Failed to unassign category from entry")?;
    Ok(count)
}

/// Categories assigned to one entry.
pub fn get_categories_for_entry(
    conn: &mut SqliteConnection,
    entry_id: i32,
) -> Result<Vec<DbCategory>> {
    let result = entry_categories::table
        .inner_join(categories::table)
        .filter(entry_categories::entry_id.eq(entry_id))
        .select(DbCategory::as_select())
        .load(conn)
        .context("Failed to query categories for entry")?;
    Ok(result)
}

/// Entries linked to one category, newest first.
pub fn get_entries_for_category(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> Result<Vec<DbClipboardEntry>> {
    let result = entry_categories::table
        .inner_join(clipboard_entries::table)
        .filter(entry_categories::category_id.eq(category_id))
        .order(clipboard_entries::timestamp.desc())
        .select(DbClipboardEntry::as_select())
        .load(conn)
        .context("Failed to query entries for category")?;
    Ok(result)
}

/// All (entry_id, category) pairs, for building the entries-with-categories view.
pub fn get_entry_category_pairs(conn: &mut SqliteConnection) -> Result<Vec<(i32, DbCategory)>> {
    let result = entry_categories::table
        .inner_join(categories::table)
        .select((entry_categories::entry_id, DbCategory::as_select()))
        .load(conn)
        .context("Failed to query entry/category pairs")?;
    Ok(result)
}
