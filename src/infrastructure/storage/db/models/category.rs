use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Default badge color for new categories.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";
/// Default icon name for new categories.
pub const DEFAULT_CATEGORY_ICON: &str = "Label";

#[derive(Queryable, Selectable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbCategory {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: i64,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: i64,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::categories)]
pub struct UpdateCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Many-to-many link between an entry and a category.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::entry_categories)]
pub struct DbEntryCategory {
    pub entry_id: i32,
    pub category_id: i32,
}
