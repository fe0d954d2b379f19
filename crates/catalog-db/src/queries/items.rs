//! Item CRUD, list, and search operations.

use catalog_core::{Error, ItemDraft, ItemId, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::models::{Item, ItemSummary};

/// Column list used in SELECT statements.
const COLS: &str = "id, name, description, price, mime, raw_data, created_at, updated_at";

/// List every item in insertion order.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let q = format!("SELECT {COLS} FROM items ORDER BY rowid ASC");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Item::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Create a new item from a validated draft.
pub fn create_item(conn: &Connection, draft: &ItemDraft) -> Result<Item> {
    let id = ItemId::new();
    let now = Utc::now().to_rfc3339();
    let (mime, raw_data) = image_columns(draft);

    conn.execute(
        "INSERT INTO items (id, name, description, price, mime, raw_data, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            id.to_string(),
            draft.name,
            draft.description,
            draft.price,
            mime,
            raw_data,
            &now,
            &now,
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Item {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        image: draft.image.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Get an item by ID.
pub fn get_item(conn: &Connection, id: ItemId) -> Result<Option<Item>> {
    let q = format!("SELECT {COLS} FROM items WHERE id = ?1");
    let result = conn.query_row(&q, [id.to_string()], Item::from_row);
    match result {
        Ok(i) => Ok(Some(i)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Replace every mutable field of an item in a single statement.
///
/// A draft without an image clears the stored image. Returns the updated
/// row, or `None` if no item has this ID.
pub fn update_item(conn: &Connection, id: ItemId, draft: &ItemDraft) -> Result<Option<Item>> {
    let now = Utc::now().to_rfc3339();
    let (mime, raw_data) = image_columns(draft);

    let q = format!(
        "UPDATE items SET name = ?1, description = ?2, price = ?3,
            mime = ?4, raw_data = ?5, updated_at = ?6
         WHERE id = ?7
         RETURNING {COLS}"
    );
    let result = conn.query_row(
        &q,
        rusqlite::params![
            draft.name,
            draft.description,
            draft.price,
            mime,
            raw_data,
            now,
            id.to_string(),
        ],
        Item::from_row,
    );
    match result {
        Ok(i) => Ok(Some(i)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Delete an item by ID, returning the deleted item's name.
pub fn delete_item(conn: &Connection, id: ItemId) -> Result<Option<String>> {
    let result = conn.query_row(
        "DELETE FROM items WHERE id = ?1 RETURNING name",
        [id.to_string()],
        |row| row.get(0),
    );
    match result {
        Ok(name) => Ok(Some(name)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Search items whose name contains `keyword` (LIKE '%keyword%').
///
/// LIKE wildcards in the keyword match literally. Matching follows SQLite's
/// default LIKE rules, so it is case-insensitive for ASCII only.
pub fn search_items(conn: &Connection, keyword: &str) -> Result<Vec<ItemSummary>> {
    let pattern = format!("%{}%", escape_like(keyword));
    let mut stmt = conn
        .prepare(
            "SELECT id, name, price FROM items
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY rowid ASC",
        )
        .map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([pattern], ItemSummary::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Count all items.
pub fn count_items(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

fn image_columns(draft: &ItemDraft) -> (Option<&str>, Option<&[u8]>) {
    match &draft.image {
        Some(img) => (Some(img.mime.as_str()), Some(img.data.as_slice())),
        None => (None, None),
    }
}

fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
