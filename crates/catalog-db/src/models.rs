//! Rust structs mapping to database rows.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use catalog_core::{ItemId, ItemImage};
use serde::Serialize;
use uuid::Uuid;

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(T::from(uuid))
}

/// A stored catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: Option<ItemImage>,
    pub created_at: String,
    pub updated_at: String,
}

impl Item {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let mime: Option<String> = row.get(4)?;
        let raw_data: Option<Vec<u8>> = row.get(5)?;
        let image = match (mime, raw_data) {
            (Some(mime), Some(data)) => Some(ItemImage { mime, data }),
            _ => None,
        };

        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            image,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    /// MIME type of the stored image, if any.
    pub fn mime(&self) -> Option<&str> {
        self.image.as_ref().map(|img| img.mime.as_str())
    }
}

/// Search hit: identifier, name, and price only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ItemSummary {
    #[schema(value_type = String)]
    pub id: ItemId,
    pub name: String,
    pub price: i64,
}

impl ItemSummary {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }
}
