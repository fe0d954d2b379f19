//! The storage seam between request handling and SQLite.
//!
//! Handlers talk to an `Arc<dyn ItemStore>`; [`SqliteItemStore`] is the
//! production implementation over the r2d2 pool. Methods are blocking and
//! are expected to be called from `spawn_blocking`.

use catalog_core::{ItemDraft, ItemId, Result};

use crate::models::{Item, ItemSummary};
use crate::pool::{get_conn, DbPool};
use crate::queries::items;

/// Persistence operations over items.
pub trait ItemStore: Send + Sync {
    /// Every item, in insertion order.
    fn list(&self) -> Result<Vec<Item>>;

    /// Persist a new item and return it with its assigned id.
    fn create(&self, draft: &ItemDraft) -> Result<Item>;

    fn get(&self, id: ItemId) -> Result<Option<Item>>;

    /// Replace an item wholesale. `None` if the id does not exist.
    fn update(&self, id: ItemId, draft: &ItemDraft) -> Result<Option<Item>>;

    /// Remove an item, returning its name. `None` if the id does not exist.
    fn delete(&self, id: ItemId) -> Result<Option<String>>;

    /// Name substring search.
    fn search(&self, keyword: &str) -> Result<Vec<ItemSummary>>;
}

/// [`ItemStore`] backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteItemStore {
    pool: DbPool,
}

impl SqliteItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ItemStore for SqliteItemStore {
    fn list(&self) -> Result<Vec<Item>> {
        let conn = get_conn(&self.pool)?;
        items::list_items(&conn)
    }

    fn create(&self, draft: &ItemDraft) -> Result<Item> {
        let conn = get_conn(&self.pool)?;
        items::create_item(&conn, draft)
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>> {
        let conn = get_conn(&self.pool)?;
        items::get_item(&conn, id)
    }

    fn update(&self, id: ItemId, draft: &ItemDraft) -> Result<Option<Item>> {
        let conn = get_conn(&self.pool)?;
        items::update_item(&conn, id, draft)
    }

    fn delete(&self, id: ItemId) -> Result<Option<String>> {
        let conn = get_conn(&self.pool)?;
        items::delete_item(&conn, id)
    }

    fn search(&self, keyword: &str) -> Result<Vec<ItemSummary>> {
        let conn = get_conn(&self.pool)?;
        items::search_items(&conn, keyword)
    }
}
