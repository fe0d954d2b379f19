//! Application context shared by all route handlers via Axum state.

use std::sync::Arc;

use catalog_core::config::Config;
use catalog_db::ItemStore;

use crate::service::ItemService;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Item use cases over the configured store.
    pub items: ItemService,
}

impl AppContext {
    pub fn new(store: Arc<dyn ItemStore>, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            items: ItemService::new(store),
        }
    }
}
