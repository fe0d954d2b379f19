//! catalog-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, typed row models, the item queries, and the
//! [`ItemStore`](store::ItemStore) abstraction the server depends on.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;

pub use models::{Item, ItemSummary};
pub use pool::{DbPool, PooledConnection};
pub use store::{ItemStore, SqliteItemStore};
