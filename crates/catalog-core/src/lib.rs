//! catalog-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for all other catalog-* crates,
//! providing the typed item identifier, a unified error type, the item
//! domain types with their field validation, and application configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod item;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use item::{ItemDraft, ItemForm, ItemImage, ItemInput};
