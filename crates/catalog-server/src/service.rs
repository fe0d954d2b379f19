//! Item use cases on top of an [`ItemStore`].
//!
//! [`ItemService`] orders the steps of each request: resolve the id, validate
//! scalar fields, ingest the image, then write. Store calls and image
//! decoding run on the blocking pool.

use std::sync::Arc;

use catalog_core::{Error, ItemDraft, ItemForm, ItemId, Result};
use catalog_db::{Item, ItemStore, ItemSummary};

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.blocking(|store| store.list()).await
    }

    pub async fn create(&self, form: ItemForm) -> Result<Item> {
        let item = self
            .blocking(move |store| {
                let draft = prepare(&form)?;
                store.create(&draft)
            })
            .await?;

        tracing::info!(id = %item.id, name = %item.name, mime = ?item.mime(), "Item created");
        Ok(item)
    }

    pub async fn get(&self, id: ItemId) -> Result<Item> {
        self.blocking(move |store| store.get(id))
            .await?
            .ok_or_else(|| Error::not_found("item", id))
    }

    /// Replace an item. An unknown id is reported before the body is
    /// validated.
    pub async fn update(&self, id: ItemId, form: ItemForm) -> Result<Item> {
        let item = self
            .blocking(move |store| {
                if store.get(id)?.is_none() {
                    return Err(Error::not_found("item", id));
                }
                let draft = prepare(&form)?;
                store
                    .update(id, &draft)?
                    .ok_or_else(|| Error::not_found("item", id))
            })
            .await?;

        tracing::info!(id = %item.id, name = %item.name, mime = ?item.mime(), "Item updated");
        Ok(item)
    }

    /// Delete an item and return its name.
    pub async fn delete(&self, id: ItemId) -> Result<String> {
        let name = self
            .blocking(move |store| store.delete(id))
            .await?
            .ok_or_else(|| Error::not_found("item", id))?;

        tracing::info!(%id, %name, "Item deleted");
        Ok(name)
    }

    pub async fn search(&self, keyword: String) -> Result<Vec<ItemSummary>> {
        self.blocking(move |store| store.search(&keyword)).await
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn ItemStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| Error::Internal(format!("blocking task failed: {e}")))?
    }
}

/// Validate the form and ingest its image, if any, into a draft.
///
/// Scalar validation runs first; the image is only looked at once the
/// scalar fields pass.
fn prepare(form: &ItemForm) -> Result<ItemDraft> {
    let mut input = form.validate()?;

    let image = match input.img.take() {
        Some(payload) => Some(catalog_image::ingest(&payload)?.into_item_image()),
        None => None,
    };

    Ok(input.into_draft(image))
}
