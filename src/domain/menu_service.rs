//! Menu catalog service.
//!
//! Owns the canonical [`MenuItem`] collection, mirrored write-through to
//! the `menuItems` document collection: the local cache only changes after
//! the corresponding remote write has been acknowledged. Persistence is
//! per-document (add/replace/delete), so a single edit never rewrites the
//! whole collection.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{info, warn};
use rust_decimal::Decimal;

use crate::domain::errors::{CatalogError, ValidationError};
use crate::domain::models::menu_item::{default_menu_items, MenuItem, MenuItemDraft};
use crate::storage::traits::{DocumentStore, RemoteError};

pub const MENU_ITEMS_COLLECTION: &str = "menuItems";

pub struct MenuService {
    store: Arc<dyn DocumentStore>,
    items: Vec<MenuItem>,
}

impl MenuService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
        }
    }

    /// Replaces the local cache with the remote collection. When the remote
    /// collection is empty, seeds the default catalog and persists it
    /// immediately.
    pub async fn load(&mut self) -> Result<usize, CatalogError> {
        let documents = self.store.list_documents(MENU_ITEMS_COLLECTION).await?;
        let remote_empty = documents.is_empty();

        let mut items = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value::<MenuItemDraft>(document.fields) {
                Ok(item_fields) => items.push(MenuItem::from_draft(document.id, item_fields)),
                Err(e) => warn!("Skipping malformed menu item {}: {}", document.id, e),
            }
        }

        if remote_empty {
            info!("Menu collection is empty, seeding default items");
            items = self.seed_defaults().await?;
        }

        let count = items.len();
        self.items = items;
        info!("Loaded {} menu items", count);
        Ok(count)
    }

    async fn seed_defaults(&self) -> Result<Vec<MenuItem>, CatalogError> {
        let mut seeded = Vec::new();
        for item_fields in default_menu_items() {
            let fields = serde_json::to_value(&item_fields).map_err(RemoteError::from)?;
            let id = self.store.add_document(MENU_ITEMS_COLLECTION, fields).await?;
            seeded.push(MenuItem::from_draft(id, item_fields));
        }
        Ok(seeded)
    }

    /// The catalog in its current order.
    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    /// Adds a new item; the store assigns its id.
    pub async fn add(&mut self, item_fields: MenuItemDraft) -> Result<MenuItem, CatalogError> {
        validate(&item_fields)?;
        let fields = serde_json::to_value(&item_fields).map_err(RemoteError::from)?;
        let id = self.store.add_document(MENU_ITEMS_COLLECTION, fields).await?;
        let item = MenuItem::from_draft(id, item_fields);
        info!("Added menu item {} ({})", item.name, item.id);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replaces the entry with the same id.
    pub async fn update(&mut self, item: MenuItem) -> Result<(), CatalogError> {
        validate(&item.draft())?;
        let position = self
            .items
            .iter()
            .position(|existing| existing.id == item.id)
            .ok_or_else(|| CatalogError::UnknownItem(item.id.clone()))?;
        let fields = serde_json::to_value(item.draft()).map_err(RemoteError::from)?;
        self.store
            .replace_document(MENU_ITEMS_COLLECTION, &item.id, fields)
            .await?;
        info!("Updated menu item {} ({})", item.name, item.id);
        self.items[position] = item;
        Ok(())
    }

    /// Removes the item if present; unknown ids are a no-op. Orders
    /// referencing the id keep it as a dangling reference, which the
    /// aggregation layer treats as a zero contribution.
    pub async fn delete(&mut self, id: &str) -> Result<bool, CatalogError> {
        let removed = self.store.delete_document(MENU_ITEMS_COLLECTION, id).await?;
        if removed {
            self.items.retain(|item| item.id != id);
            info!("Deleted menu item {}", id);
        }
        Ok(removed)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Price lookup for the aggregation functions.
    pub fn price_of(&self) -> impl Fn(&str) -> Option<Decimal> + '_ {
        move |id| self.get_by_id(id).map(|item| item.price)
    }

    /// Groups the catalog by category, keeping the catalog's current order
    /// within each group.
    pub fn group_by_category(&self) -> BTreeMap<String, Vec<MenuItem>> {
        let mut groups: BTreeMap<String, Vec<MenuItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.category.clone()).or_default().push(item.clone());
        }
        groups
    }

    /// Drops the cached catalog, e.g. when the session ends.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

fn validate(item_fields: &MenuItemDraft) -> Result<(), ValidationError> {
    if item_fields.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if item_fields.price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    Ok(())
}
