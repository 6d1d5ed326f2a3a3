//! Order store service.
//!
//! Owns the canonical [`Order`] collection, mirrored write-through to the
//! `orders` document collection. The latest submission under a given
//! employee name wins: submitting replaces any existing order for that
//! name, so at most one current order per employee is ever listed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::domain::errors::{OrderError, ValidationError};
use crate::domain::models::order::{Order, OrderRecord, WeekOrder};
use crate::storage::traits::{Document, DocumentStore, RemoteError};

pub const ORDERS_COLLECTION: &str = "orders";

pub struct OrderService {
    store: Arc<dyn DocumentStore>,
    orders: Vec<Order>,
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            orders: Vec::new(),
        }
    }

    /// Wholesale reload of the cache from the remote collection. Runs on
    /// session establishment and again whenever the active identity
    /// changes, discarding whatever the previous identity had loaded.
    pub async fn load(&mut self) -> Result<usize, OrderError> {
        let documents = self.store.list_documents(ORDERS_COLLECTION).await?;
        let orders = decode_orders(documents, Utc::now());
        let count = orders.len();
        self.orders = orders;
        info!("Loaded {} orders", count);
        Ok(count)
    }

    /// Submits the week's selections for an employee.
    ///
    /// An existing order under the same employee name is replaced in place
    /// (keeping its id); otherwise a new document is added. The cache is
    /// only touched after the remote write has been acknowledged.
    pub async fn submit(
        &mut self,
        employee_name: &str,
        week_order: WeekOrder,
        acting_user_id: &str,
    ) -> Result<Order, OrderError> {
        if employee_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if week_order.is_empty() {
            return Err(ValidationError::EmptyOrder.into());
        }

        let timestamp = Utc::now();
        let record = OrderRecord {
            employee_name: employee_name.to_string(),
            week_order,
            user_id: acting_user_id.to_string(),
            timestamp: Some(timestamp),
        };
        let fields = serde_json::to_value(&record).map_err(RemoteError::from)?;

        let existing_id = self
            .orders
            .iter()
            .find(|order| order.employee_name == employee_name)
            .map(|order| order.id.clone());

        let id = match existing_id {
            Some(id) => {
                self.store
                    .replace_document(ORDERS_COLLECTION, &id, fields)
                    .await?;
                info!("Replaced order {} for {}", id, employee_name);
                id
            }
            None => {
                let id = self.store.add_document(ORDERS_COLLECTION, fields).await?;
                info!("Created order {} for {}", id, employee_name);
                id
            }
        };

        // Remote write acknowledged; the cache may change now.
        self.orders.retain(|order| order.employee_name != employee_name);
        let order = Order {
            id,
            employee_name: record.employee_name,
            week_order: record.week_order,
            timestamp,
        };
        self.orders.push(order.clone());
        Ok(order)
    }

    /// The cached orders: the last completed load plus submissions and
    /// deletions applied since.
    pub fn list_all(&self) -> &[Order] {
        &self.orders
    }

    /// Exact, case-sensitive match on employee name.
    pub fn list_by_employee(&self, employee_name: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.employee_name == employee_name)
            .collect()
    }

    /// Orders submitted under a specific identity, queried remotely via
    /// the provenance tag.
    pub async fn fetch_user_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let value = serde_json::Value::String(user_id.to_string());
        let documents = self
            .store
            .query_by_field(ORDERS_COLLECTION, "userId", &value)
            .await?;
        Ok(decode_orders(documents, Utc::now()))
    }

    /// Deletes remotely first; the cache only changes once the remote
    /// delete is confirmed. Unknown ids are a no-op.
    pub async fn delete(&mut self, order_id: &str) -> Result<bool, OrderError> {
        let removed = self.store.delete_document(ORDERS_COLLECTION, order_id).await?;
        if removed {
            self.orders.retain(|order| order.id != order_id);
            info!("Deleted order {}", order_id);
        }
        Ok(removed)
    }

    /// Drops the cached orders, e.g. when the session ends.
    pub fn clear(&mut self) {
        self.orders.clear();
    }
}

/// Decodes fetched documents, skipping malformed ones. Records without a
/// persisted timestamp get the fetch instant.
fn decode_orders(documents: Vec<Document>, fetched_at: DateTime<Utc>) -> Vec<Order> {
    let mut orders = Vec::with_capacity(documents.len());
    for document in documents {
        match serde_json::from_value::<OrderRecord>(document.fields) {
            Ok(record) => orders.push(Order {
                id: document.id,
                employee_name: record.employee_name,
                week_order: record.week_order,
                timestamp: record.timestamp.unwrap_or(fetched_at),
            }),
            Err(e) => warn!("Skipping malformed order {}: {}", document.id, e),
        }
    }
    orders
}
