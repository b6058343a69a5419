use crate::item::Item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a list id: a UUID v4 in simple form (32 hex characters).
pub const LIST_ID_LEN: usize = 32;

/// Generate a fresh list id.
pub fn gen_list_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Input that breaks a model invariant. Raised before anything is persisted.
///
/// Display strings are the exact messages clients show to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListValidationError {
    /// List name was empty after trimming.
    #[error("List name must contain at least one character")]
    EmptyName,
    /// Item barcode was empty after trimming.
    #[error("Item barcode must contain at least one character")]
    EmptyBarcode,
}

/// Trim a list name and enforce the non-empty invariant.
pub fn normalize_list_name(raw: &str) -> Result<String, ListValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ListValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// A named shopping list.
///
/// Item barcodes are unique within a list: inserting a barcode that is
/// already present replaces the earlier entry in place instead of growing
/// the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Store-assigned identifier (32 hex characters).
    pub id: String,
    /// Display name. Trimmed, never empty.
    pub name: String,
    /// Items in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time. Equal to `created_at` until the first update.
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create an empty list with fresh timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item, builder-style. Same semantics as [`Self::upsert_item`].
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.upsert_item(item);
        self
    }

    /// Insert an item, replacing any entry with the same barcode.
    ///
    /// A replaced item keeps its position; a new barcode goes to the end.
    pub fn upsert_item(&mut self, item: Item) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.barcode == item.barcode)
        {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Remove the item with the given barcode. Returns `false` when absent.
    pub fn remove_item(&mut self, barcode: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.barcode != barcode);
        before != self.items.len()
    }

    pub fn contains_barcode(&self, barcode: &str) -> bool {
        self.items.iter().any(|item| item.barcode == barcode)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Bump the mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
