use super::*;

/// Read-only access to stored lists.
#[async_trait]
pub trait ListReader: Send + Sync {
    /// Load a list by id. `Ok(None)` when no such list exists.
    async fn get_list(&self, list_id: &str) -> Result<Option<ShoppingList>, ListStoreError>;

    /// All stored lists in creation order, truncated to `limit`.
    async fn get_all_lists(&self, limit: usize) -> Result<Vec<ShoppingList>, ListStoreError>;

    /// Load a list or fail with [`ListStoreError::NotFound`].
    async fn require_list(&self, list_id: &str) -> Result<ShoppingList, ListStoreError> {
        self.get_list(list_id)
            .await?
            .ok_or_else(|| ListStoreError::NotFound(list_id.to_string()))
    }

    /// Number of stored lists.
    async fn list_count(&self) -> Result<usize, ListStoreError> {
        Ok(self.get_all_lists(usize::MAX).await?.len())
    }
}

/// Mutating access to stored lists.
#[async_trait]
pub trait ListWriter: ListReader {
    /// Create a list with a fresh id. The name is trimmed and must not end
    /// up empty; items are applied in order, a duplicate barcode replacing
    /// the earlier entry in place.
    async fn create_list(
        &self,
        name: &str,
        items: Vec<Item>,
    ) -> Result<ShoppingList, ListStoreError>;

    /// Delete a list outright. Fails with [`ListStoreError::NotFound`] when
    /// the id does not resolve, so deleting twice fails the second time.
    async fn delete_list(&self, list_id: &str) -> Result<(), ListStoreError>;

    /// Put an item on a list, replacing any entry with the same barcode.
    /// Returns the updated list.
    async fn add_item(&self, list_id: &str, item: Item) -> Result<ShoppingList, ListStoreError>;

    /// Take the item with this barcode off a list. Returns the updated list,
    /// or [`ListStoreError::ItemNotFound`] when the barcode is absent.
    async fn remove_item(
        &self,
        list_id: &str,
        barcode: &str,
    ) -> Result<ShoppingList, ListStoreError>;
}

/// Full store capability. Blanket-implemented for any [`ListWriter`].
pub trait ListStore: ListWriter {}

impl<T: ListWriter + ?Sized> ListStore for T {}
