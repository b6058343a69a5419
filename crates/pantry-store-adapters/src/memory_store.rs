use async_trait::async_trait;
use pantry_model::{Item, ShoppingList};
use pantry_store_contract::{
    assemble_new_list, validate_list_id, ListReader, ListStoreError, ListWriter,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory list store for tests and transient deployments.
#[derive(Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<String, ShoppingList>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListReader for MemoryStore {
    async fn get_list(&self, list_id: &str) -> Result<Option<ShoppingList>, ListStoreError> {
        validate_list_id(list_id)?;
        Ok(self.lists.read().await.get(list_id).cloned())
    }

    async fn get_all_lists(&self, limit: usize) -> Result<Vec<ShoppingList>, ListStoreError> {
        let lists = self.lists.read().await;
        let mut all: Vec<ShoppingList> = lists.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all.truncate(limit);
        Ok(all)
    }
}

#[async_trait]
impl ListWriter for MemoryStore {
    async fn create_list(
        &self,
        name: &str,
        items: Vec<Item>,
    ) -> Result<ShoppingList, ListStoreError> {
        let list = assemble_new_list(name, items)?;
        self.lists
            .write()
            .await
            .insert(list.id.clone(), list.clone());
        Ok(list)
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), ListStoreError> {
        validate_list_id(list_id)?;
        match self.lists.write().await.remove(list_id) {
            Some(_) => Ok(()),
            None => Err(ListStoreError::NotFound(list_id.to_string())),
        }
    }

    async fn add_item(&self, list_id: &str, item: Item) -> Result<ShoppingList, ListStoreError> {
        validate_list_id(list_id)?;
        item.validate()?;
        let mut lists = self.lists.write().await;
        let list = lists
            .get_mut(list_id)
            .ok_or_else(|| ListStoreError::NotFound(list_id.to_string()))?;
        list.upsert_item(item);
        list.touch();
        Ok(list.clone())
    }

    async fn remove_item(
        &self,
        list_id: &str,
        barcode: &str,
    ) -> Result<ShoppingList, ListStoreError> {
        validate_list_id(list_id)?;
        let mut lists = self.lists.write().await;
        let list = lists
            .get_mut(list_id)
            .ok_or_else(|| ListStoreError::NotFound(list_id.to_string()))?;
        if !list.remove_item(barcode) {
            return Err(ListStoreError::ItemNotFound(barcode.to_string()));
        }
        list.touch();
        Ok(list.clone())
    }
}
