use async_trait::async_trait;
use pantry_model::{Item, ShoppingList};
use pantry_store_contract::{
    assemble_new_list, validate_list_id, ListReader, ListStoreError, ListWriter,
};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// One JSON document per list under a base directory.
///
/// Saves go through a temp file plus rename, so readers never observe a
/// partially written document. A store-wide mutex serializes the
/// read-modify-write cycles of the mutating operations.
pub struct FileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, ListStoreError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Resolve the document path for a list id.
    /// The id is validated first, so traversal sequences never become paths.
    fn list_path(&self, list_id: &str) -> Result<PathBuf, ListStoreError> {
        validate_list_id(list_id)?;
        Ok(self.base_path.join(format!("{list_id}.json")))
    }

    async fn load_list(&self, list_id: &str) -> Result<Option<ShoppingList>, ListStoreError> {
        let path = self.list_path(list_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await?;
        let list = serde_json::from_str(&content)
            .map_err(|e| ListStoreError::Serialization(e.to_string()))?;
        Ok(Some(list))
    }

    /// Write a list document atomically (temp file, then rename).
    async fn save_list(&self, list: &ShoppingList) -> Result<(), ListStoreError> {
        if !self.base_path.exists() {
            tokio::fs::create_dir_all(&self.base_path).await?;
        }
        let path = self.list_path(&list.id)?;
        let content = serde_json::to_string_pretty(list)
            .map_err(|e| ListStoreError::Serialization(e.to_string()))?;

        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", list.id, uuid::Uuid::new_v4().simple()));

        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            match tokio::fs::rename(&tmp_path, &path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tokio::fs::remove_file(&path).await?;
                    tokio::fs::rename(&tmp_path, &path).await?;
                }
                Err(e) => return Err(e),
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(ListStoreError::Io(e));
        }
        Ok(())
    }
}

#[async_trait]
impl ListReader for FileStore {
    async fn get_list(&self, list_id: &str) -> Result<Option<ShoppingList>, ListStoreError> {
        self.load_list(list_id).await
    }

    async fn get_all_lists(&self, limit: usize) -> Result<Vec<ShoppingList>, ListStoreError> {
        let mut all = Vec::new();
        if !self.base_path.exists() {
            return Ok(all);
        }
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            // Temp files and foreign documents never carry a valid id.
            if validate_list_id(id).is_err() {
                continue;
            }
            if let Some(list) = self.load_list(id).await? {
                all.push(list);
            }
        }
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all.truncate(limit);
        Ok(all)
    }
}

#[async_trait]
impl ListWriter for FileStore {
    async fn create_list(
        &self,
        name: &str,
        items: Vec<Item>,
    ) -> Result<ShoppingList, ListStoreError> {
        let list = assemble_new_list(name, items)?;
        let _guard = self.write_lock.lock().await;
        self.save_list(&list).await?;
        Ok(list)
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), ListStoreError> {
        let path = self.list_path(list_id)?;
        let _guard = self.write_lock.lock().await;
        if !path.exists() {
            return Err(ListStoreError::NotFound(list_id.to_string()));
        }
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    async fn add_item(&self, list_id: &str, item: Item) -> Result<ShoppingList, ListStoreError> {
        validate_list_id(list_id)?;
        item.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut list = self.require_list(list_id).await?;
        list.upsert_item(item);
        list.touch();
        self.save_list(&list).await?;
        Ok(list)
    }

    async fn remove_item(
        &self,
        list_id: &str,
        barcode: &str,
    ) -> Result<ShoppingList, ListStoreError> {
        validate_list_id(list_id)?;
        let _guard = self.write_lock.lock().await;
        let mut list = self.require_list(list_id).await?;
        if !list.remove_item(barcode) {
            return Err(ListStoreError::ItemNotFound(barcode.to_string()));
        }
        list.touch();
        self.save_list(&list).await?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_store_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        let created = store
            .create_list("Groceries", vec![Item::new("111", "Milk", "Organic Co")])
            .await
            .unwrap();

        // A second store over the same directory sees the same document.
        let reopened = FileStore::open(temp_dir.path()).unwrap();
        let loaded = reopened.get_list(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.items[0].name, "Milk");
    }

    #[tokio::test]
    async fn file_store_rejects_path_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert!(store.list_path("../../etc/passwd").is_err());
        assert!(store.list_path("foo/bar").is_err());
        assert!(store.list_path("foo\\bar").is_err());
        assert!(store.list_path("").is_err());
        assert!(store.list_path("foo\0bar").is_err());
    }

    #[tokio::test]
    async fn file_store_delete_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let created = store.create_list("Groceries", Vec::new()).await.unwrap();

        store.delete_list(&created.id).await.unwrap();
        assert!(matches!(
            store.delete_list(&created.id).await,
            Err(ListStoreError::NotFound(_))
        ));
        assert_eq!(store.get_list(&created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_add_and_remove_item() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let created = store.create_list("Groceries", Vec::new()).await.unwrap();

        let updated = store
            .add_item(&created.id, Item::new("111", "Milk", "Organic Co"))
            .await
            .unwrap();
        assert_eq!(updated.item_count(), 1);
        assert!(updated.updated_at > updated.created_at);

        let updated = store.remove_item(&created.id, "111").await.unwrap();
        assert!(updated.items.is_empty());
        assert!(matches!(
            store.remove_item(&created.id, "111").await,
            Err(ListStoreError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn file_store_item_mutations_need_an_existing_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let ghost = pantry_model::gen_list_id();

        assert!(matches!(
            store.add_item(&ghost, Item::new("111", "Milk", "")).await,
            Err(ListStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_item(&ghost, "111").await,
            Err(ListStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn file_store_listing_skips_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        store.create_list("Groceries", Vec::new()).await.unwrap();
        // Creation instants must differ for the order to be defined.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.create_list("Hardware", Vec::new()).await.unwrap();

        std::fs::write(temp_dir.path().join("notes.txt"), "scratch").unwrap();
        std::fs::write(temp_dir.path().join("stray.json"), "{}").unwrap();

        let all = store.get_all_lists(10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Groceries");
        assert_eq!(all[1].name, "Hardware");
    }

    #[tokio::test]
    async fn file_store_corrupt_document_fails_loudly() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        let created = store.create_list("Groceries", Vec::new()).await.unwrap();

        std::fs::write(
            temp_dir.path().join(format!("{}.json", created.id)),
            "not json at all",
        )
        .unwrap();

        assert!(matches!(
            store.get_list(&created.id).await,
            Err(ListStoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn file_store_create_validates_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert!(matches!(
            store.create_list("   ", Vec::new()).await,
            Err(ListStoreError::Validation(_))
        ));
        assert_eq!(store.list_count().await.unwrap(), 0);
    }
}
