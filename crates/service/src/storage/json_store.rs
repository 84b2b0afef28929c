use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};

use super::DocumentStore;
use crate::errors::ServiceError;

/// File-backed document store.
///
/// Each collection persists as one JSON file (`<data_dir>/<name>.json`)
/// holding a map of document id to document. Collections load lazily on
/// first touch and every mutation rewrites the collection's file.
/// Intended for deployments where a managed document database is overkill;
/// anything heavier goes behind the same [`DocumentStore`] trait.
pub struct JsonFileStore {
    data_dir: PathBuf,
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl JsonFileStore {
    /// Initialize the store rooted at `data_dir`. Creates the directory if
    /// missing.
    pub async fn open<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, ServiceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await.map_err(ServiceError::store)?;
        Ok(Arc::new(Self { data_dir, collections: RwLock::new(HashMap::new()) }))
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    async fn load(&self, collection: &str) -> Result<(), ServiceError> {
        {
            let loaded = self.collections.read().await;
            if loaded.contains_key(collection) {
                return Ok(());
            }
        }

        let docs: HashMap<String, Value> = match fs::read(self.file_path(collection)).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };

        let mut loaded = self.collections.write().await;
        loaded.entry(collection.to_string()).or_insert(docs);
        Ok(())
    }

    async fn persist(&self, collection: &str) -> Result<(), ServiceError> {
        let data = {
            let loaded = self.collections.read().await;
            match loaded.get(collection) {
                Some(docs) => serde_json::to_vec(docs).map_err(ServiceError::store)?,
                None => b"{}".to_vec(),
            }
        };
        fs::write(self.file_path(collection), data).await.map_err(ServiceError::store)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, ServiceError> {
        self.load(collection).await?;
        let loaded = self.collections.read().await;
        Ok(loaded
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError> {
        self.load(collection).await?;
        let loaded = self.collections.read().await;
        Ok(loaded.get(collection).and_then(|docs| docs.get(id).cloned()))
    }

    async fn insert(&self, collection: &str, id: &str, doc: Value) -> Result<(), ServiceError> {
        self.load(collection).await?;
        {
            let mut loaded = self.collections.write().await;
            loaded.entry(collection.to_string()).or_default().insert(id.to_string(), doc);
        }
        self.persist(collection).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<Value, ServiceError> {
        self.load(collection).await?;
        let updated = {
            let mut loaded = self.collections.write().await;
            let docs = loaded.entry(collection.to_string()).or_default();
            let doc = docs
                .get_mut(id)
                .ok_or_else(|| ServiceError::NotFound(format!("{collection}/{id} bulunamadı")))?;
            if let (Some(target), Some(fields)) = (doc.as_object_mut(), patch.as_object()) {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            doc.clone()
        };
        self.persist(collection).await?;
        Ok(updated)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<bool, ServiceError> {
        self.load(collection).await?;
        let existed = {
            let mut loaded = self.collections.write().await;
            loaded.entry(collection.to_string()).or_default().remove(id).is_some()
        };
        self.persist(collection).await?;
        Ok(existed)
    }

    async fn ensure_collection(&self, collection: &str) -> Result<(), ServiceError> {
        self.load(collection).await?;
        if fs::metadata(self.file_path(collection)).await.is_err() {
            self.persist(collection).await?;
        }
        Ok(())
    }
}
