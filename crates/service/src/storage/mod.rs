//! Storage abstractions for the service layer.
//!
//! The document store is an external dependency reached through the
//! [`DocumentStore`] trait: named collections of schemaless JSON documents
//! addressed by string id, last-write-wins per document, no cross-document
//! transactions. [`json_store::JsonFileStore`] is the bundled file-backed
//! implementation used by default and in tests.

pub mod depo;
pub mod json_store;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection. A collection that does not exist yet
    /// reads as empty.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, ServiceError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError>;

    /// Insert or replace a document (upsert).
    async fn insert(&self, collection: &str, id: &str, doc: Value) -> Result<(), ServiceError>;

    /// Merge the fields of `patch` into an existing document and return the
    /// result. Errors with `NotFound` if the document is missing.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<Value, ServiceError>;

    /// Remove a document; returns whether it existed.
    async fn remove(&self, collection: &str, id: &str) -> Result<bool, ServiceError>;

    /// Make an empty collection visible to later reads and listings.
    async fn ensure_collection(&self, collection: &str) -> Result<(), ServiceError>;

    /// Linear equality scan over a single field. No query planner; filters
    /// are plain predicates over the listed documents.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>, ServiceError> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }
}

/// Typed view over one collection of a [`DocumentStore`]. Documents are
/// serde round-tripped at the boundary.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), name: self.name, _doc: PhantomData }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self { store, name, _doc: PhantomData }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        self.store.list(self.name).await?.into_iter().map(decode).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.store.get(self.name, id).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(&self, id: &str, doc: &T) -> Result<(), ServiceError> {
        let value = serde_json::to_value(doc).map_err(ServiceError::store)?;
        self.store.insert(self.name, id, value).await
    }

    /// Partial update in the document store's merge style.
    pub async fn merge(&self, id: &str, patch: Value) -> Result<T, ServiceError> {
        decode(self.store.update(self.name, id, patch).await?)
    }

    pub async fn find_eq(
        &self,
        field: &str,
        value: impl Serialize,
    ) -> Result<Vec<T>, ServiceError> {
        let value = serde_json::to_value(value).map_err(ServiceError::store)?;
        self.store
            .find_eq(self.name, field, &value)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_first_eq(
        &self,
        field: &str,
        value: impl Serialize,
    ) -> Result<Option<T>, ServiceError> {
        Ok(self.find_eq(field, value).await?.into_iter().next())
    }

    /// Uniqueness scans boil down to this.
    pub async fn exists_eq(&self, field: &str, value: impl Serialize) -> Result<bool, ServiceError> {
        let value = serde_json::to_value(value).map_err(ServiceError::store)?;
        Ok(!self.store.find_eq(self.name, field, &value).await?.is_empty())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(ServiceError::store)
}
