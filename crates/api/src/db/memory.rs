//! Process-local document store.
//!
//! Documents live in insertion order per collection behind one `RwLock`, so
//! conditional inserts are atomic with respect to every other operation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreError, document_id, project,
    unique_key,
};

#[derive(Debug, Clone)]
struct StoredDocument {
    body: Document,
    unique_key: Option<String>,
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut matched: Vec<Document> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(&d.body))
                    .map(|d| d.body.clone())
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        if let Some(limit) = options.limit {
            matched.truncate(limit);
        }

        if let Some(fields) = options.projection {
            matched = matched.into_iter().map(|d| project(d, fields)).collect();
        }

        Ok(matched)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<(), StoreError> {
        document_id(&document)?;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(StoredDocument {
                body: document,
                unique_key: None,
            });
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError> {
        for document in &documents {
            document_id(document)?;
        }

        let count = documents.len();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(documents.into_iter().map(|body| StoredDocument {
                body,
                unique_key: None,
            }));
        Ok(count)
    }

    async fn insert_unique(
        &self,
        collection: Collection,
        document: Document,
        key: &[&str],
    ) -> Result<bool, StoreError> {
        document_id(&document)?;
        let candidate = unique_key(&document, key);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if docs
            .iter()
            .any(|d| d.unique_key.as_deref() == Some(candidate.as_str()))
        {
            return Ok(false);
        }

        docs.push(StoredDocument {
            body: document,
            unique_key: Some(candidate),
        });
        Ok(true)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        match docs.iter().position(|d| filter.matches(&d.body)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map_or(0, |docs| docs.iter().filter(|d| filter.matches(&d.body)).count());
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!("Memory document store closed");
    }
}
