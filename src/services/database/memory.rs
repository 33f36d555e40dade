//! In-memory gateway for tests.
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};

use crate::services::database::client::{DatabaseGateway, DbError, DbResult};

/// Stores documents per collection; clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    collections: Arc<Mutex<BTreeMap<String, Vec<Document>>>>,
    failure: Option<String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every operation fails with `DbError::Backend(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_collection(self, name: &str) -> Self {
        self.collections
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default();
        self
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> DbResult<()> {
        match &self.failure {
            Some(message) => Err(DbError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DatabaseGateway for MemoryGateway {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, mut document: Document) -> DbResult<String> {
        self.check()?;

        let id = ObjectId::new();
        document.insert("_id", id);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id.to_hex())
    }

    async fn list_collection_names(&self) -> DbResult<Vec<String>> {
        self.check()?;

        // Reverse order so callers cannot rely on the backend sorting for them.
        Ok(self
            .collections
            .lock()
            .unwrap()
            .keys()
            .rev()
            .cloned()
            .collect())
    }
}
