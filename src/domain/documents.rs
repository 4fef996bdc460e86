use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Collection names shared with the dispatch web application.
pub mod collections {
    pub const ADMINS: &str = "Admin";
    pub const FIRE_STATIONS: &str = "fireStations";
    pub const DRIVERS: &str = "drivers";

    /// Field every listing is ordered by.
    pub const CREATED_AT: &str = "createdAt";
}

/// A schemaless record as held by the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Merge the document id into its data and deserialize the result.
    ///
    /// The store-assigned id always replaces an `id` key found in the data.
    pub fn into_record<T: DeserializeOwned>(self, collection: &str) -> Result<T, StoreError> {
        let Document { id, mut data } = self;
        data.insert("id".to_string(), Value::String(id.clone()));

        serde_json::from_value(Value::Object(data)).map_err(|source| StoreError::Decode {
            collection: collection.to_string(),
            id,
            source,
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
    #[error("Failed to encode document for {collection}: {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to decode document {id} in {collection}: {source}")]
    Decode {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle on a live query.
///
/// Holds the latest ordered result set and is refreshed by a background
/// worker whenever the underlying collection changes. Dropping the handle
/// stops the worker.
#[derive(Debug)]
pub struct Subscription {
    snapshots: watch::Receiver<Vec<Document>>,
    worker: JoinHandle<()>,
}

impl Subscription {
    pub fn new(snapshots: watch::Receiver<Vec<Document>>, worker: JoinHandle<()>) -> Self {
        Self { snapshots, worker }
    }

    /// The most recently pushed result set.
    pub fn current(&self) -> Vec<Document> {
        self.snapshots.borrow().clone()
    }

    /// Another receiver of the pushed result sets, sharing this live query.
    pub fn watch(&self) -> watch::Receiver<Vec<Document>> {
        self.snapshots.clone()
    }

    /// Wait for the next pushed result set.
    pub async fn changed(&mut self) -> Result<Vec<Document>, StoreError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| StoreError::Unavailable("Live query closed".to_string()))?;

        Ok(self.snapshots.borrow_and_update().clone())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its generated id.
    async fn insert(&self, collection: &str, data: Map<String, Value>)
    -> Result<String, StoreError>;

    /// Point-in-time query for documents whose string `field` equals `value`.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Live query over documents carrying `field`, ordered by it descending.
    /// Documents without the field are not part of the result set.
    async fn subscribe_ordered_desc(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Subscription, StoreError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
