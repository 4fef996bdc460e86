use crate::domain::documents::{Document, DocumentStore, StoreError, Subscription};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{RwLock, broadcast, watch};
use uuid::Uuid;

/// Process-local document store.
///
/// Every insert is announced on a broadcast feed of collection names, which
/// live queries listen on to recompute their ordered result sets.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    inner: Arc<Inner>,
}

struct Inner {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
    /// Insertion counter, breaks ordering ties newest-first.
    sequence: AtomicU64,
    changes: broadcast::Sender<String>,
}

#[derive(Clone)]
struct StoredDocument {
    seq: u64,
    document: Document,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(HashMap::new()),
                sequence: AtomicU64::new(1),
                changes,
            }),
        }
    }

    /// Number of documents held in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Number of live queries currently listening for changes.
    pub fn live_query_count(&self) -> usize {
        self.inner.changes.receiver_count()
    }

    async fn ordered(&self, collection: &str, field: &str) -> Vec<Document> {
        let collections = self.inner.collections.read().await;
        let mut stored: Vec<StoredDocument> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.document.field(field).is_some())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        stored.sort_by(|a, b| {
            compare_values(b.document.field(field), a.document.field(field))
                .then_with(|| b.seq.cmp(&a.seq))
        });

        stored.into_iter().map(|d| d.document).collect()
    }
}

/// Orders field values the way the Postgres store's `data->>field COLLATE "C"`
/// does: by their text form, byte-wise, with JSON `null` highest (NULLS FIRST
/// under DESC).
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (as_text(a), as_text(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.as_bytes().cmp(b.as_bytes()),
    }
}

fn as_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let seq = self.inner.sequence.fetch_add(1, AtomicOrdering::SeqCst);

        self.inner
            .collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                seq,
                document: Document::new(id.clone(), data),
            });

        // No live queries is not an error
        let _ = self.inner.changes.send(collection.to_string());

        Ok(id)
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.inner.collections.read().await;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.document.field(field).and_then(Value::as_str) == Some(value))
                    .map(|d| d.document.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn subscribe_ordered_desc(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Subscription, StoreError> {
        // Listen before the first read so no insert falls in between
        let mut changes = self.inner.changes.subscribe();
        let initial = self.ordered(collection, field).await;
        let (tx, rx) = watch::channel(initial);

        let store = self.clone();
        let collection = collection.to_string();
        let field = field.to_string();

        let worker = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    change = changes.recv() => match change {
                        Ok(changed) if changed != collection => continue,
                        Ok(_) | Err(RecvError::Lagged(_)) => {
                            let snapshot = store.ordered(&collection, &field).await;
                            if tx.send(snapshot).is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            tracing::debug!(collection = %collection, "Live query closed");
        });

        Ok(Subscription::new(rx, worker))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
