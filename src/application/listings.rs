use crate::domain::documents::{Document, DocumentStore, StoreError, Subscription, collections};
use futures::Stream;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A newest-first live view over one collection.
///
/// Records are kept current by the store's subscription for as long as the
/// listing is alive; dropping it tears the subscription down.
#[derive(Debug)]
pub struct LiveListing<T> {
    collection: &'static str,
    subscription: Subscription,
    _record: PhantomData<fn() -> T>,
}

impl<T> LiveListing<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub async fn open(
        store: &dyn DocumentStore,
        collection: &'static str,
    ) -> Result<Self, StoreError> {
        let subscription = store
            .subscribe_ordered_desc(collection, collections::CREATED_AT)
            .await?;

        tracing::debug!(collection, "Live listing opened");

        Ok(Self {
            collection,
            subscription,
            _record: PhantomData,
        })
    }

    /// Records as of the last push.
    pub fn snapshot(&self) -> Vec<T> {
        decode(self.collection, self.subscription.current())
    }

    /// Wait for the collection to change and return the new records.
    pub async fn changed(&mut self) -> Result<Vec<T>, StoreError> {
        let documents = self.subscription.changed().await?;
        Ok(decode(self.collection, documents))
    }

    /// The current records followed by every subsequent push.
    ///
    /// Streams share this listing's live query; opening one costs no store
    /// subscription. A stream ends once the listing is dropped.
    pub fn watch(&self) -> impl Stream<Item = Vec<T>> + Send + 'static + use<T> {
        let collection = self.collection;
        let mut snapshots = self.subscription.watch();
        snapshots.mark_changed();

        futures::stream::unfold(snapshots, move |mut snapshots| async move {
            snapshots.changed().await.ok()?;
            let documents = snapshots.borrow_and_update().clone();
            Some((decode(collection, documents), snapshots))
        })
    }
}

fn decode<T: DeserializeOwned>(collection: &str, documents: Vec<Document>) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|doc| match doc.into_record(collection) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection, error = %e, "Skipping malformed document");
                None
            }
        })
        .collect()
}
