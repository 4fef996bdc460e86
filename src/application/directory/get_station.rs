use crate::domain::documents::{DocumentStore, StoreError, collections};
use crate::domain::stations::FireStation;
use std::sync::Arc;

pub struct GetFireStationByEmailUseCase {
    store: Arc<dyn DocumentStore>,
}

impl GetFireStationByEmailUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, email: &str) -> Result<Option<FireStation>, StoreError> {
        let matches = self
            .store
            .query_equals(collections::FIRE_STATIONS, "email", email)
            .await?;

        matches
            .into_iter()
            .next()
            .map(|doc| doc.into_record(collections::FIRE_STATIONS))
            .transpose()
    }
}
