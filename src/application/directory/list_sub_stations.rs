use crate::domain::documents::{DocumentStore, StoreError, collections};
use crate::domain::stations::FireStation;
use std::sync::Arc;

pub struct ListSubStationsUseCase {
    store: Arc<dyn DocumentStore>,
}

impl ListSubStationsUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stations whose `parentStationId` is the given station, in backend order.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, parent_station_id: &str) -> Result<Vec<FireStation>, StoreError> {
        self.store
            .query_equals(collections::FIRE_STATIONS, "parentStationId", parent_station_id)
            .await?
            .into_iter()
            .map(|doc| doc.into_record(collections::FIRE_STATIONS))
            .collect()
    }
}
