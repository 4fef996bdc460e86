use crate::domain::documents::{DocumentStore, StoreError, collections};
use crate::domain::drivers::Driver;
use std::sync::Arc;

pub struct ListStationDriversUseCase {
    store: Arc<dyn DocumentStore>,
}

impl ListStationDriversUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, station_id: &str) -> Result<Vec<Driver>, StoreError> {
        let drivers = self
            .store
            .query_equals(collections::DRIVERS, "stationId", station_id)
            .await?
            .into_iter()
            .map(|doc| doc.into_record(collections::DRIVERS))
            .collect::<Result<Vec<Driver>, _>>()?;

        tracing::debug!(station_id, count = drivers.len(), "Fetched drivers for station");

        Ok(drivers)
    }
}
