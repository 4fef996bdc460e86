use crate::common;

use flare_admin::application::drivers::provision::ProvisionDriverUseCase;
use flare_admin::application::drivers::workflow::ManageDriversState;
use flare_admin::application::listings::LiveListing;
use flare_admin::domain::documents::collections;
use flare_admin::domain::drivers::Driver;
use flare_admin::domain::stations::FireStation;
use flare_admin::infrastructure::mock::MockAuthProvider;
use flare_admin::infrastructure::password::RandomPasswordGenerator;
use flare_admin::infrastructure::store::memory::InMemoryDocumentStore;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_station_listing_newest_first() {
    let store = InMemoryDocumentStore::new();
    common::seed_station(&store, "Oldest", "old@flare.test", None, 30).await;
    common::seed_station(&store, "Newest", "new@flare.test", None, 1).await;
    common::seed_station(&store, "Middle", "mid@flare.test", None, 15).await;

    let listing = LiveListing::<FireStation>::open(&store, collections::FIRE_STATIONS)
        .await
        .unwrap();

    let names: Vec<_> = listing
        .snapshot()
        .into_iter()
        .filter_map(|s| s.station_name)
        .collect();
    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_provisioned_driver_appears_first() {
    let store = InMemoryDocumentStore::new();
    common::seed_driver(&store, "Existing Driver", "S1", 60).await;

    let mut listing = LiveListing::<Driver>::open(&store, collections::DRIVERS)
        .await
        .unwrap();
    assert_eq!(listing.snapshot().len(), 1);

    let use_case = ProvisionDriverUseCase::new(
        Arc::new(MockAuthProvider::default()),
        Arc::new(store.clone()),
        Arc::new(RandomPasswordGenerator::default()),
        common::test_verification_settings(),
    );
    let (_, result) = ManageDriversState::default()
        .open_form()
        .edit(|form| {
            form.driver_name = "Juan Dela Cruz".to_string();
            form.driver_email = "juan@x.com".to_string();
            form.driver_contact = "0912".to_string();
        })
        .select_station("S1", &[])
        .submit(true, &use_case)
        .await;
    let created = result.unwrap();

    let drivers = tokio::time::timeout(Duration::from_secs(1), listing.changed())
        .await
        .expect("listing was not pushed")
        .unwrap();
    assert_eq!(drivers.len(), 2);
    assert_eq!(drivers[0].id, created.id);
    assert_eq!(drivers[1].full_name, "Existing Driver");
}

#[tokio::test]
async fn test_listing_stream_pushes_changes() {
    let store = InMemoryDocumentStore::new();
    let listing = LiveListing::<FireStation>::open(&store, collections::FIRE_STATIONS)
        .await
        .unwrap();
    let mut stream = Box::pin(listing.watch());

    let initial = stream.next().await.unwrap();
    assert!(initial.is_empty());

    common::seed_station(&store, "Fresh", "fresh@flare.test", None, 0).await;

    let pushed = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("stream was not pushed")
        .unwrap();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].station_name.as_deref(), Some("Fresh"));
}

#[tokio::test]
async fn test_documents_without_created_at_are_not_listed() {
    let store = InMemoryDocumentStore::new();
    common::seed(
        &store,
        collections::FIRE_STATIONS,
        serde_json::json!({ "email": "legacy@flare.test", "stationName": "Legacy" }),
    )
    .await;
    common::seed_station(&store, "Dated", "dated@flare.test", None, 1).await;

    let listing = LiveListing::<FireStation>::open(&store, collections::FIRE_STATIONS)
        .await
        .unwrap();

    let stations = listing.snapshot();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].email, "dated@flare.test");
}
