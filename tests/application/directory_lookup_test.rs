use crate::common;

use flare_admin::application::directory::get_admin::GetAdminByEmailUseCase;
use flare_admin::application::directory::get_station::GetFireStationByEmailUseCase;
use flare_admin::application::directory::list_station_drivers::ListStationDriversUseCase;
use flare_admin::application::directory::list_sub_stations::ListSubStationsUseCase;
use flare_admin::domain::documents::{DocumentStore, StoreError};
use flare_admin::infrastructure::mock::UnavailableDocumentStore;
use flare_admin::infrastructure::store::memory::InMemoryDocumentStore;
use std::sync::Arc;

fn shared(store: &InMemoryDocumentStore) -> Arc<dyn DocumentStore> {
    Arc::new(store.clone())
}

#[tokio::test]
async fn test_admin_lookup_is_exact() {
    let store = InMemoryDocumentStore::new();
    let id = common::seed_admin(&store, "chief@flare.test").await;
    let use_case = GetAdminByEmailUseCase::new(shared(&store));

    let admin = use_case.execute("chief@flare.test").await.unwrap().unwrap();
    assert_eq!(admin.id, id);
    assert_eq!(admin.email, "chief@flare.test");

    assert!(use_case.execute("Chief@flare.test").await.unwrap().is_none());
    assert!(use_case.execute("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_station_lookup_root_and_sub_station() {
    let store = InMemoryDocumentStore::new();
    let root = common::seed_station(&store, "Tagum Central", "central@flare.test", None, 10).await;
    common::seed_station(&store, "Visayan Village", "visayan@flare.test", Some(&root), 5).await;
    let use_case = GetFireStationByEmailUseCase::new(shared(&store));

    let central = use_case.execute("central@flare.test").await.unwrap().unwrap();
    assert!(central.is_root());
    assert_eq!(central.station_name.as_deref(), Some("Tagum Central"));

    let sub = use_case.execute("visayan@flare.test").await.unwrap().unwrap();
    assert!(!sub.is_root());
    assert_eq!(sub.parent_station_id.as_deref(), Some(root.as_str()));
}

#[tokio::test]
async fn test_sub_stations_by_parent() {
    let store = InMemoryDocumentStore::new();
    let root = common::seed_station(&store, "Central", "central@flare.test", None, 10).await;
    let other = common::seed_station(&store, "North", "north@flare.test", None, 9).await;
    common::seed_station(&store, "Sub A", "a@flare.test", Some(&root), 8).await;
    common::seed_station(&store, "Sub B", "b@flare.test", Some(&root), 7).await;
    common::seed_station(&store, "Sub C", "c@flare.test", Some(&other), 6).await;
    let use_case = ListSubStationsUseCase::new(shared(&store));

    let subs = use_case.execute(&root).await.unwrap();
    let mut names: Vec<_> = subs.iter().filter_map(|s| s.station_name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["Sub A", "Sub B"]);

    assert!(use_case.execute("no-such-parent").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_drivers_by_station() {
    let store = InMemoryDocumentStore::new();
    common::seed_driver(&store, "Pedro Penduko", "S1", 3).await;
    common::seed_driver(&store, "Maria Clara", "S1", 2).await;
    common::seed_driver(&store, "Jose Rizal", "S2", 1).await;
    let use_case = ListStationDriversUseCase::new(shared(&store));

    let drivers = use_case.execute("S1").await.unwrap();
    assert_eq!(drivers.len(), 2);
    assert!(drivers.iter().all(|d| d.station_id == "S1"));

    assert!(use_case.execute("S3").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lookups_surface_backend_failure() {
    let store: Arc<dyn DocumentStore> = Arc::new(UnavailableDocumentStore);

    assert!(matches!(
        GetAdminByEmailUseCase::new(store.clone()).execute("a@x.com").await,
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(
        GetFireStationByEmailUseCase::new(store.clone()).execute("a@x.com").await,
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(
        ListSubStationsUseCase::new(store.clone()).execute("S1").await,
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(
        ListStationDriversUseCase::new(store).execute("S1").await,
        Err(StoreError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_every_lookup_reads_fresh() {
    let store = InMemoryDocumentStore::new();
    let use_case = ListStationDriversUseCase::new(shared(&store));

    assert!(use_case.execute("S1").await.unwrap().is_empty());

    common::seed_driver(&store, "Late Comer", "S1", 0).await;

    assert_eq!(use_case.execute("S1").await.unwrap().len(), 1);
}
