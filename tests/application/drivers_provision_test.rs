use crate::common;

use flare_admin::application::drivers::provision::{ProvisionDriverUseCase, ProvisioningError};
use flare_admin::application::drivers::workflow::{
    DRIVER_CREATED_MESSAGE, ManageDriversState, Notice, Phase,
};
use flare_admin::application::listings::LiveListing;
use flare_admin::domain::documents::{DocumentStore, collections};
use flare_admin::domain::drivers::Driver;
use flare_admin::domain::stations::FireStation;
use flare_admin::infrastructure::mock::{MockAuthProvider, UnavailableDocumentStore};
use flare_admin::infrastructure::password::RandomPasswordGenerator;
use flare_admin::infrastructure::store::memory::InMemoryDocumentStore;
use std::sync::Arc;

fn provisioner(auth: &MockAuthProvider, store: &InMemoryDocumentStore) -> ProvisionDriverUseCase {
    ProvisionDriverUseCase::new(
        Arc::new(auth.clone()),
        Arc::new(store.clone()),
        Arc::new(RandomPasswordGenerator::default()),
        common::test_verification_settings(),
    )
}

fn filled_form(station_id: &str, stations: &[FireStation]) -> ManageDriversState {
    ManageDriversState::default()
        .open_form()
        .edit(|form| {
            form.driver_name = "Juan Dela Cruz".to_string();
            form.driver_email = "juan@x.com".to_string();
            form.driver_contact = "0912".to_string();
        })
        .select_station(station_id, stations)
}

async fn loaded_stations(store: &InMemoryDocumentStore) -> Vec<FireStation> {
    LiveListing::<FireStation>::open(store, collections::FIRE_STATIONS)
        .await
        .unwrap()
        .snapshot()
}

#[tokio::test]
async fn test_provision_juan_dela_cruz_at_s1() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();
    let s1 = common::seed_station(&store, "S1", "s1@flare.test", None, 5).await;
    let stations = loaded_stations(&store).await;

    let (screen, result) = filled_form(&s1, &stations)
        .submit(true, &provisioner(&auth, &store))
        .await;

    let driver = result.expect("Driver should be provisioned");
    assert_eq!(driver.full_name, "Juan Dela Cruz");
    assert_eq!(driver.station_id, s1);
    assert_eq!(driver.station_name, "S1");
    assert_eq!(driver.status, "Active");
    assert!(!driver.auth_uid.is_empty());
    assert!(!driver.password.is_empty());

    assert_eq!(screen.phase, Phase::Idle);
    assert!(!screen.show_modal);
    assert!(!screen.is_loading);
    assert_eq!(
        screen.notice,
        Some(Notice::Success(DRIVER_CREATED_MESSAGE.to_string()))
    );
    assert!(screen.form.driver_name.is_empty());
    assert_eq!(screen.form.status, "Active");

    let stored = store
        .query_equals(collections::DRIVERS, "stationId", &s1)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    let stored: Driver = stored[0].clone().into_record(collections::DRIVERS).unwrap();
    assert_eq!(stored.auth_uid, auth.credentials().await[0].uid);
    assert_eq!(stored.password, driver.password);
}

#[tokio::test]
async fn test_provision_sends_exactly_one_verification() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();

    let (_, result) = filled_form("S1", &[])
        .submit(true, &provisioner(&auth, &store))
        .await;
    let driver = result.unwrap();

    let verifications = auth.verifications().await;
    assert_eq!(verifications.len(), 1);
    assert_eq!(verifications[0].0, driver.auth_uid);
    assert_eq!(verifications[0].1, common::test_verification_settings());
    assert_eq!(auth.credentials().await.len(), 1);
    assert_eq!(store.count(collections::DRIVERS).await, 1);
}

#[tokio::test]
async fn test_unknown_station_gets_empty_name() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();
    common::seed_station(&store, "Central", "central@flare.test", None, 5).await;
    let stations = loaded_stations(&store).await;

    let (_, result) = filled_form("not-loaded", &stations)
        .submit(true, &provisioner(&auth, &store))
        .await;

    let driver = result.unwrap();
    assert_eq!(driver.station_id, "not-loaded");
    assert_eq!(driver.station_name, "");
}

#[tokio::test]
async fn test_whitespace_field_has_no_side_effects() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();

    let screen = filled_form("S1", &[]).edit(|form| form.driver_contact = "   ".to_string());
    let (screen, result) = screen.submit(true, &provisioner(&auth, &store)).await;

    assert!(matches!(result, Err(ProvisioningError::MissingFields)));
    assert_eq!(screen.phase, Phase::FormOpen);
    assert_eq!(
        screen.notice,
        Some(Notice::Invalid("Please fill in all required fields.".to_string()))
    );
    assert!(auth.credentials().await.is_empty());
    assert_eq!(store.count(collections::DRIVERS).await, 0);
}

#[tokio::test]
async fn test_declined_confirmation_has_no_side_effects() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();

    let (screen, result) = filled_form("S1", &[])
        .submit(false, &provisioner(&auth, &store))
        .await;

    assert!(matches!(result, Err(ProvisioningError::Declined)));
    assert_eq!(screen.phase, Phase::FormOpen);
    assert_eq!(screen.form.driver_name, "Juan Dela Cruz");
    assert!(auth.credentials().await.is_empty());
    assert_eq!(store.count(collections::DRIVERS).await, 0);
}

#[tokio::test]
async fn test_credential_failure_keeps_form_and_writes_nothing() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::failing_credentials("EMAIL_EXISTS");

    let (screen, result) = filled_form("S1", &[])
        .submit(true, &provisioner(&auth, &store))
        .await;

    assert!(matches!(result, Err(ProvisioningError::Auth(_))));
    assert_eq!(screen.phase, Phase::FormOpen);
    assert!(screen.show_modal);
    assert!(!screen.is_loading);
    assert_eq!(screen.notice, Some(Notice::Error("EMAIL_EXISTS".to_string())));
    assert_eq!(screen.form.driver_email, "juan@x.com");
    assert_eq!(store.count(collections::DRIVERS).await, 0);
}

#[tokio::test]
async fn test_verification_failure_orphans_credential() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::failing_verification("TOO_MANY_ATTEMPTS_TRY_LATER");

    let (screen, result) = filled_form("S1", &[])
        .submit(true, &provisioner(&auth, &store))
        .await;

    assert!(matches!(result, Err(ProvisioningError::Auth(_))));
    assert_eq!(
        screen.notice,
        Some(Notice::Error("TOO_MANY_ATTEMPTS_TRY_LATER".to_string()))
    );
    assert_eq!(auth.credentials().await.len(), 1);
    assert_eq!(store.count(collections::DRIVERS).await, 0);
}

#[tokio::test]
async fn test_store_failure_orphans_credential() {
    let auth = MockAuthProvider::default();
    let use_case = ProvisionDriverUseCase::new(
        Arc::new(auth.clone()),
        Arc::new(UnavailableDocumentStore),
        Arc::new(RandomPasswordGenerator::default()),
        common::test_verification_settings(),
    );

    let (screen, result) = filled_form("S1", &[]).submit(true, &use_case).await;

    assert!(matches!(result, Err(ProvisioningError::Store(_))));
    assert_eq!(screen.phase, Phase::FormOpen);
    assert!(!screen.is_loading);
    assert_eq!(auth.credentials().await.len(), 1);
    assert_eq!(auth.verifications().await.len(), 1);
}

#[tokio::test]
async fn test_retry_after_failure_reuses_entered_values() {
    let store = InMemoryDocumentStore::new();
    let auth = MockAuthProvider::default();
    let use_case = provisioner(&auth, &store);

    let (_, first) = filled_form("S1", &[]).submit(true, &use_case).await;
    assert!(first.is_ok());

    // The same email again is rejected by the provider
    let (screen, second) = filled_form("S1", &[])
        .edit(|form| form.driver_name = "Juan Again".to_string())
        .submit(true, &use_case)
        .await;
    assert!(matches!(second, Err(ProvisioningError::Auth(_))));
    assert_eq!(screen.form.driver_name, "Juan Again");

    let (screen, third) = screen
        .edit(|form| form.driver_email = "juan.again@x.com".to_string())
        .submit(true, &use_case)
        .await;
    assert!(third.is_ok());
    assert_eq!(screen.phase, Phase::Idle);
    assert_eq!(store.count(collections::DRIVERS).await, 2);
}
