use crate::application::drivers::provision::ProvisionDriverUseCase;
use crate::application::listings::LiveListing;
use crate::domain::auth::AccessTokenService;
use crate::domain::documents::{DocumentStore, StoreError, collections};
use crate::domain::drivers::Driver;
use crate::domain::identity::{AuthProvider, VerificationSettings};
use crate::domain::password::InitialPasswordGenerator;
use crate::domain::stations::FireStation;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub passwords: Arc<dyn InitialPasswordGenerator>,
    pub verification: VerificationSettings,
    pub token_service: Arc<dyn AccessTokenService>,
    /// Live station listing, also the source of station display names.
    pub stations: Arc<LiveListing<FireStation>>,
    pub drivers: Arc<LiveListing<Driver>>,
}

impl AppState {
    /// Build the state and open the station and driver live listings.
    pub async fn new(
        store: Arc<dyn DocumentStore>,
        auth_provider: Arc<dyn AuthProvider>,
        passwords: Arc<dyn InitialPasswordGenerator>,
        verification: VerificationSettings,
        token_service: Arc<dyn AccessTokenService>,
    ) -> Result<Self, StoreError> {
        let stations = LiveListing::open(store.as_ref(), collections::FIRE_STATIONS).await?;
        let drivers = LiveListing::open(store.as_ref(), collections::DRIVERS).await?;

        Ok(Self {
            store,
            auth_provider,
            passwords,
            verification,
            token_service,
            stations: Arc::new(stations),
            drivers: Arc::new(drivers),
        })
    }

    pub fn provision_use_case(&self) -> ProvisionDriverUseCase {
        ProvisionDriverUseCase::new(
            self.auth_provider.clone(),
            self.store.clone(),
            self.passwords.clone(),
            self.verification.clone(),
        )
    }
}
