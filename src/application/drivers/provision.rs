use crate::application::drivers::form::{DriverForm, MISSING_FIELDS_MESSAGE};
use crate::domain::documents::{DocumentStore, StoreError, collections};
use crate::domain::drivers::{Driver, NewDriver};
use crate::domain::identity::{AuthError, AuthProvider, Credential, VerificationSettings};
use crate::domain::password::InitialPasswordGenerator;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,
    #[error("Driver creation was not confirmed")]
    Declined,
    #[error("Driver form is not open")]
    FormClosed,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates the credential, sends the verification email and writes the
/// driver document, in that order.
///
/// Steps are not compensated: a failure after the credential exists leaves
/// the credential in place without a driver document.
pub struct ProvisionDriverUseCase {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    passwords: Arc<dyn InitialPasswordGenerator>,
    verification: VerificationSettings,
}

impl ProvisionDriverUseCase {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        passwords: Arc<dyn InitialPasswordGenerator>,
        verification: VerificationSettings,
    ) -> Self {
        Self {
            auth,
            store,
            passwords,
            verification,
        }
    }

    /// Run the provider steps for an already validated form.
    #[tracing::instrument(skip(self, form), fields(email = %form.driver_email, station_id = %form.selected_station_id))]
    pub async fn execute(&self, form: &DriverForm) -> Result<Driver, ProvisioningError> {
        let password = self.passwords.generate();

        let credential = self
            .auth
            .create_credential(&form.driver_email, &password)
            .await?;
        tracing::info!(auth_uid = %credential.uid, "Credential created");

        match self.verify_and_record(&credential, form, password).await {
            Ok(driver) => {
                tracing::info!(driver_id = %driver.id, auth_uid = %driver.auth_uid, "Driver provisioned");
                Ok(driver)
            }
            Err(e) => {
                tracing::warn!(
                    auth_uid = %credential.uid,
                    error = %e,
                    "Provisioning failed after credential creation, credential has no driver record"
                );
                Err(e)
            }
        }
    }

    async fn verify_and_record(
        &self,
        credential: &Credential,
        form: &DriverForm,
        password: String,
    ) -> Result<Driver, ProvisioningError> {
        self.auth
            .send_verification_email(credential, &self.verification)
            .await?;

        let new_driver = NewDriver {
            full_name: form.driver_name.clone(),
            email: form.driver_email.clone(),
            contact: form.driver_contact.clone(),
            station_id: form.selected_station_id.clone(),
            station_name: form.selected_station_name.clone(),
            status: form.status.clone(),
            auth_uid: credential.uid.clone(),
            created_at: OffsetDateTime::now_utc(),
            password,
        };

        let id = self
            .store
            .insert(collections::DRIVERS, new_driver.to_document()?)
            .await?;

        Ok(new_driver.into_driver(id))
    }
}
