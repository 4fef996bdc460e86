use crate::domain::documents::{Document, DocumentStore, StoreError, Subscription};
use crate::domain::identity::{AuthError, AuthProvider, Credential, VerificationSettings};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct MockAuthState {
    credentials: Vec<Credential>,
    verifications: Vec<(String, VerificationSettings)>,
}

/// Records every credential and verification email it is asked for.
/// Rejects duplicate emails with `EMAIL_EXISTS`, like the real provider.
#[derive(Clone, Default)]
pub struct MockAuthProvider {
    state: Arc<Mutex<MockAuthState>>,
    fail_credentials: Option<AuthError>,
    fail_verification: Option<AuthError>,
}

impl MockAuthProvider {
    pub fn failing_credentials(message: &str) -> Self {
        Self {
            fail_credentials: Some(AuthError::rejected(message)),
            ..Self::default()
        }
    }

    pub fn failing_verification(message: &str) -> Self {
        Self {
            fail_verification: Some(AuthError::rejected(message)),
            ..Self::default()
        }
    }

    pub async fn credentials(&self) -> Vec<Credential> {
        self.state.lock().await.credentials.clone()
    }

    /// Credential uid and settings of every verification email sent.
    pub async fn verifications(&self) -> Vec<(String, VerificationSettings)> {
        self.state.lock().await.verifications.clone()
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn create_credential(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<Credential, AuthError> {
        if let Some(err) = &self.fail_credentials {
            return Err(err.clone());
        }

        let mut state = self.state.lock().await;
        if state.credentials.iter().any(|c| c.email == email) {
            return Err(AuthError::rejected("EMAIL_EXISTS"));
        }

        let credential = Credential {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            id_token: Uuid::new_v4().to_string(),
        };
        state.credentials.push(credential.clone());
        Ok(credential)
    }

    async fn send_verification_email(
        &self,
        credential: &Credential,
        settings: &VerificationSettings,
    ) -> Result<(), AuthError> {
        if let Some(err) = &self.fail_verification {
            return Err(err.clone());
        }

        self.state
            .lock()
            .await
            .verifications
            .push((credential.uid.clone(), settings.clone()));
        Ok(())
    }
}

/// A store whose backend is always down.
#[derive(Clone, Copy, Default)]
pub struct UnavailableDocumentStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable("Document store unavailable".to_string())
}

#[async_trait]
impl DocumentStore for UnavailableDocumentStore {
    async fn insert(
        &self,
        _collection: &str,
        _data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        Err(unavailable())
    }

    async fn query_equals(
        &self,
        _collection: &str,
        _field: &str,
        _value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        Err(unavailable())
    }

    async fn subscribe_ordered_desc(
        &self,
        _collection: &str,
        _field: &str,
    ) -> Result<Subscription, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
