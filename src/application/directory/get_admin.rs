use crate::domain::admins::Admin;
use crate::domain::documents::{DocumentStore, StoreError, collections};
use std::sync::Arc;

pub struct GetAdminByEmailUseCase {
    store: Arc<dyn DocumentStore>,
}

impl GetAdminByEmailUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// First admin whose email matches, if any.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let matches = self
            .store
            .query_equals(collections::ADMINS, "email", email)
            .await?;

        matches
            .into_iter()
            .next()
            .map(|doc| doc.into_record(collections::ADMINS))
            .transpose()
    }
}
