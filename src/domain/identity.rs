use async_trait::async_trait;
use thiserror::Error;

/// An account held by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub uid: String,
    pub email: String,
    /// Provider session token used to act on behalf of the new account.
    pub id_token: String,
}

/// Options passed along with a verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSettings {
    pub continue_url: String,
    pub handle_code_in_app: bool,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The provider refused the request.
    #[error("{message}")]
    Rejected { code: String, message: String },
    #[error("{0}")]
    Unavailable(String),
}

impl AuthError {
    /// Build a rejection from a provider message such as
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = message
            .split(|c: char| c == ' ' || c == ':')
            .next()
            .unwrap_or_default()
            .to_string();

        AuthError::Rejected { code, message }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_credential(&self, email: &str, password: &str)
    -> Result<Credential, AuthError>;

    async fn send_verification_email(
        &self,
        credential: &Credential,
        settings: &VerificationSettings,
    ) -> Result<(), AuthError>;
}
