use crate::domain::identity::{AuthError, AuthProvider, Credential, VerificationSettings};
use crate::infrastructure::config::FirebaseSettings;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Authentication provider backed by the Firebase Identity Toolkit REST API.
#[derive(Clone)]
pub struct FirebaseAuthProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendOobCodeRequest<'a> {
    request_type: &'static str,
    id_token: &'a str,
    continue_url: &'a str,
    can_handle_code_in_app: bool,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuthProvider {
    pub fn new(settings: &FirebaseSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &FirebaseSettings) -> Self {
        Self {
            client,
            base_url: settings.auth_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, AuthError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/v1/accounts:{}", self.base_url, method);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(format!("Identity Toolkit unreachable: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| AuthError::Unavailable(format!("Invalid Identity Toolkit response: {}", e)));
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => Err(AuthError::rejected(envelope.error.message)),
            Err(_) => Err(AuthError::Unavailable(format!(
                "Identity Toolkit returned {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuthProvider {
    #[tracing::instrument(skip(self, password))]
    async fn create_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Credential, AuthError> {
        let response: SignUpResponse = self
            .call(
                "signUp",
                &SignUpRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        Ok(Credential {
            uid: response.local_id,
            email: response.email.unwrap_or_else(|| email.to_string()),
            id_token: response.id_token,
        })
    }

    #[tracing::instrument(skip(self, credential), fields(uid = %credential.uid))]
    async fn send_verification_email(
        &self,
        credential: &Credential,
        settings: &VerificationSettings,
    ) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .call(
                "sendOobCode",
                &SendOobCodeRequest {
                    request_type: "VERIFY_EMAIL",
                    id_token: &credential.id_token,
                    continue_url: &settings.continue_url,
                    can_handle_code_in_app: settings.handle_code_in_app,
                },
            )
            .await?;

        Ok(())
    }
}
