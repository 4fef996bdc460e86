use anyhow::Result;
use serde::{Deserialize, Serialize};

/// JWT Claims carried by admin access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin email)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Token type, always "access"
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}

/// Verification of admin access tokens
pub trait AccessTokenService: Send + Sync {
    /// Validate and decode a token
    fn validate_token(&self, token: &str) -> Result<Claims>;
}
