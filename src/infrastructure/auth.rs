use crate::domain::auth::{AccessTokenService, Claims};
use crate::infrastructure::config::JwtSettings;
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use std::fs;

/// Verifies ES256 admin access tokens minted by the dispatch web application.
pub struct JwtAuthService {
    decoding_key: DecodingKey,
}

impl JwtAuthService {
    /// Create a new JWT service by loading the public key from file
    pub fn from_settings(settings: &JwtSettings) -> Result<Self> {
        let public_key_pem = fs::read(&settings.public_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?;

        Self::new_from_key(&public_key_pem)
    }

    /// Create a new JWT service from key content
    pub fn new_from_key(public_key_pem: &[u8]) -> Result<Self> {
        let decoding_key = DecodingKey::from_ec_pem(public_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self { decoding_key })
    }
}

impl AccessTokenService for JwtAuthService {
    fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::ES256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
