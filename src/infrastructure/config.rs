use crate::domain::identity::VerificationSettings;
use std::env;
use thiserror::Error;

pub const DEFAULT_FIREBASE_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_VERIFICATION_CONTINUE_URL: &str = "https://flare-tagum-web-app-51c7a.firebaseapp.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub auth_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtSettings {
    pub public_key_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub cors_allowed_origins: String,
    pub rate_limit_per_minute: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_allowed_origins: String::new(),
            rate_limit_per_minute: 60,
        }
    }
}

/// Service configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub pool: PoolSettings,
    pub firebase: FirebaseSettings,
    pub verification: VerificationSettings,
    pub jwt: JwtSettings,
    pub http: HttpSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store = match get("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let pool_defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", pool_defaults.max_connections)?,
            min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", pool_defaults.min_connections)?,
            acquire_timeout_secs: parse_or(
                &get,
                "DB_ACQUIRE_TIMEOUT_SECS",
                pool_defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: parse_or(
                &get,
                "DB_IDLE_TIMEOUT_SECS",
                pool_defaults.idle_timeout_secs,
            )?,
        };

        let firebase = FirebaseSettings {
            api_key: get("FIREBASE_API_KEY").ok_or(ConfigError::Missing("FIREBASE_API_KEY"))?,
            auth_base_url: get("FIREBASE_AUTH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FIREBASE_AUTH_BASE_URL.to_string()),
        };

        let verification = VerificationSettings {
            continue_url: get("VERIFICATION_CONTINUE_URL")
                .unwrap_or_else(|| DEFAULT_VERIFICATION_CONTINUE_URL.to_string()),
            handle_code_in_app: parse_or(&get, "VERIFICATION_HANDLE_IN_APP", false)?,
        };

        let jwt = JwtSettings {
            public_key_path: get("JWT_PUBLIC_KEY_PATH")
                .ok_or(ConfigError::Missing("JWT_PUBLIC_KEY_PATH"))?,
        };

        let http = HttpSettings {
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            rate_limit_per_minute: parse_or(&get, "RATE_LIMIT_PER_MINUTE", 60)?,
        };
        if http.rate_limit_per_minute == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_PER_MINUTE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            port: parse_or(&get, "PORT", 3000)?,
            store,
            pool,
            firebase,
            verification,
            jwt,
            http,
        })
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
