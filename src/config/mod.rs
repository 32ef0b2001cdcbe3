use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Name of the env var holding the token signing secret
pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be provided as a non-empty environment variable")]
    MissingSecret(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HS256 signing secret, fixed for the life of the process
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub enable_cors: bool,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("enable_cors", &self.enable_cors)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. A missing or empty
    /// `JWT_SECRET` is an error; every other setting falls back to the
    /// profile default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = lookup(JWT_SECRET_ENV_VAR)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret(JWT_SECRET_ENV_VAR))?;

        let config = match environment {
            Environment::Production => Self::production(jwt_secret),
            Environment::Staging => Self::staging(jwt_secret),
            Environment::Development => Self::development(jwt_secret),
        };

        Ok(config.with_overrides(lookup))
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // API overrides
        if let Some(v) = lookup("TODO_API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    fn development(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 3000,
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret,
                enable_cors: true,
            },
        }
    }

    fn staging(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                port: 3000,
                request_timeout_secs: 15,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret,
                enable_cors: true,
            },
        }
    }

    fn production(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 3000,
                request_timeout_secs: 10,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret,
                enable_cors: false,
            },
        }
    }
}
