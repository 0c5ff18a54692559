use std::env;

use axum::http::HeaderValue;
use prompt_service::{CompletionConfig, StartupError};

/// Serialized pages routinely exceed axum's 2 MB default.
pub const DEFAULT_MAX_PAGE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; any origin when unset.
    pub client_origin: Option<HeaderValue>,
    /// Upper bound on a `/prompt` request body.
    pub max_page_bytes: usize,
    pub completion: CompletionConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URL"))
            .ok_or(StartupError::MissingEnv("DATABASE_URL"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| StartupError::InvalidEnv {
                name: "PORT",
                reason: format!("{e}"),
            })?,
            None => 3000,
        };

        let max_page_bytes = match lookup("MAX_PAGE_BYTES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(StartupError::InvalidEnv {
                        name: "MAX_PAGE_BYTES",
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(bytes) => bytes,
                Err(e) => {
                    return Err(StartupError::InvalidEnv {
                        name: "MAX_PAGE_BYTES",
                        reason: format!("{e}"),
                    })
                }
            },
            None => DEFAULT_MAX_PAGE_BYTES,
        };

        let client_origin = lookup("CLIENT_URL")
            .map(|url| {
                url.parse::<HeaderValue>().map_err(|e| StartupError::InvalidEnv {
                    name: "CLIENT_URL",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            database_url,
            host,
            port,
            client_origin,
            max_page_bytes,
            completion: CompletionConfig::from_lookup(&lookup)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
