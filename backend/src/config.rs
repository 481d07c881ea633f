//! Server configuration.
//!
//! Defaults can be overridden through environment variables:
//!
//! | Variable               | Default               |
//! |------------------------|-----------------------|
//! | `LIBRARY_DATABASE_URL` | `sqlite:library.db`   |
//! | `LIBRARY_BIND_ADDR`    | `127.0.0.1:5000`      |
//! | `LIBRARY_CORS_ORIGINS` | unset (any origin)    |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

const DEFAULT_DATABASE_URL: &str = "sqlite:library.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

pub const DATABASE_URL_VAR: &str = "LIBRARY_DATABASE_URL";
pub const BIND_ADDR_VAR: &str = "LIBRARY_BIND_ADDR";
pub const CORS_ORIGINS_VAR: &str = "LIBRARY_CORS_ORIGINS";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr_text = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_text
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, bind_addr_text))?;

        let cors_origins = match lookup(CORS_ORIGINS_VAR) {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .with_context(|| format!("{} has an invalid origin: {}", CORS_ORIGINS_VAR, origin))
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            database_url,
            bind_addr,
            cors_origins,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_origins: Vec::new(),
        }
    }
}
