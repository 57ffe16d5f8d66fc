//! Configuration loading and representation.
//!
//! Everything comes from the process environment:
//!
//! | variable | default |
//! |---|---|
//! | `STOCKROOM_BIND` | `0.0.0.0:8080` |
//! | `DATABASE_URL` | unset: in-memory store |
//! | `STOCKROOM_API_KEY` | unset: every caller may mutate |
//! | `STOCKROOM_LOG_FORMAT` | `json` |

use std::net::SocketAddr;

use thiserror::Error;

use stockroom_observability::LogFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid STOCKROOM_BIND {value:?}: {source}")]
    Bind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid STOCKROOM_LOG_FORMAT: {0}")]
    LogFormat(#[from] stockroom_observability::UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    /// Postgres connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Key expected in `X-Api-Key` for mutating requests, trimmed; `None` disables the check.
    pub api_key: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = var("STOCKROOM_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::Bind {
                value: bind_raw.clone(),
                source,
            })?;

        let log_format = match var("STOCKROOM_LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind,
            database_url: var("DATABASE_URL"),
            api_key: var("STOCKROOM_API_KEY").map(|k| k.trim().to_string()),
            log_format,
        })
    }
}
