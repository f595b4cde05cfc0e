use std::env;

use chrono::{FixedOffset, Offset, Utc};

/// Error raised when the environment does not describe a runnable relay.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which record store backend the relay talks to.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    /// Hosted PostgREST endpoint (Supabase), reached over HTTPS with an access key.
    Rest { url: String, key: String },
    /// Direct Postgres connection.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_ids: Vec<String>,
    pub telegram_api_url: String,
    pub telegram_webhook_secret: Option<String>,
    pub store: StoreConfig,
    pub host: String,
    pub port: u16,
    pub display_utc_offset_hours: i32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_ids = parse_chat_ids(&required("TELEGRAM_CHAT_IDS")?);
        if telegram_chat_ids.is_empty() {
            return Err(ConfigError::Invalid {
                name: "TELEGRAM_CHAT_IDS",
                reason: "no chat id listed".to_string(),
            });
        }

        let backend = var("STORE_BACKEND").unwrap_or_else(|| "rest".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "rest" | "supabase" => StoreConfig::Rest {
                url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                key: required("SUPABASE_KEY")?,
            },
            "postgres" => StoreConfig::Postgres {
                database_url: required("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", var("DATABASE_MAX_CONNECTIONS"), 5)?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    reason: format!("unknown backend '{other}' (expected 'rest' or 'postgres')"),
                })
            }
        };

        let display_utc_offset_hours =
            parse_or("DISPLAY_UTC_OFFSET_HOURS", var("DISPLAY_UTC_OFFSET_HOURS"), 7)?;
        if !(-23..=23).contains(&display_utc_offset_hours) {
            return Err(ConfigError::Invalid {
                name: "DISPLAY_UTC_OFFSET_HOURS",
                reason: format!("{display_utc_offset_hours} is outside -23..=23"),
            });
        }

        Ok(Self {
            telegram_bot_token,
            telegram_chat_ids,
            telegram_api_url: var("TELEGRAM_API_URL")
                .unwrap_or_else(|| "https://api.telegram.org".to_string())
                .trim_end_matches('/')
                .to_string(),
            telegram_webhook_secret: var("TELEGRAM_WEBHOOK_SECRET"),
            store,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", var("PORT"), 3003)?,
            display_utc_offset_hours,
        })
    }

    /// Offset used when rendering timestamps in chat messages.
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display_utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn parse_chat_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
