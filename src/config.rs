//! # Bot Configuration Module
//!
//! Settings read from the environment (a `.env` file is loaded by `main`
//! before this runs). Database settings have defaults; the bot token and the
//! operator chat id are required.

use anyhow::{anyhow, Context, Result};
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use teloxide::types::ChatId;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "nef_user";
pub const DEFAULT_DB_NAME: &str = "nef_db";

/// PostgreSQL connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Build sqlx connect options without going through a URL, so passwords
    /// with reserved characters need no escaping
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Complete bot configuration
#[derive(Clone)]
pub struct BotConfig {
    pub database: DatabaseConfig,
    pub bot_token: String,
    /// Chat that receives relayed feedback
    pub operator_id: ChatId,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("DB_PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_DB_PORT,
        };

        let database = DatabaseConfig {
            host: or_default("DB_HOST", DEFAULT_DB_HOST),
            port,
            user: or_default("DB_USER", DEFAULT_DB_USER),
            password: or_default("DB_PASSWORD", ""),
            name: or_default("DB_NAME", DEFAULT_DB_NAME),
        };

        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        let raw_operator = lookup("OPERATOR_ID").ok_or_else(|| anyhow!("OPERATOR_ID must be set"))?;
        let operator_id = raw_operator
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .with_context(|| {
                format!("OPERATOR_ID must be an integer chat id, got {raw_operator:?}")
            })?;

        Ok(Self {
            database,
            bot_token,
            operator_id,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("database", &self.database)
            .field("bot_token", &"<redacted>")
            .field("operator_id", &self.operator_id)
            .finish()
    }
}
