use std::env;

use crate::constants::limits::DEFAULT_EXPIRY_POLL_SECONDS;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    pub guild_id: Option<u64>,
    /// Poll interval of the expiry scheduler in seconds
    pub expiry_poll_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let expiry_poll_seconds = env::var("EXPIRY_POLL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_POLL_SECONDS);

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            expiry_poll_seconds,
        })
    }
}
