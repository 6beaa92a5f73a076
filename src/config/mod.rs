//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database path or URL
    /// Use DATABASE_PATH, or DATABASE_URL with a sqlite: prefix
    pub database_url: String,

    /// Video library root path
    pub media_path: String,

    /// Cron expression for the periodic library maintenance job
    pub maintenance_cron: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/mediavault.db".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            media_path: env::var("MEDIA_PATH").unwrap_or_else(|_| "./data/media".to_string()),

            // Hourly by default, matching the post-download cleanup cadence
            maintenance_cron: env::var("MAINTENANCE_CRON")
                .unwrap_or_else(|_| "0 0 * * * *".to_string()),
        })
    }
}
