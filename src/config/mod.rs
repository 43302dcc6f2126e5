//! Configuration module for the Code Collabo backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Upper bound for a single persistence operation
    pub db_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("COLLABO_DB_PATH")
            .unwrap_or_else(|_| "./data/projects.sqlite".to_string())
            .into();

        let bind_addr = env::var("COLLABO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid COLLABO_BIND_ADDR format");

        let log_level = env::var("COLLABO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("COLLABO_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        // Zero or unparsable values fall back to the default
        let db_timeout_ms = env::var("COLLABO_DB_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(5_000);

        Self {
            db_path,
            bind_addr,
            log_level,
            log_json,
            db_timeout: Duration::from_millis(db_timeout_ms),
        }
    }

    /// Host used for hint URLs when a request carries no `Host` header.
    pub fn public_host(&self) -> String {
        self.bind_addr.to_string()
    }
}
