//! Application configuration

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Database URL; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// Password for the BANK fee account if it has to be created
    pub bank_password: Option<String>,
    /// Verbose logging
    pub debug: bool,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            bank_password: env::var("BANK_PASSWORD").ok().filter(|p| !p.is_empty()),
            debug: env::var("DEBUG").map(|v| v == "1").unwrap_or(false),
        }
    }

    /// Default listening address for the configured port
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
