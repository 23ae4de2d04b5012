//! # Client Configuration
//!
//! Settings are read from environment variables (a `.env` file is loaded by
//! the binary before this runs):
//!
//! - `SALONBOOK_API_URL`: base URL of the booking backend (required)
//! - `SALONBOOK_TOKEN`: bearer token for authenticated calls
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `SALONBOOK_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `SALONBOOK_TIMEZONE`: IANA timezone of the salon (default: "UTC")

use std::env;

use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use tracing::Level;

use crate::session::Session;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub api_url: String,

    /// Bearer token, if the user is signed in
    pub token: Option<String>,

    pub log_level: Level,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone that schedule times and time blocks are entered in
    pub timezone: Tz,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
            log_level: Level::INFO,
            request_timeout: 30,
            timezone: chrono_tz::UTC,
        }
    }

    /// # Errors
    ///
    /// Fails if `SALONBOOK_API_URL` is missing or `SALONBOOK_TIMEZONE` is not
    /// a known IANA timezone.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("SALONBOOK_API_URL")
            .wrap_err("SALONBOOK_API_URL environment variable must be set")?;

        let token = env::var("SALONBOOK_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        let request_timeout = env::var("SALONBOOK_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let timezone = env::var("SALONBOOK_TIMEZONE")
            .unwrap_or_else(|_| "UTC".to_string())
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid SALONBOOK_TIMEZONE value: {}", e))?;

        Ok(Self {
            token,
            log_level,
            request_timeout,
            timezone,
            ..Self::new(api_url)
        })
    }

    pub fn session(&self) -> Session {
        match &self.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::anonymous(),
        }
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
