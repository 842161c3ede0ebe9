use std::env;
use std::time::Duration;

use tracing::warn;

use crate::types::Tier;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Profiles API
    pub profiles_api_url: String,
    pub search_timeout: Duration,

    // Store
    pub database_url: Option<String>,
    pub ranking_limit: usize,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    /// Plan assigned to new visitor sessions.
    pub default_plan: Tier,
}

pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_RANKING_LIMIT: usize = 10;

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            profiles_api_url: required_env("PROFILES_API_URL"),
            search_timeout: Duration::from_secs(parsed_env(
                "SEARCH_TIMEOUT_SECS",
                DEFAULT_SEARCH_TIMEOUT_SECS,
            )),
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            ranking_limit: parsed_env("RANKING_LIMIT", DEFAULT_RANKING_LIMIT),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: parsed_env("WEB_PORT", 3000),
            default_plan: env::var("DEFAULT_PLAN")
                .ok()
                .and_then(|v| {
                    v.parse()
                        .map_err(|e| warn!(error = %e, "Ignoring DEFAULT_PLAN"))
                        .ok()
                })
                .unwrap_or_default(),
        }
    }

    /// Config pointing at a local profiles API, used by tests and examples.
    pub fn for_api(profiles_api_url: impl Into<String>) -> Self {
        Self {
            profiles_api_url: profiles_api_url.into(),
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            database_url: None,
            ranking_limit: DEFAULT_RANKING_LIMIT,
            web_host: "127.0.0.1".to_string(),
            web_port: 3000,
            default_plan: Tier::Free,
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number")),
        Err(_) => default,
    }
}
