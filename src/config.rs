//! Runtime configuration
//!
//! Values are baked in at build time (`WA_INBOX_*` environment variables) since
//! the bundle runs in a browser with no process environment of its own.

use once_cell::sync::Lazy;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_BUSINESS_WA_ID: &str = "918329446654";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Path appended to the API origin when no realtime URL is configured
const REALTIME_PATH: &str = "/events";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("business WhatsApp id must be non-empty digits, got {0:?}")]
    InvalidBusinessId(String),

    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base for every HTTP endpoint, without trailing slash
    pub api_base_url: String,
    /// SSE endpoint of the push server
    pub realtime_url: String,
    /// The number that owns the inbox; decides who "the other participant" is
    pub business_wa_id: String,
    pub log_level: tracing::Level,
}

static CURRENT: Lazy<AppConfig> = Lazy::new(|| AppConfig::from_build_env().0);

impl AppConfig {
    /// Process-wide configuration, resolved on first access
    pub fn current() -> &'static AppConfig {
        &CURRENT
    }

    /// Values baked in by the `WA_INBOX_*` variables at compile time, plus the
    /// problems found in them
    pub fn from_build_env() -> (Self, Vec<ConfigError>) {
        Self::resolve(
            option_env!("WA_INBOX_API_BASE_URL"),
            option_env!("WA_INBOX_REALTIME_URL"),
            option_env!("WA_INBOX_BUSINESS_WA_ID"),
            option_env!("WA_INBOX_LOG"),
        )
    }

    /// Strict variant: the first invalid value is an error
    pub fn from_values(
        api_base_url: Option<&str>,
        realtime_url: Option<&str>,
        business_wa_id: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let (config, errors) = Self::resolve(api_base_url, realtime_url, business_wa_id, log_level);
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(config),
        }
    }

    /// Each invalid value falls back to its own default; valid ones are kept
    pub fn resolve(
        api_base_url: Option<&str>,
        realtime_url: Option<&str>,
        business_wa_id: Option<&str>,
        log_level: Option<&str>,
    ) -> (Self, Vec<ConfigError>) {
        let mut errors = Vec::new();
        let mut keep = |result: Result<String, ConfigError>, fallback: String| {
            result.unwrap_or_else(|e| {
                errors.push(e);
                fallback
            })
        };

        let api_base_url = match api_base_url {
            Some(url) => keep(
                normalize_url("WA_INBOX_API_BASE_URL", url),
                DEFAULT_API_BASE_URL.to_string(),
            ),
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let realtime_url = match realtime_url {
            Some(url) => keep(
                normalize_url("WA_INBOX_REALTIME_URL", url),
                default_realtime_url(&api_base_url),
            ),
            None => default_realtime_url(&api_base_url),
        };

        let business_wa_id = keep(
            parse_business_id(business_wa_id.unwrap_or(DEFAULT_BUSINESS_WA_ID)),
            DEFAULT_BUSINESS_WA_ID.to_string(),
        );

        let level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
        let log_level = level.trim().parse::<tracing::Level>().unwrap_or_else(|_| {
            errors.push(ConfigError::InvalidLogLevel(level.to_string()));
            tracing::Level::INFO
        });

        let config = Self {
            api_base_url,
            realtime_url,
            business_wa_id,
            log_level,
        };
        (config, errors)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            realtime_url: default_realtime_url(DEFAULT_API_BASE_URL),
            business_wa_id: DEFAULT_BUSINESS_WA_ID.to_string(),
            log_level: tracing::Level::INFO,
        }
    }
}

fn parse_business_id(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidBusinessId(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if !has_host {
        return Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// The push server lives at the API origin, not under `/api`
fn default_realtime_url(api_base_url: &str) -> String {
    let origin = api_base_url.strip_suffix("/api").unwrap_or(api_base_url);
    format!("{}{}", origin, REALTIME_PATH)
}
