use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Realtime error: {0}")]
    Realtime(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Server answered, but not with success
    pub fn is_server_error(&self) -> bool {
        matches!(self, AppError::Http { .. })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::Http {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert!(err.is_server_error());

        let err = AppError::Realtime("EventSource rejected URL".to_string());
        assert_eq!(err.to_string(), "Realtime error: EventSource rejected URL");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_from_serde() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = crate::config::ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: unknown log level: loud");
    }
}
