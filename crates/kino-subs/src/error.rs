//! Error types for Kino Subs

use thiserror::Error;

/// Result type alias for caption operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caption error types
#[derive(Error, Debug)]
pub enum Error {
    // Fetch errors
    #[error("Subtitle fetch failed: [{code}] {message}")]
    Fetch { code: i32, message: String },

    #[error("Invalid subtitle source: {0}")]
    InvalidSource(String),

    // Parse errors
    #[error("Malformed timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Fetch { code, .. } => *code < 0 || (500..600).contains(code),
            Error::Timestamp(_) => true,
            _ => false,
        }
    }

    /// Returns the error code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Fetch { .. } => "FETCH",
            Error::InvalidSource(_) => "INVALID_SOURCE",
            Error::Timestamp(_) => "TIMESTAMP",
            Error::Network(_) => "NETWORK",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Json(_) => "JSON",
            Error::Io(_) => "IO",
        }
    }
}

/// A timestamp that could not be converted to seconds.
///
/// Never fatal to a parse: the parser records it and substitutes `0.0`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("unsupported amount of time units in {input:?}: expected 2 or 3, got {found}")]
    UnitCount { input: String, found: usize },

    #[error("invalid time unit {unit:?} in {input:?}")]
    InvalidUnit { input: String, unit: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::Fetch { code: 404, message: "Not Found".into() };
        assert_eq!(err.error_code(), "FETCH");
        assert_eq!(err.to_string(), "Subtitle fetch failed: [404] Not Found");

        let err: Error = TimestampError::UnitCount { input: "5".into(), found: 1 }.into();
        assert_eq!(err.error_code(), "TIMESTAMP");
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::Fetch { code: 503, message: String::new() }.is_recoverable());
        assert!(Error::Fetch { code: -1, message: String::new() }.is_recoverable());
        assert!(!Error::Fetch { code: 404, message: String::new() }.is_recoverable());
        assert!(!Error::InvalidConfig("timeout".into()).is_recoverable());
    }
}
