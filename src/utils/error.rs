use crate::domain::model::BlockError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Page fetch failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Item block {index} could not be parsed: {reason}")]
    ParseError { index: usize, reason: BlockError },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration for '{field}': environment variable {variable} is not set")]
    MissingConfigError { field: String, variable: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Storage,
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FetchError(_) => ErrorCategory::Network,
            EtlError::ParseError { .. } => ErrorCategory::Parsing,
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::FetchError(e) if e.is_timeout() => {
                "The request timed out; raise --timeout-secs or check the site".to_string()
            }
            EtlError::FetchError(e) if e.is_status() => {
                "The server rejected the request; check that the URL is still valid".to_string()
            }
            EtlError::FetchError(_) => "Check network connectivity and the target URL".to_string(),
            EtlError::ParseError { .. } => {
                "The page layout may have changed; review the selectors or use --on-missing-field skip"
                    .to_string()
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            EtlError::MissingConfigError { variable, .. } => {
                format!("Export {} or replace it with a literal value", variable)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the page: {}", self),
            ErrorCategory::Parsing => format!("Could not read the page markup: {}", self),
            ErrorCategory::Storage => format!("Could not save the results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
