use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Cookie request failed: {source}")]
    Authentication {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}")]
    Fetch { url: String, status: StatusCode },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScraperError::Authentication { .. } => ErrorCategory::Authentication,
            ScraperError::Fetch { .. } | ScraperError::Api(_) => ErrorCategory::Network,
            ScraperError::Csv(_) | ScraperError::Serialization(_) => ErrorCategory::Data,
            ScraperError::InvalidConfigValue { .. } | ScraperError::MissingConfig { .. } => {
                ErrorCategory::Config
            }
            ScraperError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Network | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Authentication => {
                "Check that the cookie endpoint is reachable; the API may be down or rate limiting"
            }
            ErrorCategory::Network => {
                "Check the network connection and the root URL, then run again"
            }
            ErrorCategory::Data => "The API response or output data could not be processed; rerun with --verbose for details",
            ErrorCategory::Config => "Fix the command line arguments and run again",
            ErrorCategory::System => "Check the output path exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScraperError::Authentication { .. } => {
                "Could not obtain an authentication cookie from the leaders API".to_string()
            }
            ScraperError::Fetch { url, status } => {
                format!("The leaders API rejected the request to {} ({})", url, status)
            }
            ScraperError::Api(_) => "The leaders API could not be reached".to_string(),
            other => other.to_string(),
        }
    }
}
