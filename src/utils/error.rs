use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("Catalog request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, PosError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PosError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PosError::ApiError(_) => ErrorCategory::Network,
            PosError::CsvError(_) | PosError::SerializationError(_) | PosError::CatalogError { .. } => {
                ErrorCategory::Data
            }
            PosError::IoError(_) => ErrorCategory::Storage,
            PosError::ConfigValidationError { .. }
            | PosError::InvalidConfigValueError { .. }
            | PosError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PosError::InvalidInput { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PosError::InvalidInput { .. } | PosError::ApiError(_) | PosError::CatalogError { .. } => {
                ErrorSeverity::Medium
            }
            PosError::CsvError(_)
            | PosError::SerializationError(_)
            | PosError::ConfigValidationError { .. }
            | PosError::InvalidConfigValueError { .. }
            | PosError::MissingConfigError { .. } => ErrorSeverity::High,
            PosError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the catalog endpoint, then retry",
            ErrorCategory::Data => "Check that the catalog rows have name, price and unit columns",
            ErrorCategory::Storage => "Check that the file exists and is readable",
            ErrorCategory::Configuration => "Review the configuration file and command line flags",
            ErrorCategory::Input => "Check the PLU and amount you entered",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PosError::ApiError(_) => "Could not reach the product catalog".to_string(),
            PosError::CsvError(_) | PosError::SerializationError(_) => {
                "The product catalog could not be read".to_string()
            }
            PosError::IoError(e) => format!("File access failed: {}", e),
            PosError::CatalogError { message } => format!("Catalog unavailable: {}", message),
            PosError::ConfigValidationError { field, .. }
            | PosError::InvalidConfigValueError { field, .. }
            | PosError::MissingConfigError { field } => {
                format!("Configuration problem with '{}'", field)
            }
            PosError::InvalidInput { field, reason, .. } => format!("Invalid {}: {}", field, reason),
        }
    }
}
