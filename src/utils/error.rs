use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl StudioError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StudioError::ValidationError { .. } => ErrorSeverity::Low,
            StudioError::ConfigError { .. }
            | StudioError::InvalidConfigValueError { .. }
            | StudioError::SerializationError(_) => ErrorSeverity::High,
            StudioError::IoError(_) | StudioError::StorageError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StudioError::IoError(e) => format!("Could not access the draft file: {}", e),
            StudioError::SerializationError(_) => "The draft could not be encoded".to_string(),
            StudioError::ConfigError { message } => format!("Configuration problem: {}", message),
            StudioError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            StudioError::StorageError { message } => format!("Draft storage failed: {}", message),
            StudioError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StudioError::IoError(_) | StudioError::StorageError { .. } => {
                "Check that the storage directory exists and is writable"
            }
            StudioError::SerializationError(_) => "Report the section content that triggered this",
            StudioError::ConfigError { .. } | StudioError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and retry"
            }
            StudioError::ValidationError { .. } => "Adjust the input and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
