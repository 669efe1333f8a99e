use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to read source document {}: {source}", .path.display())]
    SourceReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse source document {}: {source}", .path.display())]
    SourceParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid source document: {message}")]
    InvalidDocumentError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The run was refused because of bad input or settings.
    High,
    /// The filesystem failed underneath us.
    Critical,
}

impl SplitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitError::SourceReadError { .. }
            | SplitError::SourceParseError { .. }
            | SplitError::InvalidDocumentError { .. } => ErrorCategory::Input,
            SplitError::SerializationError(_) | SplitError::OutputWriteError { .. } => {
                ErrorCategory::Output
            }
            SplitError::ConfigError { .. }
            | SplitError::ConfigValidationError { .. }
            | SplitError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SplitError::SourceReadError { .. } | SplitError::OutputWriteError { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SplitError::SourceReadError { path, .. } => {
                format!("Cannot read compose file {}", path.display())
            }
            SplitError::SourceParseError { path, source } => {
                format!("Compose file {} is not valid YAML: {}", path.display(), source)
            }
            SplitError::InvalidDocumentError { message } => {
                format!("Compose file has an unexpected shape: {}", message)
            }
            SplitError::OutputWriteError { path, .. } => {
                format!("Cannot write {}", path.display())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that the compose file exists and parses with `docker compose config`"
            }
            ErrorCategory::Output => {
                "Check that the output directory is writable and the disk is not full"
            }
            ErrorCategory::Configuration => {
                "Check the command line flags and the extraction table file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
