use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Report processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeadError::IoError(_) => ErrorCategory::Io,
            LeadError::CsvError(_)
            | LeadError::SerializationError(_)
            | LeadError::ProcessingError { .. } => ErrorCategory::Output,
            LeadError::ConfigValidationError { .. }
            | LeadError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 檔案不存在或無權限，使用者換個檔案即可
            LeadError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ErrorSeverity::Medium
            }
            LeadError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LeadError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input path points to an existing CSV file"
            }
            LeadError::IoError(_) => "Check file permissions and available disk space",
            LeadError::ConfigValidationError { .. } => {
                "Make sure the configuration file is valid TOML"
            }
            LeadError::InvalidConfigValueError { .. } => {
                "Fix the highlighted setting and run again"
            }
            LeadError::CsvError(_) | LeadError::SerializationError(_) => {
                "Try a different report format, e.g. --format text"
            }
            LeadError::ProcessingError { .. } => "Re-run with --verbose to see more detail",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeadError::IoError(e) => format!("Could not read the lead file: {}", e),
            LeadError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            LeadError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting {} = '{}' is not usable: {}", field, value, reason),
            other => format!("Could not produce the report: {}", other),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
