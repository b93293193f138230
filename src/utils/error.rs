use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("No receipt found for id {id}")]
    NotFound { id: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for `{field}` ({value}): {reason}")]
    ConfigValidation {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Storage,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReceiptError {
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::Persistence { .. } | Self::Io(_) => ErrorCategory::Storage,
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Config { .. } | Self::ConfigValidation { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無 id 屬正常結果
            Self::NotFound { .. } => ErrorSeverity::Low,
            Self::Validation { .. } => ErrorSeverity::Medium,
            Self::Config { .. } | Self::ConfigValidation { .. } => ErrorSeverity::High,
            Self::Persistence { .. } | Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Check that the id was returned by /receipts/process",
            ErrorCategory::Storage => {
                "Check that the database path is writable and not held open by another process"
            }
            ErrorCategory::Input => "Fix the submitted receipt and try again",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
        }
    }
}

impl From<sled::Error> for ReceiptError {
    fn from(err: sled::Error) -> Self {
        Self::persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
