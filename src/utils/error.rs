use thiserror::Error;

#[derive(Error, Debug)]
pub enum HktError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Token signing failed: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Base64 decoding failed: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Google Drive request failed ({status}): {message}")]
    DriveError { status: u16, message: String },

    #[error("PDF rendering failed: {message}")]
    RenderError { message: String },

    #[error("Chart rendering failed: {message}")]
    ChartError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Authentication,
    Input,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HktError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HktError::ConfigError { .. }
            | HktError::ConfigValidationError { .. }
            | HktError::InvalidConfigValueError { .. }
            | HktError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HktError::ApiError(_) | HktError::DriveError { .. } => ErrorCategory::Network,
            HktError::AuthError { .. } | HktError::JwtError(_) | HktError::DecodeError(_) => {
                ErrorCategory::Authentication
            }
            HktError::SpreadsheetError(_) | HktError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            HktError::ZipError(_)
            | HktError::CsvError(_)
            | HktError::IoError(_)
            | HktError::RenderError { .. }
            | HktError::ChartError { .. } => ErrorCategory::Output,
            HktError::SerializationError(_) | HktError::ProcessingError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重跑即可（下一次排程）
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration
            | ErrorCategory::Authentication
            | ErrorCategory::Input
            | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HktError::DriveError { status: 404, .. } => {
                "Check the Google Drive file/folder id and that it is shared with the service account"
            }
            HktError::DriveError { status: 401 | 403, .. } => {
                "Check that the service account has access to the Google Drive folder"
            }
            HktError::DriveError { .. } | HktError::ApiError(_) => {
                "Check the network connection and retry; the next scheduled run will try again"
            }
            HktError::AuthError { .. } | HktError::JwtError(_) | HktError::DecodeError(_) => {
                "Re-create the key with `export GOOGLE_WORKSPACE_SERVICE_ACCOUNT_KEY=$(base64 key.json)`"
            }
            HktError::ValidationError { .. } | HktError::SpreadsheetError(_) => {
                "Make sure the input file is the HomeKitaTage spreadsheet with the expected columns"
            }
            HktError::RenderError { .. } => {
                "Install wkhtmltopdf (e.g. `apt-get install wkhtmltopdf`) or disable PDF output"
            }
            HktError::ChartError { .. } => "Make sure a sans-serif system font is installed",
            HktError::ConfigError { .. }
            | HktError::ConfigValidationError { .. }
            | HktError::InvalidConfigValueError { .. }
            | HktError::MissingConfigError { .. } => {
                "Check the command line arguments, environment variables and hkt.toml"
            }
            HktError::IoError(_) | HktError::ZipError(_) | HktError::CsvError(_) => {
                "Check that the paths exist and are writable"
            }
            HktError::SerializationError(_) | HktError::ProcessingError { .. } => {
                "Re-run with --verbose and report the log output"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach Google Drive: {}", self),
            ErrorCategory::Authentication => format!("Could not authenticate: {}", self),
            ErrorCategory::Input => format!("Input file problem: {}", self),
            ErrorCategory::Output => format!("Could not write reports: {}", self),
            ErrorCategory::Internal => format!("Unexpected error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HktError>;
