use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF generation error: {message}")]
    PdfError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Rendering,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) | ReportError::ApiStatus { .. } => ErrorCategory::Network,
            ReportError::XlsxError(_) | ReportError::PdfError { .. } => ErrorCategory::Rendering,
            ReportError::IoError(_) => ErrorCategory::Storage,
            ReportError::ConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::SerializationError(_) | ReportError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Rendering | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ApiError(_) => "Could not reach the reporting API".to_string(),
            ReportError::ApiStatus { status, .. } if *status == 401 || *status == 403 => {
                "The API rejected the credentials".to_string()
            }
            ReportError::ApiStatus { status, .. } => {
                format!("The API answered with HTTP {}", status)
            }
            ReportError::XlsxError(e) => format!("The spreadsheet could not be written: {}", e),
            ReportError::PdfError { message } => format!("The PDF could not be rendered: {}", message),
            ReportError::IoError(e) => format!("The report file could not be saved: {}", e),
            ReportError::SerializationError(_) => "The API returned malformed JSON".to_string(),
            ReportError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            ReportError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            ReportError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base URL, the token and your network, then retry",
            ErrorCategory::Rendering => "Check the dataset names and contents, then retry the export",
            ErrorCategory::Storage => "Make sure the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line arguments",
            ErrorCategory::Data => "Inspect the API response for unexpected shapes",
        }
    }
}
