use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PrazosError {
    #[error("Order spreadsheet not found: {path}")]
    SourceNotFound { path: String },

    #[error("Worksheet not found: {sheet}")]
    SheetNotFound { sheet: String },

    #[error("Missing column in worksheet {sheet}: {column}")]
    MissingColumn { sheet: String, column: String },

    #[error("Workbook error: {message}")]
    Workbook { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl PrazosError {
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub fn sheet_not_found(sheet: impl Into<String>) -> Self {
        Self::SheetNotFound {
            sheet: sheet.into(),
        }
    }

    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }

    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Anything that went wrong after the file was found.
    #[cfg(test)]
    pub(crate) fn is_processing(&self) -> bool {
        matches!(
            self,
            Self::SheetNotFound { .. } | Self::MissingColumn { .. } | Self::Workbook { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::Workbook { .. } => "WORKBOOK_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::SourceNotFound { .. } => 503,
            Self::SheetNotFound { .. } => 500,
            Self::MissingColumn { .. } => 500,
            Self::Workbook { .. } => 500,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type PrazosResult<T> = Result<T, PrazosError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<PrazosError> for ErrorResponse {
    fn from(error: PrazosError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<calamine::Error> for PrazosError {
    fn from(error: calamine::Error) -> Self {
        Self::workbook(error.to_string())
    }
}

impl From<config::ConfigError> for PrazosError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
