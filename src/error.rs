use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasnapError>;

#[derive(Error, Debug)]
pub enum DatasnapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid dataset identifier '{dataset}': {reason}")]
    InvalidDataset { dataset: String, reason: String },

    #[error("Dataset '{dataset}' not found")]
    DatasetNotFound { dataset: String },

    #[error("Authentication failed for dataset '{dataset}' (HTTP {status})")]
    AuthenticationFailed { dataset: String, status: u16 },

    #[error("Kaggle credentials not found: {message}")]
    MissingCredentials { message: String },

    #[error("Download failed: {url} (HTTP {status})")]
    DownloadError { url: String, status: u16 },

    #[error("Extraction failed: {path}: {message}")]
    ExtractionError { path: PathBuf, message: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("No columns to parse from {path}")]
    EmptyInput { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl DatasnapError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        DatasnapError::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_dataset<D: Into<String>, R: Into<String>>(dataset: D, reason: R) -> Self {
        DatasnapError::InvalidDataset {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    pub fn extraction_error<S: Into<String>>(path: &std::path::Path, message: S) -> Self {
        DatasnapError::ExtractionError {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
