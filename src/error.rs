use crate::core::messages;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CourseError>;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{}", messages::could_not_verify_payment_id(.payment_id))]
    PaymentNotVerified { payment_id: String },

    #[error("{}", messages::missing_download_link(.payment_id))]
    MissingDownloadLink { payment_id: String },

    #[error("{}", messages::directory_not_found(.path))]
    DirectoryNotFound { path: PathBuf },

    #[error("{}", messages::file_not_found(.path))]
    FileNotFound { path: PathBuf },

    #[error("{}", messages::start_with_no_content_dir(.path))]
    ContentDirNotFound { path: PathBuf },

    #[error("{}", messages::test_with_no_practice_dir(.path))]
    PracticeDirNotFound { path: PathBuf },

    #[error("Download failed: {url} ({reason})")]
    DownloadError { url: String, reason: String },

    #[error("Payment verification failed: {url} ({reason})")]
    VerificationError { url: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl CourseError {
    /// Errors the workflows report with the `ERROR:` prefix and stop on,
    /// as opposed to failures that abort the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CourseError::PaymentNotVerified { .. }
                | CourseError::MissingDownloadLink { .. }
                | CourseError::DirectoryNotFound { .. }
                | CourseError::FileNotFound { .. }
                | CourseError::ContentDirNotFound { .. }
                | CourseError::PracticeDirNotFound { .. }
                | CourseError::DownloadError { .. }
                | CourseError::VerificationError { .. }
        )
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        CourseError::ConfigError {
            message: message.into(),
        }
    }

    pub fn server_error<S: Into<String>>(message: S) -> Self {
        CourseError::ServerError {
            message: message.into(),
        }
    }
}
