//! Error types for the alist_crawl crate.

use thiserror::Error;

/// Errors that can occur while talking to an AList server.
///
/// The client's public operations never surface these; they are logged and
/// turned into empty listings or absent URLs. They do surface from the
/// inventory writer.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    ApiError { code: i64, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CrawlError {
    /// Whether the server rejected the request for lack of a password.
    pub fn is_password_required(&self) -> bool {
        match self {
            CrawlError::ApiError { message, .. } => {
                message.contains("密码") || message.to_lowercase().contains("password")
            }
            _ => false,
        }
    }

    /// Whether the server could not route the path to a storage backend.
    pub fn is_storage_not_found(&self) -> bool {
        matches!(self, CrawlError::ApiError { message, .. } if message.contains("storage not found"))
    }
}

/// Result type alias for CrawlError.
pub type Result<T> = std::result::Result<T, CrawlError>;
