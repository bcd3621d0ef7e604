//! Error types for the drive_sheets crate.

use reqwest::Response;
use thiserror::Error;

use crate::models::ApiErrorResponse;

/// Errors that can occur when talking to Google Drive or Google Sheets.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JWT encoding error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;

/// Turn a non-success response into an `ApiError`.
///
/// Google wraps most failures in `{"error": {"code", "message"}}`; anything
/// else is reported with the raw body.
pub(crate) async fn api_error(response: Response) -> DriveError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(api_error) => DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        },
        Err(_) => DriveError::ApiError {
            status,
            message: body,
        },
    }
}

/// Pass a successful response through, or convert it into an error.
pub(crate) async fn check_response(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(api_error(response).await)
    }
}
