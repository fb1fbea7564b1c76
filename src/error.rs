use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The remote answered with something that is not an image
    #[error("Not an image: {0:?}")]
    NotAnImage(String),
}

/// Every image source, fallback included, came up empty.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no search key configured and the fallback image failed")]
    NoKeyAndFallbackFailed,

    #[error("no usable jumping spider image found")]
    NoUsableImage,
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::NoKeyAndFallbackFailed => "no_key_and_fallback_failed",
            ResolveError::NoUsableImage => "no_usable_jumpingspider_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::NoKeyAndFallbackFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ResolveError::NoUsableImage => StatusCode::NOT_FOUND,
        }
    }
}
