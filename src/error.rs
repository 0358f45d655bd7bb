//! Error types for scrape operations.

use thiserror::Error;

/// Errors that can occur while fetching or extracting a specials page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("bad status on request: {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
