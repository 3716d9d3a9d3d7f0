// src/error.rs

use std::fmt;

/// Result type for git-pixel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong during a poll cycle or while building its parts
#[derive(Debug)]
pub enum Error {
    /// Network, DNS or timeout failure talking to GitHub or the display
    Transport(reqwest::Error),

    /// The remote answered with a non-success status
    Status { url: String, status: u16 },

    /// Response body does not match the expected schema
    Decode(serde_json::Error),

    /// Missing or invalid setting
    Config(String),

    /// A core constructor was handed arguments outside its contract
    InvalidInput(String),

    /// Writing a preview image failed
    Image(image::ImageError),
}

impl Error {
    /// Transport-class failures: the request never produced a usable response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Status { url, status } => write!(f, "HTTP {} from {}", status, url),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Image(err) => write!(f, "Image error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Image(err) => Some(err),
            Error::Status { .. } | Error::Config(_) | Error::InvalidInput(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err)
    }
}
