// ABOUTME: Error types for the job board client
// ABOUTME: Separates transport, API status, decode, validation and configuration failures

use std::fmt;

/// Message used when a failed response carries no usable `error` field.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The request could not be completed at all.
    Transport(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// A success response whose body did not have the expected shape.
    Decode(String),
    /// Rejected locally before any request was made.
    Validation(String),
    Config(String),
}

impl BoardError {
    /// True for failures that came from talking to the backend.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BoardError::Transport(_) | BoardError::Api { .. } | BoardError::Decode(_)
        )
    }

    /// The text shown to the user in a banner.
    ///
    /// API errors surface the server's message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            BoardError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::Transport(msg) => write!(f, "Connection error: {}", msg),
            BoardError::Api { message, .. } => write!(f, "{}", message),
            BoardError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            BoardError::Validation(msg) => write!(f, "Validation error: {}", msg),
            BoardError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BoardError::Decode(err.to_string())
        } else {
            BoardError::Transport(err.to_string())
        }
    }
}
