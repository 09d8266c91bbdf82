use crate::types::ApiResponse;

/// Errors surfaced through the client's observable error slot.
///
/// Both failure categories land here: responses with an unexpected status
/// code become `Protocol`, while failures thrown below the HTTP layer keep
/// their cause in the other variants.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP {status} {message}")]
    Protocol { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },
}

impl Error {
    /// Build a protocol error from a response's status line.
    pub fn from_status(response: &ApiResponse) -> Self {
        Error::Protocol {
            status: response.status,
            message: response.status_text.clone(),
        }
    }

    /// The HTTP status code, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for responses that carried an unexpected status code.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol { .. })
    }
}
