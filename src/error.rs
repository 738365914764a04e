use crate::request::Resource;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Broad category of a [`KloutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client was used out of order or with missing configuration.
    Usage,
    /// The request could not be completed or the server refused it.
    Transport,
    /// The server answered, but not with the record we asked for.
    Decode,
}

#[derive(Debug, Error)]
pub enum KloutError {
    #[error("Twitter username must be set before resolving a Klout identity")]
    MissingUsername,
    #[error("Klout identity must be resolved before requesting {0}")]
    IdentityNotResolved(Resource),
    #[error("Base url cannot be used for API requests: {0}")]
    InvalidBaseUrl(Url),
    #[error("Error performing HTTP request: {0}")]
    RequestError(
        #[source]
        #[from]
        reqwest::Error,
    ),
    #[error("Server error {} : {}", .status.as_u16(), .status.canonical_reason().unwrap_or("Unknown"))]
    BadResponse { status: StatusCode, body: String },
    #[error("Unable to deserialize response: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Identity response did not contain a Klout id")]
    EmptyIdentity,
}

impl KloutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KloutError::MissingUsername
            | KloutError::IdentityNotResolved(_)
            | KloutError::InvalidBaseUrl(_) => ErrorKind::Usage,
            KloutError::RequestError(_) | KloutError::BadResponse { .. } => ErrorKind::Transport,
            KloutError::DecodeError { .. } | KloutError::EmptyIdentity => ErrorKind::Decode,
        }
    }

    /// HTTP status of a rejected response, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            KloutError::BadResponse { status, .. } => Some(*status),
            KloutError::RequestError(e) => e.status(),
            _ => None,
        }
    }
}
