//! Error types for the Vitrine clients.

use thiserror::Error;
use vitrine_common::VitrineError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached at all.
    #[error("Could not connect to {base_url}. Make sure the backend server is running.")]
    Transport {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend accepted the connection but did not answer in time.
    #[error("The request to {base_url} timed out.")]
    Timeout {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a body that is not the expected JSON.
    #[error("Unexpected response from the server.")]
    Decode(String),

    /// The backend rejected the request; `message` is its own reason when it gave one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Caught on the client before any request was sent.
    #[error("{message}")]
    Validation { message: String },

    /// The session token could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A submission for the same form is still in flight.
    #[error("A request for this form is already in progress.")]
    Busy,

    /// An error building the HTTP request itself.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
}

impl ClientError {
    pub(crate) fn from_send(base_url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { base_url: base_url.to_owned(), source }
        } else if source.is_builder() {
            Self::Http(source)
        } else {
            Self::Transport { base_url: base_url.to_owned(), source }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Backend unreachable or too slow, as opposed to a decided rejection.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// HTTP status of an application-level rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 both mean the stored session is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<VitrineError> for ClientError {
    fn from(err: VitrineError) -> Self {
        Self::Validation { message: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
