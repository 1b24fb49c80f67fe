//! Common error types used throughout marquee.
//!
//! Transport, status and decode failures come from the fetch layer and are
//! absorbed at the pipeline boundary. Malformed records are absorbed per
//! record by the mapper. Configuration errors are the only ones surfaced to
//! callers, and only at construction time.

/// Common error type for marquee.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream server answered with a non-success status.
    #[error("Upstream returned {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body was not the JSON shape we expected.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A single upstream record could not be turned into a card.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Connection parameters are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a new Transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new Status error.
    pub fn status<S: Into<String>>(status: u16, path: S) -> Self {
        Self::Status {
            status,
            path: path.into(),
        }
    }

    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new MalformedRecord error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create a new Configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// True for failures that originate in the fetch layer.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
