use thiserror::Error;

/// Failure talking to a metadata provider.
///
/// Callers on the watchlist path treat every variant the same way; the split
/// exists for logs and for the search command's diagnostics.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Provider answered with a non-2xx status
    #[error("provider returned status {status}: {body}")]
    Network { status: u16, body: String },

    /// Request never produced a response (DNS, TLS, timeout, connection reset)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not the JSON shape we expect
    #[error("failed to parse provider response: {0}")]
    Decode(String),

    /// Provider reported a failure in an otherwise well-formed body
    #[error("provider error: {0}")]
    Api(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e.to_string())
    }
}
