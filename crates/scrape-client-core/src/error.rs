use thiserror::Error;

/// Failure of a `/scrape` request.
///
/// Transport and decoding failures are reported the same way: one error
/// entry on the diagnostic stream, never re-raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RequestFailure {
    fn from(err: serde_json::Error) -> Self {
        RequestFailure::Decode(err.to_string())
    }
}
