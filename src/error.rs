use thiserror::Error;

/// Why a page could not be fetched.
///
/// The UI only ever shows a generic message for these; the variants exist so
/// the log says what actually happened.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search api returned status {status}")]
    Status { status: u16 },
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("fetch worker exited without a result")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, FetchError>;
