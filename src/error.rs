use thiserror::Error;

/// Errors surfaced by the scraping pipeline.
///
/// Only the network boundary is allowed to fail the run; extraction degrades
/// to absent fields instead of erroring on unexpected markup.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The server answered, but not with a success status.
    #[error("error fetching the URL: {url} (status code: {code})", code = .status.as_u16())]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The request failed before a usable response arrived.
    #[error("error fetching the URL: {url}: {source}")]
    FetchTransport {
        url: String,
        source: reqwest::Error,
    },

    /// A database operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A list field could not be encoded for storage.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}
