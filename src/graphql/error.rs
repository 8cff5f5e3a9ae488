use thiserror::Error;

/// Everything a fetch can fail with.
///
/// The UI treats all variants uniformly as "query failed"; the split exists
/// for logging and tests, not for divergent handling.
#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    Server(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no data in GraphQL response")]
    NoData,
}
