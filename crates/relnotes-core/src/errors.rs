use std::io;
use std::path::Path;

/// Canonical result type for relnotes code
pub type Result<T> = std::result::Result<T, RelnotesError>;

/// Common error type for changelog retrieval
#[derive(Debug, thiserror::Error)]
pub enum RelnotesError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{url} returned 429 Too Many Requests{}", retry_hint(.retry_after))]
    RateLimited {
        url: String,
        retry_after: Option<String>,
    },

    #[error("blocking changelog retrieval called inside an async runtime; await it instead")]
    BlockingInAsync,

    #[error("unexpected response shape from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn retry_hint(retry_after: &Option<String>) -> String {
    retry_after
        .as_deref()
        .map(|s| format!(" Retry-After: {s}"))
        .unwrap_or_default()
}

/// Helper to create an IO error with file path context
pub fn io_error_with_path<P: AsRef<Path>>(error: io::Error, path: P) -> io::Error {
    io::Error::new(
        error.kind(),
        format!("{}: {}", path.as_ref().display(), error),
    )
}
