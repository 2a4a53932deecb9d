//! Error types for htmldown.
//!
//! Extraction and rendering are infallible; only fetching and writing can fail.

use std::path::PathBuf;
use std::time::Duration;

/// Error type for fetch and write operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL could not be parsed.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP request failed before a response was received.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded its total time budget.
    #[error("fetching {url} timed out after {}s", timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    /// The server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Writing the Markdown output failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for htmldown operations.
pub type Result<T> = std::result::Result<T, Error>;
