use thiserror::Error;

/// Convenience alias for pipeline results
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error taxonomy
///
/// Only `Authentication` is allowed to terminate the process (under the
/// default fatal policy); everything else is caught at the operation that
/// produced it and converted into a skip.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to fetch playlist {id}: {reason}")]
    PlaylistFetch { id: String, reason: String },

    #[error("YouTube search failed for \"{query}\": {reason}")]
    Lookup { query: String, reason: String },

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}
