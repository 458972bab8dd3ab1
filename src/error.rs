use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("GitHub user '{0}' not found")]
    NotFound(String),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Username must not be empty")]
    EmptyUsername,
}
