use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{url} answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Browser session failed: {0}")]
    Browser(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else {
            FetchError::Network(err)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("FAQ container `{0}` not found in document")]
    ContainerMissing(String),

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt record at {}:{line}: {reason}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
