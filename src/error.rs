use thiserror::Error;

/// Errors that can occur while capturing, extracting or saving page text
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Saving is switched off in the settings store
    #[error("Extension is disabled")]
    Disabled,

    /// The file writer rejected the formatted document
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No page answered the text request (no WebDriver session, failed
    /// navigation or a failed capture script)
    #[error("Could not reach the page: {0}")]
    MessagingUnavailable(String),

    /// A URL could not be parsed while deriving a filename
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A captured page snapshot is structurally broken
    #[error("Invalid page snapshot: {0}")]
    InvalidSnapshot(String),

    /// Settings or browser configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScrapeError>;
