//! Error types for the converter

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting pages or loading site data
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the browser session
    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    /// Failed to open, configure or close a page
    #[error("Page error: {0}")]
    PageError(String),

    /// Failed to load a URL
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// Failed to capture the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Site configuration could not be parsed or failed validation
    #[error("Invalid site configuration: {0}")]
    SiteError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SiteError(err.to_string())
    }
}
