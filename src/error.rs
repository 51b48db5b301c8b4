//! Error handling for the portspectre scanner
//!
//! Only pre-scan validation failures abort a run; per-port and per-feature
//! failures degrade to reported results instead of surfacing here.

use thiserror::Error;

/// Main error type for scanning operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid port specification: {0}")]
    PortSpec(String),

    #[error("Could not resolve host '{0}'")]
    HostResolution(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl ScanError {
    /// True for errors that must stop the run before any probe is dispatched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScanError::PortSpec(_) | ScanError::HostResolution(_) | ScanError::Config(_)
        )
    }
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
