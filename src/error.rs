//! Error types for axvoice

use std::io;
use thiserror::Error;

/// Main error type for axvoice
#[derive(Error, Debug)]
pub enum AxvoiceError {
    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    /// The host reported no voices. Recoverable: wait and retry.
    #[error("No voices available after {attempts} attempt(s)")]
    VoiceUnavailable { attempts: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for axvoice operations
pub type Result<T> = std::result::Result<T, AxvoiceError>;

impl From<String> for AxvoiceError {
    fn from(s: String) -> Self {
        AxvoiceError::Other(s)
    }
}

impl From<&str> for AxvoiceError {
    fn from(s: &str) -> Self {
        AxvoiceError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for AxvoiceError {
    fn from(e: serde_json::Error) -> Self {
        AxvoiceError::Other(format!("JSON error: {}", e))
    }
}
