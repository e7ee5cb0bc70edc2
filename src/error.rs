//! Error types for resumark library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for resumark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while formatting or exporting a document.
///
/// Markup problems are not errors: unknown lines fall back to plain text,
/// missing fields become empty strings and empty sections are dropped.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error assembling the OOXML package.
    #[error("Package error: {0}")]
    Package(String),

    /// Error during rendering (docx, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The fixed-layout conversion capability could not be started.
    #[error("Fixed-layout conversion unavailable: {0}")]
    ConversionUnavailable(String),

    /// The conversion ran but did not produce a document.
    #[error("Fixed-layout conversion failed: {0}")]
    ConversionFailed(String),

    /// The conversion exceeded the caller's time limit.
    #[error("Fixed-layout conversion timed out after {0:?}")]
    ConversionTimeout(Duration),

    /// Bytes did not carry the expected artifact signature.
    #[error("Invalid artifact: expected {0}")]
    InvalidArtifact(&'static str),

    /// Bytes are neither a DOCX package nor a PDF.
    #[error("Unknown file format: not a DOCX or PDF artifact")]
    UnknownFormat,
}

impl Error {
    /// Check if this error came from the fixed-layout conversion step.
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            Error::ConversionUnavailable(_)
                | Error::ConversionFailed(_)
                | Error::ConversionTimeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ConversionUnavailable("soffice not found".to_string());
        assert_eq!(
            err.to_string(),
            "Fixed-layout conversion unavailable: soffice not found"
        );

        let err = Error::InvalidArtifact("PDF");
        assert_eq!(err.to_string(), "Invalid artifact: expected PDF");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_conversion());
    }

    #[test]
    fn test_is_conversion() {
        assert!(Error::ConversionTimeout(Duration::from_secs(3)).is_conversion());
        assert!(Error::ConversionFailed("exit 1".into()).is_conversion());
        assert!(!Error::Render("bad".into()).is_conversion());
    }
}
