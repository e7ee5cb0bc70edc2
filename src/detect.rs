//! Artifact format detection and validation.

use crate::error::{Error, Result};
use crate::render::docx::{entry_names, DOCUMENT_PART, ZIP_MAGIC};
use std::fs;
use std::path::Path;

/// Format of a produced artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// OOXML word-processing package
    Docx,
    /// Portable Document Format
    Pdf {
        /// PDF version (e.g., "1.7", "2.0")
        version: String,
    },
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactFormat::Docx => write!(f, "DOCX"),
            ArtifactFormat::Pdf { version } => write!(f, "PDF {}", version),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Detect the format of a file.
///
/// # Example
/// ```no_run
/// use resumark::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("resume.pdf").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ArtifactFormat> {
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the format of artifact bytes.
///
/// A DOCX must be a ZIP package that contains the main document part; a
/// PDF must start with a `%PDF-x.y` header.
///
/// # Returns
/// * `Err(Error::UnknownFormat)` if the data is neither
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ArtifactFormat> {
    if let Some(version) = pdf_version(data) {
        return Ok(ArtifactFormat::Pdf { version });
    }

    if data.starts_with(ZIP_MAGIC) {
        let has_document = entry_names(data)
            .map(|names| names.iter().any(|name| name == DOCUMENT_PART))
            .unwrap_or(false);
        if has_document {
            return Ok(ArtifactFormat::Docx);
        }
    }

    Err(Error::UnknownFormat)
}

fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    is_valid_version(&version).then_some(version)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(ArtifactFormat::Pdf { .. }))
}

/// Check if bytes are a word-processing package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(ArtifactFormat::Docx))
}
