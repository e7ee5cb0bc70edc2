//! Fixed-layout conversion of rendered documents.
//!
//! The fixed-layout artifact is always derived from the editable document
//! bytes, never rendered separately. Converters plug in through
//! [`FixedLayoutConverter`].
//!
//! # Example
//!
//! ```no_run
//! use resumark::convert::{ConvertOptions, FixedLayoutConverter, SofficeConverter};
//! use std::time::Duration;
//!
//! fn main() -> resumark::Result<()> {
//!     let docx = std::fs::read("resume.docx")?;
//!     let converter = SofficeConverter::new();
//!     let options = ConvertOptions::new().with_timeout(Duration::from_secs(30));
//!     let pdf = converter.convert(&docx, &options)?;
//!     std::fs::write("resume.pdf", pdf)?;
//!     Ok(())
//! }
//! ```

mod soffice;

pub use soffice::SofficeConverter;

use crate::error::Result;
use std::time::Duration;

/// Default time limit for a single conversion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Options for fixed-layout conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum time a conversion may take before it is aborted
    pub timeout: Duration,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Trait for fixed-layout converters.
///
/// Implementations take a complete editable document and return the bytes
/// of a PDF derived from it. They must not keep state between calls.
pub trait FixedLayoutConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Check whether the conversion capability can be started.
    fn is_available(&self) -> bool;

    /// Convert docx bytes to pdf bytes.
    fn convert(&self, docx: &[u8], options: &ConvertOptions) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new().with_timeout(Duration::from_secs(5));
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(ConvertOptions::default().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_trait_object() {
        let converter: Box<dyn FixedLayoutConverter> = Box::new(SofficeConverter::new());
        assert_eq!(converter.name(), "soffice");
    }
}
