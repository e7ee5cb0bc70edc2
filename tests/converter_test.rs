//! Integration tests for fixed-layout conversion and file export.

use std::sync::Mutex;
use std::time::Duration;

use resumark::convert::{ConvertOptions, FixedLayoutConverter};
use resumark::error::{Error, Result};
use resumark::render::docx::ZIP_MAGIC;
use resumark::{export_files, format_artifacts, Identity, Resumark};

const MARKUP: &str = "# Jane Doe\n## Experience\n**Engineer** | Acme ||| 2020 - 2024\n- Shipped it";

/// Mock converter that records its input and returns a fixed PDF.
struct MockConverter {
    seen: Mutex<Vec<Vec<u8>>>,
    timeouts: Mutex<Vec<Duration>>,
}

impl MockConverter {
    fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            timeouts: Mutex::new(Vec::new()),
        }
    }
}

impl FixedLayoutConverter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn convert(&self, docx: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
        self.seen.lock().unwrap().push(docx.to_vec());
        self.timeouts.lock().unwrap().push(options.timeout);
        Ok(b"%PDF-1.7\n%%EOF\n".to_vec())
    }
}

/// Converter that always fails with the given error.
struct FailingConverter(fn() -> Error);

impl FixedLayoutConverter for FailingConverter {
    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn convert(&self, _docx: &[u8], _options: &ConvertOptions) -> Result<Vec<u8>> {
        Err((self.0)())
    }
}

fn unavailable() -> Error {
    Error::ConversionUnavailable("no office suite".to_string())
}

fn timed_out() -> Error {
    Error::ConversionTimeout(Duration::from_secs(1))
}

#[test]
fn test_pdf_is_derived_from_docx() {
    let converter = MockConverter::new();
    let artifacts = format_artifacts(&Identity::new("Jane Doe"), MARKUP, &converter).unwrap();

    assert!(artifacts.docx.starts_with(ZIP_MAGIC));
    assert!(artifacts.pdf.starts_with(b"%PDF"));

    let seen = converter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], artifacts.docx);
}

#[test]
fn test_timeout_is_passed_through() {
    let converter = MockConverter::new();
    Resumark::new()
        .with_timeout(Duration::from_secs(9))
        .format(&Identity::new("Jane"), MARKUP)
        .to_artifacts(&converter)
        .unwrap();

    assert_eq!(
        *converter.timeouts.lock().unwrap(),
        vec![Duration::from_secs(9)]
    );
}

#[test]
fn test_conversion_error_propagates() {
    let err = format_artifacts(&Identity::new("Jane"), MARKUP, &FailingConverter(unavailable))
        .unwrap_err();
    assert!(matches!(err, Error::ConversionUnavailable(_)));
    assert!(err.is_conversion());
}

#[test]
fn test_export_files() {
    let dir = tempfile::tempdir().unwrap();
    let docx_path = dir.path().join("resume.docx");
    let pdf_path = dir.path().join("resume.pdf");

    export_files(
        &Identity::new("Jane Doe"),
        MARKUP,
        &docx_path,
        &pdf_path,
        &MockConverter::new(),
    )
    .unwrap();

    assert!(resumark::detect::is_docx_bytes(&std::fs::read(&docx_path).unwrap()));
    assert!(resumark::detect::is_pdf_bytes(&std::fs::read(&pdf_path).unwrap()));
}

#[test]
fn test_export_keeps_docx_on_conversion_failure() {
    let dir = tempfile::tempdir().unwrap();
    let docx_path = dir.path().join("resume.docx");
    let pdf_path = dir.path().join("resume.pdf");

    let err = export_files(
        &Identity::new("Jane Doe"),
        MARKUP,
        &docx_path,
        &pdf_path,
        &FailingConverter(timed_out),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ConversionTimeout(_)));
    let docx = std::fs::read(&docx_path).unwrap();
    assert_eq!(docx, resumark::render_docx(&Identity::new("Jane Doe"), MARKUP).unwrap());
    assert!(!pdf_path.exists());

    // no temporary files are left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = export_files(
        &Identity::new("Jane"),
        MARKUP,
        dir.path().join("nope").join("resume.docx"),
        dir.path().join("nope").join("resume.pdf"),
        &MockConverter::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
