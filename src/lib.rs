//! # resumark
//!
//! Deterministic resume formatting for Rust.
//!
//! This library turns a lightweight resume markup into a styled editable
//! document (`.docx`) and derives a fixed-layout document (`.pdf`) from it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resumark::{format_artifacts, Identity, SofficeConverter};
//!
//! fn main() -> resumark::Result<()> {
//!     let identity = Identity::new("Jane Doe");
//!     let markup = "# Jane Doe\n## Experience\n**Engineer** | Acme ||| 2020 - 2024\n- Shipped it";
//!
//!     let artifacts = format_artifacts(&identity, markup, &SofficeConverter::new())?;
//!     std::fs::write("resume.docx", &artifacts.docx)?;
//!     std::fs::write("resume.pdf", &artifacts.pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Parse**: every markup line gets a [`LineKind`]; nothing is rejected
//! - **Layout**: line kinds map to [`StyledBlock`]s with fixed typography
//! - **Render**: blocks are written as a reproducible OOXML package
//! - **Convert**: a [`FixedLayoutConverter`] derives the PDF from the docx bytes

pub mod compose;
pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use compose::{compose, TailoredContent};
pub use convert::{ConvertOptions, FixedLayoutConverter, SofficeConverter};
pub use detect::{detect_format_from_bytes, detect_format_from_path, ArtifactFormat};
pub use error::{Error, Result};
pub use layout::{LayoutBuilder, LayoutOptions};
pub use model::{
    Alignment, Contact, Document, Identity, Metadata, SkillEntry, SkillsGrid, StyledBlock,
    TextRun, TextStyle,
};
pub use parser::{LineKind, MarkupLine, MarkupParser, ParseOptions};
pub use render::{JsonFormat, PageSetup, RenderOptions};

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// The two byte streams produced for one resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Editable document bytes
    pub docx: Vec<u8>,
    /// Fixed-layout document bytes, derived from `docx`
    pub pdf: Vec<u8>,
}

/// Parse and lay out markup with default options.
///
/// # Example
///
/// ```
/// use resumark::{format_document, Identity};
///
/// let doc = format_document(&Identity::new("Jane"), "# Jane\n## Projects");
/// // a section without content is dropped
/// assert_eq!(doc.block_count(), 1);
/// ```
pub fn format_document(identity: &Identity, markup: &str) -> Document {
    layout::build(identity, &parser::parse(markup))
}

/// Render markup to docx bytes with default options.
pub fn render_docx(identity: &Identity, markup: &str) -> Result<Vec<u8>> {
    Resumark::new().format(identity, markup).to_docx()
}

/// Produce both artifacts in memory.
///
/// The PDF is always converted from the rendered docx bytes.
pub fn format_artifacts(
    identity: &Identity,
    markup: &str,
    converter: &dyn FixedLayoutConverter,
) -> Result<Artifacts> {
    Resumark::new()
        .format(identity, markup)
        .to_artifacts(converter)
}

/// Write both artifacts to caller-chosen paths.
///
/// The docx file is persisted before conversion starts, so it survives a
/// conversion failure. Each file appears atomically or not at all.
///
/// # Example
///
/// ```no_run
/// use resumark::{export_files, Identity, SofficeConverter};
///
/// let markup = std::fs::read_to_string("resume.md")?;
/// export_files(
///     &Identity::new("Jane Doe"),
///     &markup,
///     "out/resume.docx",
///     "out/resume.pdf",
///     &SofficeConverter::new(),
/// )?;
/// # Ok::<(), resumark::Error>(())
/// ```
pub fn export_files<P: AsRef<Path>, Q: AsRef<Path>>(
    identity: &Identity,
    markup: &str,
    docx_path: P,
    pdf_path: Q,
    converter: &dyn FixedLayoutConverter,
) -> Result<()> {
    Resumark::new()
        .format(identity, markup)
        .export(docx_path, pdf_path, converter)
}

/// Builder for formatting and exporting resumes.
///
/// # Example
///
/// ```no_run
/// use resumark::{Identity, PageSetup, Resumark, SofficeConverter};
/// use std::time::Duration;
///
/// let resume = Resumark::new()
///     .with_page(PageSetup::a4())
///     .with_timeout(Duration::from_secs(30))
///     .format(&Identity::new("Jane Doe"), "# Jane Doe");
/// let artifacts = resume.to_artifacts(&SofficeConverter::new())?;
/// # Ok::<(), resumark::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resumark {
    parse_options: ParseOptions,
    layout_options: LayoutOptions,
    render_options: RenderOptions,
    convert_options: ConvertOptions,
    created: Option<DateTime<Utc>>,
}

impl Resumark {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the page setup.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.render_options = self.render_options.with_page(page);
        self
    }

    /// Set the conversion time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.convert_options = self.convert_options.with_timeout(timeout);
        self
    }

    /// Stamp the document properties with a creation time.
    ///
    /// Without a stamp, identical input yields byte-identical output.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Parse and lay out markup.
    pub fn format(&self, identity: &Identity, markup: &str) -> FormattedResume {
        let lines = MarkupParser::with_options(self.parse_options.clone()).parse(markup);
        let mut document = LayoutBuilder::new(identity)
            .with_options(self.layout_options.clone())
            .build(&lines);
        if let Some(created) = self.created {
            document.metadata = document.metadata.with_created(created);
        }

        FormattedResume {
            document,
            render_options: self.render_options.clone(),
            convert_options: self.convert_options.clone(),
        }
    }
}

/// A laid-out resume, ready to render or export.
#[derive(Debug, Clone)]
pub struct FormattedResume {
    /// The laid-out document
    pub document: Document,
    render_options: RenderOptions,
    convert_options: ConvertOptions,
}

impl FormattedResume {
    /// Render the editable document.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.render_options)
    }

    /// Render both artifacts.
    pub fn to_artifacts(&self, converter: &dyn FixedLayoutConverter) -> Result<Artifacts> {
        let docx = self.to_docx()?;
        let pdf = self.convert(&docx, converter)?;
        Ok(Artifacts { docx, pdf })
    }

    /// Write both artifacts, docx first.
    pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        docx_path: P,
        pdf_path: Q,
        converter: &dyn FixedLayoutConverter,
    ) -> Result<()> {
        let docx_path = docx_path.as_ref();
        let pdf_path = pdf_path.as_ref();

        let docx = self.to_docx()?;
        write_atomic(docx_path, &docx)?;
        log::info!("Wrote {} ({} bytes)", docx_path.display(), docx.len());

        let pdf = self.convert(&docx, converter)?;
        write_atomic(pdf_path, &pdf)?;
        log::info!("Wrote {} ({} bytes)", pdf_path.display(), pdf.len());
        Ok(())
    }

    /// Render as plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Render as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn convert(&self, docx: &[u8], converter: &dyn FixedLayoutConverter) -> Result<Vec<u8>> {
        converter
            .convert(docx, &self.convert_options)
            .map_err(|e| {
                log::error!("PDF conversion with {} failed: {}", converter.name(), e);
                e
            })
    }
}

/// Write `data` to a sibling temporary file and move it into place.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
