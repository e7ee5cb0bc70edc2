//! Rendering module for converting documents to output formats.

pub mod docx;
mod json;
mod options;
mod text;

pub use docx::{to_docx, DocxRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{half_points, pt_twips, twips, PageSetup, RenderOptions, TWIPS_PER_INCH};
pub use text::to_text;
