//! Markup parsing and line classification.

mod line;
mod markup;
mod options;
pub mod sanitize;

pub use line::{classify, LineKind, MarkupLine, SENTINEL};
pub use markup::MarkupParser;
pub use options::{ParseOptions, DEFAULT_SKILLS_KEYWORD};

/// Classify every line of `input` with default options.
pub fn parse(input: &str) -> Vec<MarkupLine> {
    MarkupParser::new().parse(input)
}
