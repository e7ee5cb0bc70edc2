//! Line kinds and the classification rules of the markup dialect.

use serde::{Deserialize, Serialize};

use super::options::DEFAULT_SKILLS_KEYWORD;

/// Token that splits an entry header into left and right columns.
pub const SENTINEL: &str = "|||";

/// Structural role of a markup line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `# Name`
    Title,
    /// `### Headline`
    Headline,
    /// Contact details joined with ` | `
    ContactLine,
    /// `## Section`
    SectionHeader,
    /// `## ...SKILLS...`
    SkillsSectionHeader,
    /// `**Category:** items` directly under a skills header
    SkillsRow,
    /// `**Title** | Company ||| Dates`
    EntryHeaderTwoColumn,
    /// `**Name** | *Technologies*`
    EntryHeaderProjectStyle,
    /// `- item`
    BulletPoint,
    /// Any other non-blank line
    PlainText,
    /// Empty or whitespace-only line
    Blank,
}

impl LineKind {
    /// Check if this kind opens a section.
    pub fn is_section_header(self) -> bool {
        matches!(self, LineKind::SectionHeader | LineKind::SkillsSectionHeader)
    }
}

/// A classified line of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupLine {
    /// Line number in the input (1-indexed)
    pub number: usize,

    /// Trimmed line text
    pub text: String,

    /// Structural role
    pub kind: LineKind,
}

impl MarkupLine {
    /// Create a classified line.
    pub fn new(number: usize, text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            number,
            text: text.into(),
            kind,
        }
    }

    /// Text with the kind's leading marker removed (`# `, `## `, `### `, `- `).
    pub fn content(&self) -> &str {
        let prefix = match self.kind {
            LineKind::Title => "# ",
            LineKind::Headline => "### ",
            LineKind::SectionHeader | LineKind::SkillsSectionHeader => "## ",
            LineKind::BulletPoint => "- ",
            _ => "",
        };
        self.text.strip_prefix(prefix).unwrap_or(&self.text).trim()
    }
}

/// Classify one trimmed line.
///
/// `in_skills` is true while the line directly continues a skills header;
/// apart from that flag the result depends only on `line`. Rules are checked
/// from most to least specific, so the sentinel wins over a single pipe.
pub fn classify(line: &str, in_skills: bool, skills_keyword: &str) -> LineKind {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if in_skills && line.starts_with("**") {
        return LineKind::SkillsRow;
    }
    if line.starts_with("# ") {
        return LineKind::Title;
    }
    if line.starts_with("### ") {
        return LineKind::Headline;
    }
    if line.starts_with("## ") {
        let keyword = match skills_keyword.trim() {
            "" => DEFAULT_SKILLS_KEYWORD,
            keyword => keyword,
        };
        if line.to_uppercase().contains(&keyword.to_uppercase()) {
            return LineKind::SkillsSectionHeader;
        }
        return LineKind::SectionHeader;
    }
    if line.contains(SENTINEL) {
        return LineKind::EntryHeaderTwoColumn;
    }
    if line.starts_with("**") && line.contains('|') {
        return LineKind::EntryHeaderProjectStyle;
    }
    if line.starts_with("- ") {
        return LineKind::BulletPoint;
    }
    if line.contains('@') && line.contains(" | ") {
        return LineKind::ContactLine;
    }
    LineKind::PlainText
}
