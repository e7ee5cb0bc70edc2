//! Styled block types produced by the layout builder.

use super::{Alignment, TextRun};
use serde::{Deserialize, Serialize};

/// Separator placed between the primary and secondary parts of a header.
pub const HEADER_SEPARATOR: &str = " | ";

/// A styled layout block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyledBlock {
    /// Name or headline paragraph.
    Heading {
        /// Heading text
        text: String,
        /// Font size in points
        size_pt: f32,
        /// Paragraph alignment
        alignment: Alignment,
        /// Space after the paragraph in points
        space_after_pt: f32,
    },

    /// Contact details joined on one line.
    ContactBar {
        /// Joined contact text
        text: String,
        /// Paragraph alignment
        alignment: Alignment,
        /// Whether a rule is drawn under the paragraph
        bottom_border: bool,
    },

    /// Upper-cased section title.
    SectionBanner {
        /// Banner text
        text: String,
        /// Whether a rule is drawn under the paragraph
        bottom_border: bool,
    },

    /// Two-column grid of skill categories.
    SkillsGrid(SkillsGrid),

    /// Two-column entry header (title on the left, dates on the right).
    EntryRow {
        /// Bold primary text (job title, degree)
        primary: TextRun,
        /// Plain text following the primary part
        secondary: Option<TextRun>,
        /// Right column run
        right: TextRun,
        /// Right column alignment
        right_alignment: Alignment,
    },

    /// Single-line project or education header.
    InlineHeader {
        /// Bold title run
        title: TextRun,
        /// Italic detail run
        detail: Option<TextRun>,
    },

    /// Bulleted list.
    BulletList {
        /// Item texts, free of inline markup
        items: Vec<String>,
    },

    /// Plain paragraph.
    Plain {
        /// Paragraph text
        text: String,
        /// Whether the paragraph is italic
        italic: bool,
    },
}

impl StyledBlock {
    /// Short kind name, used in logs and text dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StyledBlock::Heading { .. } => "heading",
            StyledBlock::ContactBar { .. } => "contact_bar",
            StyledBlock::SectionBanner { .. } => "section_banner",
            StyledBlock::SkillsGrid(_) => "skills_grid",
            StyledBlock::EntryRow { .. } => "entry_row",
            StyledBlock::InlineHeader { .. } => "inline_header",
            StyledBlock::BulletList { .. } => "bullet_list",
            StyledBlock::Plain { .. } => "plain",
        }
    }

    /// Check if this block is a section banner.
    pub fn is_banner(&self) -> bool {
        matches!(self, StyledBlock::SectionBanner { .. })
    }

    /// Runs of the left column of an entry row, separator included.
    pub fn left_runs(&self) -> Vec<TextRun> {
        match self {
            StyledBlock::EntryRow {
                primary, secondary, ..
            } => {
                let mut runs = vec![primary.clone()];
                if let Some(secondary) = secondary {
                    runs.push(TextRun::new(HEADER_SEPARATOR));
                    runs.push(secondary.clone());
                }
                runs
            }
            _ => Vec::new(),
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            StyledBlock::Heading { text, .. }
            | StyledBlock::ContactBar { text, .. }
            | StyledBlock::SectionBanner { text, .. }
            | StyledBlock::Plain { text, .. } => text.clone(),
            StyledBlock::SkillsGrid(grid) => grid.plain_text(),
            StyledBlock::EntryRow { right, .. } => {
                let left: String = self.left_runs().iter().map(|r| r.text.as_str()).collect();
                format!("{}\t{}", left, right.text)
            }
            StyledBlock::InlineHeader { title, detail } => match detail {
                Some(detail) => format!("{}{}{}", title.text, HEADER_SEPARATOR, detail.text),
                None => title.text.clone(),
            },
            StyledBlock::BulletList { items } => items
                .iter()
                .map(|item| format!("• {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A two-column skills grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsGrid {
    /// Grid rows, top to bottom
    pub rows: Vec<SkillsRow>,
}

impl SkillsGrid {
    /// Number of columns in the grid.
    pub const COLUMNS: usize = 2;

    /// Lay out entries column-major: the first ceil(n/2) entries fill the
    /// left column, the remainder fill the right column.
    pub fn from_entries(entries: Vec<SkillEntry>) -> Self {
        let row_count = entries.len().div_ceil(Self::COLUMNS);
        let mut entries = entries.into_iter();
        let left: Vec<SkillEntry> = entries.by_ref().take(row_count).collect();
        let mut right = entries;

        let rows = left
            .into_iter()
            .map(|left| SkillsRow {
                left,
                right: right.next(),
            })
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entries of the left column, top to bottom.
    pub fn left_column(&self) -> Vec<&SkillEntry> {
        self.rows.iter().map(|row| &row.left).collect()
    }

    /// Entries of the right column, top to bottom.
    pub fn right_column(&self) -> Vec<&SkillEntry> {
        self.rows.iter().filter_map(|row| row.right.as_ref()).collect()
    }

    /// Entries in their original order (left column, then right column).
    pub fn entries(&self) -> Vec<&SkillEntry> {
        let mut entries = self.left_column();
        entries.extend(self.right_column());
        entries
    }

    /// Get plain text representation of the grid.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let right = row.right.as_ref().map(SkillEntry::plain_text);
                format!("{}\t{}", row.left.plain_text(), right.unwrap_or_default())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One row of a skills grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsRow {
    /// Left cell
    pub left: SkillEntry,
    /// Right cell, blank when the category count is odd
    pub right: Option<SkillEntry>,
}

/// A skill category and its comma-separated skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Category name, without the trailing colon
    pub category: String,
    /// Skills text
    pub skills: String,
}

impl SkillEntry {
    /// Create a new entry.
    pub fn new(category: impl Into<String>, skills: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            skills: skills.into(),
        }
    }

    /// Get plain text as rendered in a cell.
    pub fn plain_text(&self) -> String {
        if self.skills.is_empty() {
            format!("{}:", self.category)
        } else {
            format!("{}: {}", self.category, self.skills)
        }
    }
}
