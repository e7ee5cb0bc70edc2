//! Layout building: classified markup lines to styled blocks.
//!
//! The builder is a pure function of its input. Each [`LineKind`] maps to
//! exactly one block rule; bullets are grouped into lists and a skills
//! header pulls in the rows that follow it.

mod entry;
mod options;
mod skills;

pub use entry::{project_style, two_column};
pub use options::LayoutOptions;
pub use skills::parse_row as parse_skill_row;

use crate::model::{Alignment, Document, Identity, Metadata, StyledBlock};
use crate::parser::sanitize::{is_single_emphasis, strip_asterisks, strip_bold, strip_inline_markup};
use crate::parser::{LineKind, MarkupLine};

/// Build a document from classified lines with default options.
pub fn build(identity: &Identity, lines: &[MarkupLine]) -> Document {
    LayoutBuilder::new(identity).build(lines)
}

/// Turns classified markup lines into a [`Document`].
#[derive(Debug, Clone)]
pub struct LayoutBuilder<'a> {
    identity: &'a Identity,
    options: LayoutOptions,
}

impl<'a> LayoutBuilder<'a> {
    /// Create a builder for the given identity.
    pub fn new(identity: &'a Identity) -> Self {
        Self {
            identity,
            options: LayoutOptions::default(),
        }
    }

    /// Set layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the block sequence for `lines`.
    pub fn build(&self, lines: &[MarkupLine]) -> Document {
        let mut blocks = Vec::new();
        let mut bullets: Vec<String> = Vec::new();
        let mut contact = ContactState::Pending;
        let mut index = 0;

        while index < lines.len() {
            let line = &lines[index];
            if line.kind != LineKind::BulletPoint {
                flush_bullets(&mut blocks, &mut bullets);
            }

            match line.kind {
                LineKind::Blank => {}
                LineKind::Title => blocks.push(StyledBlock::Heading {
                    text: line.content().to_string(),
                    size_pt: self.options.title_size_pt,
                    alignment: Alignment::Center,
                    space_after_pt: self.options.title_space_after_pt,
                }),
                LineKind::Headline => blocks.push(StyledBlock::Heading {
                    text: line.content().to_string(),
                    size_pt: self.options.headline_size_pt,
                    alignment: Alignment::Center,
                    space_after_pt: self.options.headline_space_after_pt,
                }),
                LineKind::ContactLine if contact == ContactState::Pending => {
                    blocks.push(self.contact_bar(line));
                    contact = ContactState::Done;
                }
                LineKind::ContactLine => {
                    log::debug!("Keeping contact-like line {} as plain text", line.number);
                    blocks.push(plain(&line.text));
                }
                LineKind::SectionHeader => {
                    blocks.push(banner(line));
                    contact = ContactState::Done;
                }
                LineKind::SkillsSectionHeader => {
                    contact = ContactState::Done;
                    let (grid, next) = skills::collect_grid(lines, index);
                    if grid.is_empty() {
                        log::debug!("Skipping skills section with no rows at line {}", line.number);
                    } else {
                        blocks.push(banner(line));
                        blocks.push(StyledBlock::SkillsGrid(grid));
                    }
                    index = next;
                    continue;
                }
                // Only reachable when lines were classified outside the parser.
                LineKind::SkillsRow => blocks.push(StyledBlock::Plain {
                    text: strip_bold(&line.text),
                    italic: false,
                }),
                LineKind::EntryHeaderTwoColumn => blocks.push(entry::two_column(&line.text)),
                LineKind::EntryHeaderProjectStyle => blocks.push(entry::project_style(&line.text)),
                LineKind::BulletPoint => {
                    let item = strip_inline_markup(line.content());
                    if !item.is_empty() {
                        bullets.push(item);
                    }
                }
                LineKind::PlainText
                    if contact == ContactState::Pending && self.is_identity_contact(line) =>
                {
                    blocks.push(self.contact_bar(line));
                    contact = ContactState::Done;
                }
                LineKind::PlainText => blocks.push(plain(&line.text)),
            }
            index += 1;
        }
        flush_bullets(&mut blocks, &mut bullets);

        if self.options.omit_empty_sections {
            blocks = prune_empty_sections(blocks);
        }

        log::debug!(
            "Built {} blocks from {} lines",
            blocks.len(),
            lines.len()
        );

        Document {
            metadata: Metadata::for_owner(&self.identity.name),
            blocks,
        }
    }

    /// A line spelling out exactly the identity's contact fields.
    fn is_identity_contact(&self, line: &MarkupLine) -> bool {
        let contact = &self.identity.contact;
        !contact.is_empty() && line.text.trim() == contact.joined()
    }

    fn contact_bar(&self, line: &MarkupLine) -> StyledBlock {
        let contact = &self.identity.contact;
        let text = if contact.is_empty() {
            line.text.clone()
        } else {
            contact.joined()
        };
        StyledBlock::ContactBar {
            text,
            alignment: Alignment::Center,
            bottom_border: self.options.contact_border,
        }
    }
}

/// Only the first contact line of the header, before any section, becomes
/// the contact bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactState {
    Pending,
    Done,
}

fn banner(line: &MarkupLine) -> StyledBlock {
    StyledBlock::SectionBanner {
        text: line.content().to_uppercase(),
        bottom_border: true,
    }
}

fn plain(text: &str) -> StyledBlock {
    if is_single_emphasis(text) {
        StyledBlock::Plain {
            text: strip_asterisks(text),
            italic: true,
        }
    } else {
        StyledBlock::Plain {
            text: text.to_string(),
            italic: false,
        }
    }
}

fn flush_bullets(blocks: &mut Vec<StyledBlock>, bullets: &mut Vec<String>) {
    if !bullets.is_empty() {
        blocks.push(StyledBlock::BulletList {
            items: std::mem::take(bullets),
        });
    }
}

/// Drop banners followed directly by another banner or by the end of input.
fn prune_empty_sections(blocks: Vec<StyledBlock>) -> Vec<StyledBlock> {
    let mut kept = Vec::with_capacity(blocks.len());
    let mut iter = blocks.into_iter().peekable();

    while let Some(block) = iter.next() {
        if block.is_banner() && iter.peek().map_or(true, StyledBlock::is_banner) {
            log::debug!("Omitting empty section {:?}", block.plain_text());
            continue;
        }
        kept.push(block);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, TextRun};
    use crate::parser::parse;

    fn jane() -> Identity {
        Identity::new("Jane Doe").with_contact(
            Contact::default()
                .with_email("jane@x.com")
                .with_phone("555-1000"),
        )
    }

    fn blocks(markup: &str) -> Vec<StyledBlock> {
        build(&jane(), &parse(markup)).blocks
    }

    #[test]
    fn test_title_and_contact() {
        let blocks = blocks("# Jane Doe\njane@x.com | 555-1000 | github.com/jd");
        assert_eq!(
            blocks[0],
            StyledBlock::Heading {
                text: "Jane Doe".into(),
                size_pt: 22.0,
                alignment: Alignment::Center,
                space_after_pt: 2.0,
            }
        );
        // identity fields win, in fixed order
        assert_eq!(
            blocks[1],
            StyledBlock::ContactBar {
                text: "555-1000 | jane@x.com".into(),
                alignment: Alignment::Center,
                bottom_border: true,
            }
        );
    }

    #[test]
    fn test_contact_falls_back_to_markup() {
        let identity = Identity::new("Anon");
        let doc = build(&identity, &parse("a@b.c | 123"));
        assert_eq!(doc.blocks[0].plain_text(), "a@b.c | 123");
    }

    #[test]
    fn test_skills_grid_end_to_end() {
        let blocks = blocks(
            "## SKILLS\n**Languages:** Python, Go\n**Cloud:** AWS\n**Tools:** Git\n\n## Experience\n- x",
        );
        assert_eq!(
            blocks[0],
            StyledBlock::SectionBanner {
                text: "SKILLS".into(),
                bottom_border: true,
            }
        );
        let StyledBlock::SkillsGrid(grid) = &blocks[1] else {
            panic!("expected skills grid, got {:?}", blocks[1]);
        };
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows[0].left.category, "Languages");
        assert_eq!(grid.rows[0].left.skills, "Python, Go");
        assert_eq!(grid.rows[0].right.as_ref().unwrap().category, "Tools");
        assert_eq!(grid.rows[1].left.category, "Cloud");
        assert!(grid.rows[1].right.is_none());
        assert!(blocks[2].is_banner());
    }

    #[test]
    fn test_later_contact_like_line_keeps_text() {
        let blocks = blocks(
            "# Jane\n555-1000 | jane@x.com\n## Summary\n\
             Open to relocation; references via hr@acme.com | see portfolio",
        );
        let bars = blocks
            .iter()
            .filter(|block| matches!(block, StyledBlock::ContactBar { .. }))
            .count();
        assert_eq!(bars, 1);
        assert_eq!(
            blocks[3],
            StyledBlock::Plain {
                text: "Open to relocation; references via hr@acme.com | see portfolio".into(),
                italic: false,
            }
        );
    }

    #[test]
    fn test_second_header_contact_line_keeps_text() {
        let blocks = blocks("# Jane\n555-1000 | jane@x.com\nalt@y.org | 555-2000");
        assert!(matches!(blocks[1], StyledBlock::ContactBar { .. }));
        assert_eq!(blocks[2].plain_text(), "alt@y.org | 555-2000");
        assert!(matches!(blocks[2], StyledBlock::Plain { .. }));
    }

    #[test]
    fn test_identity_contact_without_email_is_bar() {
        let identity = Identity::new("Jane").with_contact(
            Contact::default()
                .with_phone("555-1000")
                .with_github("github.com/jane"),
        );
        let doc = build(&identity, &parse("# Jane\n555-1000 | github.com/jane\n## Experience\n- x"));
        assert_eq!(
            doc.blocks[1],
            StyledBlock::ContactBar {
                text: "555-1000 | github.com/jane".into(),
                alignment: Alignment::Center,
                bottom_border: true,
            }
        );

        // the same text in the body stays plain
        let doc = build(&identity, &parse("# Jane\n## Summary\n555-1000 | github.com/jane"));
        assert!(matches!(doc.blocks[2], StyledBlock::Plain { .. }));
    }

    #[test]
    fn test_empty_skills_section_omitted() {
        let blocks = blocks("## Skills\n\n## Experience\n- did things");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "EXPERIENCE");
    }

    #[test]
    fn test_empty_sections_omitted() {
        let doc = build(&jane(), &parse("## Projects\n\n## Education\n"));
        assert!(doc.is_empty());

        let kept = LayoutBuilder::new(&jane())
            .with_options(LayoutOptions::new().keep_empty_sections())
            .build(&parse("## Projects\n## Education"));
        assert_eq!(kept.section_titles(), vec!["PROJECTS", "EDUCATION"]);
    }

    #[test]
    fn test_bullets_grouped_and_sanitized() {
        let blocks = blocks("## Experience\n- Built **fast** `service`\n- *Led* team\n\n- After gap\n-  ** ");
        assert_eq!(
            blocks[1],
            StyledBlock::BulletList {
                items: vec!["Built fast service".into(), "Led team".into()],
            }
        );
        assert_eq!(
            blocks[2],
            StyledBlock::BulletList {
                items: vec!["After gap".into()],
            }
        );
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_education_lines() {
        let blocks = blocks("## Education\n**B.Sc. Computer Science** ||| 2015 - 2019\n*State University*");
        assert!(matches!(blocks[1], StyledBlock::EntryRow { .. }));
        assert_eq!(
            blocks[2],
            StyledBlock::Plain {
                text: "State University".into(),
                italic: true,
            }
        );
    }

    #[test]
    fn test_project_header_and_plain() {
        let blocks = blocks("## Projects\n**Resumark** | *Rust*\nJust a note");
        assert_eq!(
            blocks[1],
            StyledBlock::InlineHeader {
                title: TextRun::bold("Resumark"),
                detail: Some(TextRun::italic("Rust")),
            }
        );
        assert_eq!(
            blocks[2],
            StyledBlock::Plain {
                text: "Just a note".into(),
                italic: false,
            }
        );
    }

    #[test]
    fn test_metadata_from_identity() {
        let doc = build(&jane(), &parse("# Jane Doe"));
        assert_eq!(doc.metadata.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_orphan_skills_row() {
        let lines = vec![MarkupLine::new(1, "**A:** b", LineKind::SkillsRow)];
        let doc = build(&jane(), &lines);
        assert_eq!(doc.blocks[0].plain_text(), "A: b");
    }
}
