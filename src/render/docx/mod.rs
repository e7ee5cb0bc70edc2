//! Editable document (OOXML WordprocessingML) rendering.

pub mod package;
mod parts;
mod xml;

pub use package::{entry_names, read_entry, PackageWriter, ZIP_MAGIC};
pub use parts::{BULLET_NUM_ID, LIST_BULLET_STYLE};

use crate::error::Result;
use crate::model::{Alignment, Document, SkillEntry, SkillsGrid, StyledBlock, TextRun};

use super::options::{half_points, pt_twips, twips, RenderOptions};
use xml::{escape, DECLARATION, W_NS};

/// Path of the main document part inside the package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Convert a document to docx bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxRenderer::new(options.clone()).render(doc)
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, Copy, Default)]
struct ParagraphFormat {
    alignment: Option<Alignment>,
    space_before_pt: f32,
    space_after_pt: f32,
    bullet: bool,
    bottom_border: bool,
}

/// Docx renderer.
///
/// Blocks are appended in order; each kind has one emission rule. Page
/// setup and default font are written once, in the section properties and
/// the styles part.
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new docx renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to a complete package.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let body = self.document_xml(doc);

        let mut package = PackageWriter::new();
        package.add("[Content_Types].xml", parts::content_types().as_bytes())?;
        package.add("_rels/.rels", parts::package_rels().as_bytes())?;
        package.add(DOCUMENT_PART, body.as_bytes())?;
        package.add("word/_rels/document.xml.rels", parts::document_rels().as_bytes())?;
        package.add("word/styles.xml", parts::styles(&self.options).as_bytes())?;
        package.add("word/numbering.xml", parts::numbering(&self.options).as_bytes())?;
        package.add("word/settings.xml", parts::settings().as_bytes())?;
        package.add("docProps/core.xml", parts::core_properties(&doc.metadata).as_bytes())?;
        package.add("docProps/app.xml", parts::app_properties().as_bytes())?;
        package.finish()
    }

    /// Render the main document part.
    pub fn document_xml(&self, doc: &Document) -> String {
        let mut output = String::from(DECLARATION);
        output.push_str(&format!(r#"<w:document xmlns:w="{}"><w:body>"#, W_NS));

        for block in &doc.blocks {
            self.render_block(&mut output, block);
        }

        // A body must not end with a table.
        if matches!(
            doc.blocks.last(),
            Some(StyledBlock::EntryRow { .. } | StyledBlock::SkillsGrid(_))
        ) {
            output.push_str("<w:p/>");
        }

        self.render_section(&mut output);
        output.push_str("</w:body></w:document>");
        output
    }

    fn render_block(&self, output: &mut String, block: &StyledBlock) {
        let options = &self.options;
        match block {
            StyledBlock::Heading {
                text,
                size_pt,
                alignment,
                space_after_pt,
            } => {
                let format = ParagraphFormat {
                    alignment: Some(*alignment),
                    space_after_pt: *space_after_pt,
                    ..Default::default()
                };
                paragraph(output, &format, |out| {
                    run(out, &TextRun::new(text.as_str()), Some(*size_pt))
                });
            }
            StyledBlock::ContactBar {
                text,
                alignment,
                bottom_border,
            } => {
                let format = ParagraphFormat {
                    alignment: Some(*alignment),
                    space_after_pt: options.contact_space_after_pt,
                    bottom_border: *bottom_border,
                    ..Default::default()
                };
                paragraph(output, &format, |out| {
                    run(out, &TextRun::new(text.as_str()), None)
                });
            }
            StyledBlock::SectionBanner {
                text,
                bottom_border,
            } => {
                let format = ParagraphFormat {
                    space_before_pt: options.banner_space_before_pt,
                    space_after_pt: options.banner_space_after_pt,
                    bottom_border: *bottom_border,
                    ..Default::default()
                };
                paragraph(output, &format, |out| {
                    run(
                        out,
                        &TextRun::bold(text.as_str()),
                        Some(options.banner_size_pt),
                    )
                });
            }
            StyledBlock::SkillsGrid(grid) => self.render_skills(output, grid),
            StyledBlock::EntryRow {
                right,
                right_alignment,
                ..
            } => {
                let left_runs = block.left_runs();
                let (left_width, right_width) = options.entry_columns_in;
                let format = ParagraphFormat::default();
                table(output, &[left_width, right_width], |out| {
                    out.push_str("<w:tr>");
                    cell(out, left_width, |out| {
                        paragraph(out, &format, |out| {
                            for r in &left_runs {
                                run(out, r, None);
                            }
                        })
                    });
                    cell(out, right_width, |out| {
                        let format = ParagraphFormat {
                            alignment: Some(*right_alignment),
                            ..format
                        };
                        paragraph(out, &format, |out| run(out, right, None))
                    });
                    out.push_str("</w:tr>");
                });
            }
            StyledBlock::InlineHeader { title, detail } => {
                let format = ParagraphFormat {
                    space_after_pt: options.item_space_after_pt,
                    ..Default::default()
                };
                paragraph(output, &format, |out| {
                    run(out, title, None);
                    if let Some(detail) = detail {
                        run(out, &TextRun::new(crate::model::HEADER_SEPARATOR), None);
                        run(out, detail, None);
                    }
                });
            }
            StyledBlock::BulletList { items } => {
                let format = ParagraphFormat {
                    space_after_pt: options.item_space_after_pt,
                    bullet: true,
                    ..Default::default()
                };
                for item in items {
                    paragraph(output, &format, |out| {
                        run(out, &TextRun::new(item.as_str()), None)
                    });
                }
            }
            StyledBlock::Plain { text, italic } => {
                let format = ParagraphFormat {
                    space_after_pt: if *italic {
                        options.italic_space_after_pt
                    } else {
                        0.0
                    },
                    ..Default::default()
                };
                paragraph(output, &format, |out| {
                    run(out, &TextRun::with_italic(text.as_str(), *italic), None)
                });
            }
        }
    }

    fn render_skills(&self, output: &mut String, grid: &SkillsGrid) {
        let (left_width, right_width) = self.options.skills_columns_in;
        let format = ParagraphFormat {
            space_after_pt: self.options.item_space_after_pt,
            ..Default::default()
        };

        table(output, &[left_width, right_width], |out| {
            for row in &grid.rows {
                out.push_str("<w:tr>");
                cell(out, left_width, |out| skill_paragraph(out, &format, Some(&row.left)));
                cell(out, right_width, |out| {
                    skill_paragraph(out, &format, row.right.as_ref())
                });
                out.push_str("</w:tr>");
            }
        });
    }

    fn render_section(&self, output: &mut String) {
        let page = &self.options.page;
        output.push_str(&format!(
            concat!(
                r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/>"#,
                r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
                "</w:sectPr>"
            ),
            twips(page.width_in),
            twips(page.height_in),
            twips(page.margin_top_in),
            twips(page.margin_right_in),
            twips(page.margin_bottom_in),
            twips(page.margin_left_in),
        ));
    }
}

fn skill_paragraph(output: &mut String, format: &ParagraphFormat, entry: Option<&SkillEntry>) {
    match entry {
        Some(entry) => paragraph(output, format, |out| {
            run(out, &TextRun::bold(format!("{}:", entry.category)), None);
            if !entry.skills.is_empty() {
                run(out, &TextRun::new(format!(" {}", entry.skills)), None);
            }
        }),
        None => paragraph(output, format, |_| {}),
    }
}

fn paragraph(output: &mut String, format: &ParagraphFormat, body: impl FnOnce(&mut String)) {
    output.push_str("<w:p><w:pPr>");
    if format.bullet {
        output.push_str(&format!(
            r#"<w:pStyle w:val="{}"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
            LIST_BULLET_STYLE, BULLET_NUM_ID
        ));
    }
    if format.bottom_border {
        output.push_str(
            r#"<w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="auto"/></w:pBdr>"#,
        );
    }
    output.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        pt_twips(format.space_before_pt),
        pt_twips(format.space_after_pt)
    ));
    if let Some(alignment) = format.alignment {
        output.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_ooxml()));
    }
    output.push_str("</w:pPr>");
    body(output);
    output.push_str("</w:p>");
}

fn run(output: &mut String, run: &TextRun, size_pt: Option<f32>) {
    if run.is_empty() {
        return;
    }
    output.push_str("<w:r>");
    if run.style.has_styling() || size_pt.is_some() {
        output.push_str("<w:rPr>");
        if run.style.bold {
            output.push_str("<w:b/><w:bCs/>");
        }
        if run.style.italic {
            output.push_str("<w:i/><w:iCs/>");
        }
        if let Some(size) = size_pt {
            let size = half_points(size);
            output.push_str(&format!(
                r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#,
                size, size
            ));
        }
        output.push_str("</w:rPr>");
    }
    output.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape(&run.text)
    ));
    output.push_str("</w:r>");
}

/// Borderless fixed-layout table.
fn table(output: &mut String, widths_in: &[f32], rows: impl FnOnce(&mut String)) {
    let total: u32 = widths_in.iter().map(|w| twips(*w)).sum();
    output.push_str("<w:tbl><w:tblPr>");
    output.push_str(&format!(r#"<w:tblW w:w="{}" w:type="dxa"/>"#, total));
    output.push_str("<w:tblBorders>");
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        output.push_str(&format!(r#"<w:{} w:val="nil"/>"#, edge));
    }
    output.push_str("</w:tblBorders>");
    output.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
    output.push_str("</w:tblPr><w:tblGrid>");
    for width in widths_in {
        output.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, twips(*width)));
    }
    output.push_str("</w:tblGrid>");
    rows(output);
    output.push_str("</w:tbl>");
}

fn cell(output: &mut String, width_in: f32, content: impl FnOnce(&mut String)) {
    output.push_str(&format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>"#,
        twips(width_in)
    ));
    content(output);
    output.push_str("</w:tc>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Identity, SkillEntry};

    fn xml(blocks: Vec<StyledBlock>) -> String {
        let doc = Document {
            blocks,
            ..Default::default()
        };
        DocxRenderer::new(RenderOptions::default()).document_xml(&doc)
    }

    #[test]
    fn test_banner_has_bottom_border() {
        let xml = xml(vec![StyledBlock::SectionBanner {
            text: "EXPERIENCE".into(),
            bottom_border: true,
        }]);
        assert!(xml.contains(r#"<w:pBdr><w:bottom w:val="single" w:sz="4""#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains(">EXPERIENCE</w:t>"));
    }

    #[test]
    fn test_heading_size_and_alignment() {
        let xml = xml(vec![StyledBlock::Heading {
            text: "Jane".into(),
            size_pt: 22.0,
            alignment: Alignment::Center,
            space_after_pt: 2.0,
        }]);
        assert!(xml.contains(r#"<w:sz w:val="44"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"w:after="40""#));
    }

    #[test]
    fn test_entry_row_table() {
        let xml = xml(vec![StyledBlock::EntryRow {
            primary: TextRun::bold("Engineer"),
            secondary: Some(TextRun::new("Acme")),
            right: TextRun::italic("2020"),
            right_alignment: Alignment::Right,
        }]);
        assert!(xml.contains(r#"<w:gridCol w:w="7200"/><w:gridCol w:w="3600"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="right"/>"#));
        assert!(xml.contains("<w:i/><w:iCs/></w:rPr><w:t xml:space=\"preserve\">2020</w:t>"));
        // trailing paragraph after a final table
        assert!(xml.contains("</w:tbl><w:p/><w:sectPr>"));
    }

    #[test]
    fn test_skills_grid_blank_cell() {
        let grid = SkillsGrid::from_entries(vec![
            SkillEntry::new("Languages", "Rust"),
            SkillEntry::new("Cloud", "AWS"),
            SkillEntry::new("Tools", "Git"),
        ]);
        let xml = xml(vec![StyledBlock::SkillsGrid(grid)]);
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert!(xml.contains(">Languages:</w:t>"));
        assert!(xml.contains("> Rust</w:t>"));
        // blank right cell still holds a paragraph
        assert!(xml.contains(r#"<w:tcW w:w="5400" w:type="dxa"/></w:tcPr><w:p><w:pPr><w:spacing w:before="0" w:after="40"/></w:pPr></w:p></w:tc>"#));
    }

    #[test]
    fn test_bullets_use_numbering() {
        let xml = xml(vec![StyledBlock::BulletList {
            items: vec!["one".into(), "two & three".into()],
        }]);
        assert_eq!(xml.matches(r#"<w:numId w:val="1"/>"#).count(), 2);
        assert!(xml.contains(">two &amp; three<"));
    }

    #[test]
    fn test_page_setup() {
        let xml = xml(Vec::new());
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="432" w:right="720" w:bottom="432" w:left="720""#));
    }

    #[test]
    fn test_render_package_parts() {
        let identity = Identity::new("Jane");
        let doc = crate::layout::build(&identity, &crate::parser::parse("# Jane"));
        let bytes = to_docx(&doc, &RenderOptions::default()).unwrap();
        let names = entry_names(&bytes).unwrap();
        assert_eq!(names[0], "[Content_Types].xml");
        assert!(names.contains(&DOCUMENT_PART.to_string()));
        assert!(names.contains(&"word/numbering.xml".to_string()));
        let body = read_entry(&bytes, DOCUMENT_PART).unwrap().unwrap();
        assert!(String::from_utf8(body).unwrap().contains(">Jane</w:t>"));
    }
}
