//! Package parts other than the document body.

use chrono::SecondsFormat;

use super::xml::{escape, DECLARATION, W_NS};
use crate::model::Metadata;
use crate::render::options::{half_points, twips, RenderOptions};

/// Numbering definition used by bullet paragraphs.
pub const BULLET_NUM_ID: u32 = 1;

/// Style id of bullet paragraphs.
pub const LIST_BULLET_STYLE: &str = "ListBullet";

/// Hanging indent of the bullet glyph in inches.
const BULLET_HANGING_IN: f32 = 0.125;

pub fn content_types() -> String {
    format!(
        concat!(
            "{}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
            r#"<Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
            "</Types>"
        ),
        DECLARATION
    )
}

pub fn package_rels() -> String {
    format!(
        concat!(
            "{}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        DECLARATION
    )
}

pub fn document_rels() -> String {
    format!(
        concat!(
            "{}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>"#,
            "</Relationships>"
        ),
        DECLARATION
    )
}

/// Document defaults: body font and size, zero paragraph spacing.
pub fn styles(options: &RenderOptions) -> String {
    let font = escape(&options.font_name);
    let size = half_points(options.font_size_pt);
    let indent = twips(options.bullet_indent_in);

    let mut xml = String::from(DECLARATION);
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, W_NS));
    xml.push_str(&format!(
        concat!(
            "<w:docDefaults><w:rPrDefault><w:rPr>",
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
            "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
            r#"<w:spacing w:before="0" w:after="0" w:line="240" w:lineRule="auto"/>"#,
            "</w:pPr></w:pPrDefault></w:docDefaults>"
        ),
        font = font,
        size = size
    ));
    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
        r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#
    ));
    xml.push_str(&format!(
        concat!(
            r#"<w:style w:type="paragraph" w:styleId="{id}">"#,
            r#"<w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
            r#"<w:pPr><w:numPr><w:numId w:val="{num}"/></w:numPr>"#,
            r#"<w:ind w:left="{indent}" w:hanging="{hanging}"/></w:pPr></w:style>"#
        ),
        id = LIST_BULLET_STYLE,
        num = BULLET_NUM_ID,
        indent = indent,
        hanging = twips(BULLET_HANGING_IN)
    ));
    xml.push_str(concat!(
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal">"#,
        r#"<w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/>"#,
        r#"<w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="0" w:type="dxa"/>"#,
        r#"<w:bottom w:w="0" w:type="dxa"/><w:right w:w="0" w:type="dxa"/></w:tblCellMar>"#,
        "</w:tblPr></w:style>"
    ));
    xml.push_str("</w:styles>");
    xml
}

/// Single-level bullet list definition.
pub fn numbering(options: &RenderOptions) -> String {
    format!(
        concat!(
            "{decl}",
            r#"<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0">"#,
            r#"<w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/>"#,
            r#"<w:lvlText w:val="{glyph}"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="{indent}" w:hanging="{hanging}"/></w:pPr>"#,
            r#"<w:rPr><w:rFonts w:ascii="Symbol" w:hAnsi="Symbol" w:hint="default"/></w:rPr>"#,
            "</w:lvl></w:abstractNum>",
            r#"<w:num w:numId="{num}"><w:abstractNumId w:val="0"/></w:num>"#,
            "</w:numbering>"
        ),
        decl = DECLARATION,
        ns = W_NS,
        glyph = "\u{F0B7}",
        indent = twips(options.bullet_indent_in),
        hanging = twips(BULLET_HANGING_IN),
        num = BULLET_NUM_ID
    )
}

pub fn settings() -> String {
    format!(
        concat!(
            "{}",
            r#"<w:settings xmlns:w="{}">"#,
            r#"<w:defaultTabStop w:val="720"/>"#,
            r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
            "</w:settings>"
        ),
        DECLARATION, W_NS
    )
}

/// Core properties: title, author and the optional creation date.
pub fn core_properties(metadata: &Metadata) -> String {
    let mut xml = String::from(DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(ref title) = metadata.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape(title)));
    }
    if let Some(ref author) = metadata.author {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(author)));
    }
    if let Some(ref created) = metadata.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

pub fn app_properties() -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>resumark/{}</Application>",
            "</Properties>"
        ),
        DECLARATION,
        env!("CARGO_PKG_VERSION")
    )
}
