//! Single-pass markup scanner.

use super::line::{classify, LineKind, MarkupLine};
use super::sanitize::normalize_line;
use super::ParseOptions;

/// Markup line classifier.
///
/// The scan is left to right with no lookahead. The only carried state is
/// whether the previous line was a skills header or skills row.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    options: ParseOptions,
}

impl MarkupParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Classify every line of `input`, blank lines included, in order.
    pub fn parse(&self, input: &str) -> Vec<MarkupLine> {
        let mut lines = Vec::new();
        let mut in_skills = false;

        for (index, raw) in input.lines().enumerate() {
            let text = if self.options.normalize_unicode {
                normalize_line(raw)
            } else {
                raw.to_string()
            };
            let text = text.trim();

            let kind = classify(text, in_skills, &self.options.skills_keyword);
            in_skills = matches!(kind, LineKind::SkillsSectionHeader | LineKind::SkillsRow);

            lines.push(MarkupLine::new(index + 1, text, kind));
        }

        log::debug!("Classified {} markup lines", lines.len());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<LineKind> {
        MarkupParser::new()
            .parse(input)
            .into_iter()
            .map(|l| l.kind)
            .collect()
    }

    #[test]
    fn test_skills_rows_until_non_bold_line() {
        let input = "## Skills\n**Languages:** Rust\n**Cloud:** AWS\n\n**Other** | *x*";
        assert_eq!(
            kinds(input),
            vec![
                LineKind::SkillsSectionHeader,
                LineKind::SkillsRow,
                LineKind::SkillsRow,
                LineKind::Blank,
                LineKind::EntryHeaderProjectStyle,
            ]
        );
    }

    #[test]
    fn test_blank_lines_retained() {
        let lines = MarkupParser::new().parse("# A\n\n  \n- b");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].kind, LineKind::Blank);
        assert_eq!(lines[2].kind, LineKind::Blank);
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let lines = MarkupParser::new().parse("   - indented bullet   ");
        assert_eq!(lines[0].text, "- indented bullet");
        assert_eq!(lines[0].kind, LineKind::BulletPoint);
    }

    #[test]
    fn test_normalization_toggle() {
        let input = "\u{FEFF}# Name";
        assert_eq!(kinds(input), vec![LineKind::Title]);

        let raw = MarkupParser::with_options(ParseOptions::new().with_normalization(false));
        assert_eq!(raw.parse(input)[0].kind, LineKind::PlainText);
    }

    #[test]
    fn test_custom_skills_keyword() {
        let parser =
            MarkupParser::with_options(ParseOptions::new().with_skills_keyword("competencies"));
        let lines = parser.parse("## Core Competencies\n**Lead:** Teams");
        assert_eq!(lines[0].kind, LineKind::SkillsSectionHeader);
        assert_eq!(lines[1].kind, LineKind::SkillsRow);
    }
}
