//! Entry header splitting.

use crate::model::{Alignment, StyledBlock, TextRun, HEADER_SEPARATOR};
use crate::parser::sanitize::{is_single_emphasis, strip_asterisks, strip_bold};
use crate::parser::SENTINEL;

/// Split `**Title** | Company | Location ||| Dates` into an entry row.
///
/// The left side is split on its first pipe: the part before is the bold
/// primary text, the rest is the plain secondary text. The right side is
/// italic only when it was wrapped in `*...*`; its asterisks are always
/// removed.
pub fn two_column(text: &str) -> StyledBlock {
    let (left, right) = text.split_once(SENTINEL).unwrap_or((text, ""));

    let left = strip_bold(left);
    let (primary, secondary) = match left.split_once('|') {
        Some((primary, rest)) => (primary.trim().to_string(), join_parts(rest)),
        None => (left, String::new()),
    };

    let right = right.trim();
    let italic = is_single_emphasis(right);

    StyledBlock::EntryRow {
        primary: TextRun::bold(primary),
        secondary: non_empty(secondary).map(TextRun::new),
        right: TextRun::with_italic(strip_asterisks(right), italic),
        right_alignment: Alignment::Right,
    }
}

/// Split `**Name** | *Technologies*` into a single-column header.
pub fn project_style(text: &str) -> StyledBlock {
    let (title, detail) = text.split_once('|').unwrap_or((text, ""));

    StyledBlock::InlineHeader {
        title: TextRun::bold(strip_bold(title)),
        detail: non_empty(join_parts(&strip_asterisks(detail))).map(TextRun::italic),
    }
}

/// Trim pipe-separated parts, drop empty ones and rejoin them.
fn join_parts(text: &str) -> String {
    text.split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(HEADER_SEPARATOR)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_parts(block: &StyledBlock) -> (TextRun, Option<TextRun>, TextRun) {
        match block {
            StyledBlock::EntryRow {
                primary,
                secondary,
                right,
                right_alignment,
            } => {
                assert_eq!(*right_alignment, Alignment::Right);
                (primary.clone(), secondary.clone(), right.clone())
            }
            other => panic!("expected entry row, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_law() {
        let (primary, secondary, right) = entry_parts(&two_column("**A** | B ||| C"));
        assert_eq!(primary, TextRun::bold("A"));
        assert_eq!(secondary, Some(TextRun::new("B")));
        assert_eq!(right.text, "C");
        assert!(!right.style.italic);
    }

    #[test]
    fn test_italic_right_column() {
        let (_, _, right) = entry_parts(&two_column("**A** ||| *Jan 2020 - Present*"));
        assert_eq!(right, TextRun::italic("Jan 2020 - Present"));

        let (_, _, right) = entry_parts(&two_column("**A** ||| **2021**"));
        assert_eq!(right, TextRun::new("2021"));
    }

    #[test]
    fn test_secondary_keeps_all_parts() {
        let (primary, secondary, _) =
            entry_parts(&two_column("**Engineer** | Acme | Berlin ||| 2020"));
        assert_eq!(primary.text, "Engineer");
        assert_eq!(secondary.unwrap().text, "Acme | Berlin");
    }

    #[test]
    fn test_missing_fields_collapse() {
        let (primary, secondary, right) = entry_parts(&two_column("**Engineer** | Acme |  ||| "));
        assert_eq!(primary.text, "Engineer");
        assert_eq!(secondary.unwrap().text, "Acme");
        assert!(right.is_empty());

        let (primary, secondary, _) = entry_parts(&two_column("**B.Sc.** ||| 2019"));
        assert_eq!(primary.text, "B.Sc.");
        assert!(secondary.is_none());
    }

    #[test]
    fn test_project_style() {
        let block = project_style("**Resumark** | *Rust, OOXML*");
        assert_eq!(
            block,
            StyledBlock::InlineHeader {
                title: TextRun::bold("Resumark"),
                detail: Some(TextRun::italic("Rust, OOXML")),
            }
        );

        let block = project_style("**Solo** | **");
        assert_eq!(
            block,
            StyledBlock::InlineHeader {
                title: TextRun::bold("Solo"),
                detail: None,
            }
        );
    }
}
