//! Skills rows.

use crate::model::{SkillEntry, SkillsGrid};
use crate::parser::sanitize::strip_bold;
use crate::parser::{LineKind, MarkupLine};

/// Parse `**Category:** a, b, c` into a skill entry.
///
/// A row without a colon becomes a category with no skills.
pub fn parse_row(text: &str) -> SkillEntry {
    let text = strip_bold(text);
    match text.split_once(':') {
        Some((category, skills)) => SkillEntry::new(category.trim(), skills.trim()),
        None => {
            log::warn!("Skills row without a category separator: {:?}", text);
            SkillEntry::new(text, "")
        }
    }
}

/// Collect the skills rows that directly follow `lines[start]`.
///
/// Returns the grid and the index of the first line after the rows.
pub fn collect_grid(lines: &[MarkupLine], start: usize) -> (SkillsGrid, usize) {
    let rows: Vec<SkillEntry> = lines[start + 1..]
        .iter()
        .take_while(|line| line.kind == LineKind::SkillsRow)
        .map(|line| parse_row(&line.text))
        .collect();
    let next = start + 1 + rows.len();
    (SkillsGrid::from_entries(rows), next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_parse_row() {
        assert_eq!(
            parse_row("**Languages:** Python, Go"),
            SkillEntry::new("Languages", "Python, Go")
        );
        assert_eq!(parse_row("**Cloud**: AWS"), SkillEntry::new("Cloud", "AWS"));
        assert_eq!(parse_row("**Misc**"), SkillEntry::new("Misc", ""));
    }

    #[test]
    fn test_collect_grid_stops_at_non_row() {
        let lines = parse("## Skills\n**A:** 1\n**B:** 2\n**C:** 3\n## Experience");
        let (grid, next) = collect_grid(&lines, 0);
        assert_eq!(next, 4);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows[0].left.category, "A");
        assert_eq!(grid.rows[0].right.as_ref().unwrap().category, "C");
        assert_eq!(grid.rows[1].left.category, "B");
        assert!(grid.rows[1].right.is_none());
    }

    #[test]
    fn test_collect_grid_empty() {
        let lines = parse("## Skills\n\n**A:** 1");
        let (grid, next) = collect_grid(&lines, 0);
        assert!(grid.is_empty());
        assert_eq!(next, 1);
    }
}
