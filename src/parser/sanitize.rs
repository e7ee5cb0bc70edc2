//! Marker stripping and line normalization.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Characters that never carry content in the markup dialect.
const INVISIBLE_CHARS: [char; 3] = ['\u{FEFF}', '\u{200B}', '\u{200D}'];

fn inline_markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*+|`+").expect("inline markup pattern"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern"))
}

/// NFC-normalize a line and drop byte-order marks and zero-width characters.
pub fn normalize_line(line: &str) -> String {
    line.nfc()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .collect()
}

/// Remove all emphasis (`*`, `**`) and code (`` ` ``) markers and collapse
/// the whitespace left behind.
///
/// Bullet text goes through this so the output never carries inline markup.
pub fn strip_inline_markup(text: &str) -> String {
    let stripped = inline_markup_regex().replace_all(text, "");
    whitespace_regex()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Remove bold markers only.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Remove every asterisk.
pub fn strip_asterisks(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

/// Check if text is wrapped in single-asterisk emphasis (`*text*`, not `**text**`).
pub fn is_single_emphasis(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('*') && text.ends_with('*') && !text.starts_with("**")
}
