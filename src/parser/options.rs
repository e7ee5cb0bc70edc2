//! Parsing options and configuration.

/// Keyword used when none (or a blank one) is configured.
pub const DEFAULT_SKILLS_KEYWORD: &str = "SKILLS";

/// Options for classifying markup.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// NFC-normalize lines and drop zero-width characters before classifying
    pub normalize_unicode: bool,

    /// Word that turns a section header into a skills header (case-insensitive)
    pub skills_keyword: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set the skills header keyword. A blank keyword keeps the default.
    pub fn with_skills_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            log::warn!("Ignoring blank skills keyword, using {:?}", DEFAULT_SKILLS_KEYWORD);
        } else {
            self.skills_keyword = keyword.trim().to_string();
        }
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            skills_keyword: DEFAULT_SKILLS_KEYWORD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_normalization(false)
            .with_skills_keyword("Competencies");

        assert!(!options.normalize_unicode);
        assert_eq!(options.skills_keyword, "Competencies");
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.normalize_unicode);
        assert_eq!(options.skills_keyword, "SKILLS");
    }

    #[test]
    fn test_blank_skills_keyword_keeps_default() {
        let options = ParseOptions::new().with_skills_keyword("");
        assert_eq!(options.skills_keyword, DEFAULT_SKILLS_KEYWORD);

        let options = ParseOptions::new()
            .with_skills_keyword("Tooling")
            .with_skills_keyword("   ");
        assert_eq!(options.skills_keyword, "Tooling");
    }
}
