//! Layout options.

/// Typographic constants decided at layout time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Font size of the name heading in points
    pub title_size_pt: f32,

    /// Space after the name heading in points
    pub title_space_after_pt: f32,

    /// Font size of the headline in points
    pub headline_size_pt: f32,

    /// Space after the headline in points
    pub headline_space_after_pt: f32,

    /// Draw a rule under the contact bar
    pub contact_border: bool,

    /// Drop section banners that have no body
    pub omit_empty_sections: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name heading size.
    pub fn with_title_size(mut self, size_pt: f32) -> Self {
        self.title_size_pt = size_pt;
        self
    }

    /// Enable or disable the contact bar rule.
    pub fn with_contact_border(mut self, border: bool) -> Self {
        self.contact_border = border;
        self
    }

    /// Keep banners of empty sections.
    pub fn keep_empty_sections(mut self) -> Self {
        self.omit_empty_sections = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            title_size_pt: 22.0,
            title_space_after_pt: 2.0,
            headline_size_pt: 11.0,
            headline_space_after_pt: 6.0,
            contact_border: true,
            omit_empty_sections: true,
        }
    }
}
