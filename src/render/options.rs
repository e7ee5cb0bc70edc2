//! Rendering options and configuration.

/// Twips (1/20 pt) per inch.
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Options applied once per rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Page size and margins
    pub page: PageSetup,

    /// Default body font
    pub font_name: String,

    /// Default body font size in points
    pub font_size_pt: f32,

    /// Section banner font size in points
    pub banner_size_pt: f32,

    /// Space before a section banner in points
    pub banner_space_before_pt: f32,

    /// Space after a section banner in points
    pub banner_space_after_pt: f32,

    /// Space after the contact bar in points
    pub contact_space_after_pt: f32,

    /// Space after list items, skills cells and inline headers in points
    pub item_space_after_pt: f32,

    /// Space after an italic plain paragraph in points
    pub italic_space_after_pt: f32,

    /// Left indent of bullet items in inches
    pub bullet_indent_in: f32,

    /// Column widths of entry rows in inches (left, right)
    pub entry_columns_in: (f32, f32),

    /// Column widths of the skills grid in inches (left, right)
    pub skills_columns_in: (f32, f32),
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page setup.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set the body font.
    pub fn with_font(mut self, name: impl Into<String>, size_pt: f32) -> Self {
        self.font_name = name.into();
        self.font_size_pt = size_pt;
        self
    }

    /// Set the bullet indent.
    pub fn with_bullet_indent(mut self, inches: f32) -> Self {
        self.bullet_indent_in = inches;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            font_name: "Calibri".to_string(),
            font_size_pt: 10.5,
            banner_size_pt: 11.0,
            banner_space_before_pt: 5.0,
            banner_space_after_pt: 1.0,
            contact_space_after_pt: 8.0,
            item_space_after_pt: 2.0,
            italic_space_after_pt: 4.0,
            bullet_indent_in: 0.25,
            entry_columns_in: (5.0, 2.5),
            skills_columns_in: (3.75, 3.75),
        }
    }
}

/// Page dimensions and margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Page width
    pub width_in: f32,
    /// Page height
    pub height_in: f32,
    /// Top margin
    pub margin_top_in: f32,
    /// Bottom margin
    pub margin_bottom_in: f32,
    /// Left margin
    pub margin_left_in: f32,
    /// Right margin
    pub margin_right_in: f32,
}

impl PageSetup {
    /// US Letter (8.5 x 11 inches) with resume margins.
    pub fn letter() -> Self {
        Self {
            width_in: 8.5,
            height_in: 11.0,
            margin_top_in: 0.3,
            margin_bottom_in: 0.3,
            margin_left_in: 0.5,
            margin_right_in: 0.5,
        }
    }

    /// A4 (210 x 297 mm) with resume margins.
    pub fn a4() -> Self {
        Self {
            width_in: 8.27,
            height_in: 11.69,
            ..Self::letter()
        }
    }

    /// Set all four margins.
    pub fn with_margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margin_top_in = top;
        self.margin_right_in = right;
        self.margin_bottom_in = bottom;
        self.margin_left_in = left;
        self
    }

    /// Width between the side margins in inches.
    pub fn content_width_in(&self) -> f32 {
        self.width_in - self.margin_left_in - self.margin_right_in
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

/// Convert inches to twips.
pub fn twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round().max(0.0) as u32
}

/// Convert points to twips (spacing units).
pub fn pt_twips(points: f32) -> u32 {
    (points * 20.0).round().max(0.0) as u32
}

/// Convert points to half-points (font size units).
pub fn half_points(points: f32) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}
