//! Fixed visual constants for the ruler

use crate::surface::Brush;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const MAGENTA: Rgb = Rgb::new(0xFF, 0x00, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Win32 COLORREF layout (0x00bbggrr)
    pub fn to_colorref(&self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

/// Colors supplied by the hosting window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub transparency: Rgb,
    pub foreground: Rgb,
}

impl Palette {
    pub fn color(&self, brush: Brush) -> Rgb {
        match brush {
            Brush::Background => self.background,
            Brush::Transparency => self.transparency,
            Brush::Foreground => self.foreground,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            transparency: Rgb::MAGENTA,
            foreground: Rgb::BLACK,
        }
    }
}

/// Label font
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in points
    pub size_pt: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Courier New".to_string(),
            size_pt: 16,
        }
    }
}

/// Marker geometry, label spacing, font and palette
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    /// Width of the right and bottom margin bands, and the major tick length
    pub marker_thickness: i32,
    pub tick_thickness: i32,
    pub sub_tick_length: i32,
    pub sub_tick_thickness: i32,
    pub sub_ticks: u32,
    /// Per-character advance assumed for the fixed-pitch label font
    pub text_offset: i32,
    pub label_padding: i32,
    pub font: FontSpec,
    pub palette: Palette,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            marker_thickness: 40,
            tick_thickness: 3,
            sub_tick_length: 20,
            sub_tick_thickness: 1,
            sub_ticks: 10,
            text_offset: 16,
            label_padding: 5,
            font: FontSpec::default(),
            palette: Palette::default(),
        }
    }
}
