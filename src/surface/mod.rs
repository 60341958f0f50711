//! Drawing surface abstraction
//!
//! The ruler renders through the [`Surface`] trait so the same layout code can
//! target a GDI device context, an in-memory command list, or an SVG preview.

mod recording;
mod svg;

#[cfg(test)]
pub use recording::DrawCommand;
pub use recording::RecordingSurface;
pub use svg::SvgSurface;

use serde::Serialize;

/// Pixel dimensions of a drawable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }
}

/// A point in surface coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by origin and extent.
///
/// Width and height may be negative for degenerate layouts on tiny surfaces;
/// surfaces treat such rectangles as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[cfg(target_os = "windows")]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[cfg(target_os = "windows")]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// Palette role used for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Brush {
    /// Opaque backing behind markers and labels
    Background,
    /// Color key the host window renders as see-through
    Transparency,
    /// Markers, labels and borders
    Foreground,
}

/// Something the ruler can draw onto
pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> Size;

    /// Fill a rectangle with a solid brush
    fn fill_rect(&mut self, brush: Brush, rect: Rect);

    /// Stroke a straight line of the given pen width
    fn draw_line(&mut self, brush: Brush, width: i32, from: Point, to: Point);

    /// Draw text with its top-left corner at `origin`, using the style font
    fn draw_text(&mut self, brush: Brush, origin: Point, text: &str);
}
