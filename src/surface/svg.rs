//! SVG preview surface
//!
//! Produces a standalone SVG document of a rendered frame. The transparency
//! brush is emitted as an unfilled shape so the preview shows what the overlay
//! window would let through.

use std::fmt::Write;

use super::{Brush, Point, Rect, Size, Surface};
use crate::ruler::DrawStyle;

pub struct SvgSurface {
    size: Size,
    style: DrawStyle,
    body: String,
}

impl SvgSurface {
    pub fn new(size: Size, style: &DrawStyle) -> Self {
        Self {
            size,
            style: style.clone(),
            body: String::new(),
        }
    }

    fn paint(&self, brush: Brush) -> String {
        match brush {
            Brush::Transparency => "none".to_string(),
            other => self.style.palette.color(other).hex(),
        }
    }

    /// Finish the document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.size.width,
            h = self.size.height,
            body = self.body
        )
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, brush: Brush, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let fill = self.paint(brush);
        let _ = writeln!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            rect.x, rect.y, rect.width, rect.height, fill
        );
    }

    fn draw_line(&mut self, brush: Brush, width: i32, from: Point, to: Point) {
        let stroke = self.paint(brush);
        let _ = writeln!(
            self.body,
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            from.x, from.y, to.x, to.y, stroke, width
        );
    }

    fn draw_text(&mut self, brush: Brush, origin: Point, text: &str) {
        let fill = self.paint(brush);
        // SVG anchors text at the baseline; GDI at the top-left of the cell.
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}pt\" dominant-baseline=\"hanging\" fill=\"{}\">{}</text>",
            origin.x,
            origin.y,
            self.style.font.family,
            self.style.font.size_pt,
            fill,
            escape(text)
        );
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wraps_shapes() {
        let mut surface = SvgSurface::new(Size::new(200, 100), &DrawStyle::default());
        surface.fill_rect(Brush::Foreground, Rect::new(0, 0, 10, 10));
        surface.draw_text(Brush::Background, Point::new(5, 5), "cm");
        let svg = surface.finish();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("fill=\"#000000\""));
        assert!(svg.contains(">cm</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transparency_is_unfilled_and_empty_rects_skipped() {
        let mut surface = SvgSurface::new(Size::new(10, 10), &DrawStyle::default());
        surface.fill_rect(Brush::Transparency, Rect::new(0, 0, 10, 10));
        surface.fill_rect(Brush::Foreground, Rect::new(0, 0, -3, 10));
        let svg = surface.finish();

        assert!(svg.contains("fill=\"none\""));
        assert_eq!(svg.matches("<rect").count(), 1);
    }
}
