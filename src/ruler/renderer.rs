//! Ruler marker layout
//!
//! Turns a surface size, a DPI value and a unit into fill/line/text calls:
//! a vertical marker band on the right edge, a horizontal band along the
//! bottom, a diagonal across the remaining area, and a unit indicator in the
//! corner where the two bands meet.

use serde::Serialize;

use super::style::DrawStyle;
use super::units::{compute_scale, round_hundredths, Scale, UnitKind};
use crate::surface::{Brush, Point, Rect, Surface};

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub unit: UnitKind,
    pub scale: Scale,
    pub vertical_ticks: u32,
    pub horizontal_ticks: u32,
    /// Diagonal of the inner area in `unit`, rounded to hundredths
    pub diagonal_length: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RulerRenderer {
    style: DrawStyle,
}

impl RulerRenderer {
    pub fn new(style: DrawStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    /// Draw a complete frame
    pub fn render_frame(&self, surface: &mut dyn Surface, dpi: u32, unit: UnitKind) -> FrameReport {
        let size = surface.size();
        let margin = self.style.marker_thickness;

        surface.fill_rect(Brush::Transparency, Rect::new(0, 0, size.width, size.height));

        let scale = compute_scale(dpi, unit);

        let vertical_ticks = self.render_vertical(surface, scale);
        let horizontal_ticks = self.render_horizontal(surface, scale);
        let diagonal_length = self.render_diagonal(surface, scale);

        // Corner square hides where the two bands overlap
        let corner = Point::new(size.width - margin, size.height - margin);
        surface.fill_rect(Brush::Foreground, Rect::new(corner.x, corner.y, margin, margin));
        surface.draw_text(Brush::Background, corner, unit.label());

        // Border
        surface.fill_rect(Brush::Foreground, Rect::new(0, 0, size.width - margin, 1));
        surface.fill_rect(Brush::Foreground, Rect::new(0, 0, 1, size.height - margin));

        let report = FrameReport {
            unit,
            scale,
            vertical_ticks,
            horizontal_ticks,
            diagonal_length,
        };
        tracing::debug!(
            "Rendered {}x{} frame in {} at {} dpi: {:?}",
            size.width,
            size.height,
            unit,
            dpi,
            report
        );
        report
    }

    /// Markers down the right edge. Returns the number of major ticks drawn.
    pub fn render_vertical(&self, surface: &mut dyn Surface, scale: Scale) -> u32 {
        let size = surface.size();
        let s = &self.style;
        let band_x = size.width - s.marker_thickness;
        let step = clamp_i32(scale.pixels_per_unit);
        let sub_step = scale.sub_tick_spacing(s.sub_ticks);
        let ticks = scale.tick_count(size.height);

        surface.fill_rect(
            Brush::Background,
            Rect::new(band_x, 0, s.marker_thickness, size.height),
        );

        for i in 0..ticks {
            let y = clamp_i32(i).saturating_mul(step);
            let label = tick_label(i, scale);
            let text_offset = s.text_offset * label.len() as i32 + s.text_offset;

            surface.fill_rect(
                Brush::Foreground,
                Rect::new(band_x, y, s.marker_thickness, s.tick_thickness),
            );

            for j in 0..s.sub_ticks as i32 {
                surface.fill_rect(
                    Brush::Foreground,
                    Rect::new(
                        size.width - s.sub_tick_length,
                        y.saturating_add(j.saturating_mul(sub_step)),
                        s.sub_tick_length,
                        s.sub_tick_thickness,
                    ),
                );
            }

            // Erase behind the label in case it is wider than the band
            let label_origin = Point::new(
                size.width - text_offset - s.label_padding,
                y - s.text_offset - s.label_padding,
            );
            surface.fill_rect(
                Brush::Background,
                Rect::new(
                    label_origin.x,
                    label_origin.y,
                    text_offset - s.marker_thickness + s.label_padding,
                    s.text_offset + s.label_padding,
                ),
            );
            surface.draw_text(Brush::Foreground, label_origin, &label);
        }

        ticks
    }

    /// Markers along the bottom edge. Returns the number of major ticks drawn.
    ///
    /// Labels sit one glyph further right than the vertical band's; the
    /// vertical offset carries an extra `text_offset` term this one does not.
    pub fn render_horizontal(&self, surface: &mut dyn Surface, scale: Scale) -> u32 {
        let size = surface.size();
        let s = &self.style;
        let band_y = size.height - s.marker_thickness;
        let step = clamp_i32(scale.pixels_per_unit);
        let sub_step = scale.sub_tick_spacing(s.sub_ticks);
        let ticks = scale.tick_count(size.width);

        surface.fill_rect(
            Brush::Background,
            Rect::new(0, band_y, size.width, s.marker_thickness),
        );

        for i in 0..ticks {
            let x = clamp_i32(i).saturating_mul(step);
            let label = tick_label(i, scale);
            let text_offset = s.text_offset * label.len() as i32;

            surface.fill_rect(
                Brush::Foreground,
                Rect::new(x, band_y, s.tick_thickness, s.marker_thickness),
            );

            for j in 0..s.sub_ticks as i32 {
                surface.fill_rect(
                    Brush::Foreground,
                    Rect::new(
                        x.saturating_add(j.saturating_mul(sub_step)),
                        size.height - s.sub_tick_length,
                        s.sub_tick_thickness,
                        s.sub_tick_length,
                    ),
                );
            }

            surface.draw_text(Brush::Foreground, Point::new(x - text_offset, band_y), &label);
        }

        ticks
    }

    /// Diagonal from the top-left corner to the inner corner of the bands.
    /// Returns its length in the current unit.
    pub fn render_diagonal(&self, surface: &mut dyn Surface, scale: Scale) -> f64 {
        let size = surface.size();
        let s = &self.style;
        let width = size.width - s.marker_thickness;
        let height = size.height - s.marker_thickness;

        let length = diagonal_length(width, height, scale);

        let origin = Point::new(0, 0);
        let end = Point::new(width, height);
        surface.draw_line(Brush::Background, s.tick_thickness * 2, origin, end);
        surface.draw_line(Brush::Foreground, s.tick_thickness, origin, end);

        let label = length.to_string();
        let label_origin = Point::new(width / 2 + 10, height / 2 - 20);
        surface.fill_rect(
            Brush::Background,
            Rect::new(
                label_origin.x,
                label_origin.y,
                s.text_offset * label.len() as i32,
                s.text_offset + s.label_padding,
            ),
        );
        surface.draw_text(Brush::Foreground, label_origin, &label);

        length
    }
}

/// Pixel distances past `i32::MAX` pin to the far edge of the coordinate space
fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn tick_label(index: u32, scale: Scale) -> String {
    (u64::from(index) * u64::from(scale.multiplier)).to_string()
}

/// Length of the `width` x `height` diagonal in units of `scale`
pub fn diagonal_length(width: i32, height: i32, scale: Scale) -> f64 {
    let w = f64::from(width);
    let h = f64::from(height);
    round_hundredths(w.hypot(h) / f64::from(scale.pixels_per_unit) * f64::from(scale.multiplier))
}
