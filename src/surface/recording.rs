//! In-memory surface that records every draw call

use serde::Serialize;

use super::{Brush, Point, Rect, Size, Surface};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        brush: Brush,
        rect: Rect,
    },
    Line {
        brush: Brush,
        width: i32,
        from: Point,
        to: Point,
    },
    Text {
        brush: Brush,
        origin: Point,
        text: String,
    },
}

/// Surface that keeps the draw calls instead of rasterizing them
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Texts drawn so far, in draw order
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Rectangles filled with `brush`, in draw order
    #[cfg(test)]
    pub fn fills(&self, brush: Brush) -> impl Iterator<Item = &Rect> + '_ {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::FillRect { brush: b, rect } if *b == brush => Some(rect),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, brush: Brush, rect: Rect) {
        self.commands.push(DrawCommand::FillRect { brush, rect });
    }

    fn draw_line(&mut self, brush: Brush, width: i32, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line {
            brush,
            width,
            from,
            to,
        });
    }

    fn draw_text(&mut self, brush: Brush, origin: Point, text: &str) {
        self.commands.push(DrawCommand::Text {
            brush,
            origin,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(Size::new(100, 50));
        surface.fill_rect(Brush::Background, Rect::new(0, 0, 10, 10));
        surface.draw_text(Brush::Foreground, Point::new(1, 2), "12");
        surface.draw_line(Brush::Foreground, 3, Point::new(0, 0), Point::new(5, 5));

        assert_eq!(surface.commands().len(), 3);
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["12"]);
        assert_eq!(surface.fills(Brush::Background).count(), 1);
        assert_eq!(surface.fills(Brush::Foreground).count(), 0);
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = DrawCommand::FillRect {
            brush: Brush::Transparency,
            rect: Rect::new(0, 0, 4, 4),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["op"], "fill_rect");
        assert_eq!(json["brush"], "transparency");
        assert_eq!(json["rect"]["width"], 4);
    }
}
